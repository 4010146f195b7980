// ABOUTME: Image decoding, bounded resizing and JPEG compression
// ABOUTME: One parameterized routine serves both food entry photos and profile photos
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Image operations
//!
//! Decoding and encoding are CPU-bound, so the async variants run them on the
//! blocking pool to keep the runtime responsive.

use crate::constants::images;
use crate::errors::{FoodError, FoodResult};
use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageResult};

/// Resize bound and JPEG quality for one kind of upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageProfile {
    /// Neither edge of the prepared image exceeds this many pixels
    pub max_dimension: u32,
    /// JPEG quality factor, 1-100
    pub jpeg_quality: u8,
}

impl ImageProfile {
    /// Food entry photos
    pub const FOOD: Self = Self {
        max_dimension: images::FOOD_MAX_DIMENSION,
        jpeg_quality: images::FOOD_JPEG_QUALITY,
    };

    /// Profile photos
    pub const PROFILE: Self = Self {
        max_dimension: images::PROFILE_MAX_DIMENSION,
        jpeg_quality: images::PROFILE_JPEG_QUALITY,
    };

    /// Profile with the dimension raised to at least 1 and quality clamped to 1-100
    #[must_use]
    pub fn new(max_dimension: u32, jpeg_quality: u8) -> Self {
        Self {
            max_dimension: max_dimension.max(1),
            jpeg_quality: jpeg_quality.clamp(1, 100),
        }
    }
}

/// Image ready for upload: the resized bitmap and its JPEG encoding
#[derive(Debug, Clone)]
pub struct PreparedImage {
    /// Resized image, suitable for caching and display
    pub image: DynamicImage,
    /// JPEG bytes of `image`
    pub jpeg: Vec<u8>,
}

/// Decode encoded image bytes (JPEG, PNG, `WebP`)
///
/// # Errors
///
/// Returns the decoder error if the bytes are not a supported image
pub fn decode_image(bytes: &[u8]) -> ImageResult<DynamicImage> {
    image::load_from_memory(bytes)
}

/// Target size when `width x height` must shrink to fit `max_dimension`
///
/// Returns `None` when the image already fits, so callers never upscale.
#[must_use]
pub fn scaled_dimensions(width: u32, height: u32, max_dimension: u32) -> Option<(u32, u32)> {
    if width <= max_dimension && height <= max_dimension {
        return None;
    }

    // Integer math: the longer edge lands exactly on the bound, the other is floored
    let (w, h, bound) = (u64::from(width), u64::from(height), u64::from(max_dimension));
    let (new_width, new_height) = if w >= h {
        (bound, h * bound / w)
    } else {
        (w * bound / h, bound)
    };
    Some(((new_width as u32).max(1), (new_height as u32).max(1)))
}

/// Shrink `image` so neither edge exceeds `max_dimension`, preserving aspect ratio
///
/// Images that already fit are returned untouched.
#[must_use]
pub fn resize_to_bound(image: DynamicImage, max_dimension: u32) -> DynamicImage {
    let (width, height) = image.dimensions();
    match scaled_dimensions(width, height, max_dimension) {
        Some((new_width, new_height)) => image.resize_exact(new_width, new_height, FilterType::Triangle),
        None => image,
    }
}

/// Encode as baseline JPEG at the given quality
///
/// # Errors
///
/// Returns `FoodError::Decode` if the encoder fails
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> FoodResult<Vec<u8>> {
    // JPEG has no alpha channel; flatten to RGB first
    let rgb = image.to_rgb8();
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, quality.clamp(1, 100))
        .encode_image(&rgb)
        .map_err(|e| FoodError::decode(format!("JPEG encoding failed: {e}")))?;
    Ok(jpeg)
}

/// Resize to the profile bound and compress at the profile quality
///
/// # Errors
///
/// Returns `FoodError::Decode` if JPEG encoding fails
pub fn prepare_upload(image: DynamicImage, profile: ImageProfile) -> FoodResult<PreparedImage> {
    let image = resize_to_bound(image, profile.max_dimension);
    let jpeg = encode_jpeg(&image, profile.jpeg_quality)?;
    Ok(PreparedImage { image, jpeg })
}

/// [`decode_image`] on the blocking pool
///
/// # Errors
///
/// Returns `FoodError::Decode` if the bytes are not an image or the task fails
pub async fn decode_image_async(bytes: Bytes) -> FoodResult<DynamicImage> {
    tokio::task::spawn_blocking(move || decode_image(&bytes))
        .await
        .map_err(|e| FoodError::decode(format!("image decoding task failed: {e}")))?
        .map_err(|e| FoodError::decode(format!("image could not be decoded: {e}")))
}

/// [`prepare_upload`] on the blocking pool
///
/// # Errors
///
/// Returns `FoodError::Decode` if encoding or the task fails
pub async fn prepare_upload_async(image: DynamicImage, profile: ImageProfile) -> FoodResult<PreparedImage> {
    tokio::task::spawn_blocking(move || prepare_upload(image, profile))
        .await
        .map_err(|e| FoodError::decode(format!("image preparation task failed: {e}")))?
}
