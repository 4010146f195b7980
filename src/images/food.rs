// ABOUTME: Food entry photo manager: resize, compress, cache and upload per entry id
// ABOUTME: Cache writes precede network completion; URL loads are served cache-first
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::cache::ImageCache;
use super::transfer::{download_image, upload_jpeg};
use crate::constants::{endpoints, images};
use crate::errors::{FoodError, FoodResult};
use crate::http::endpoint;
use crate::imaging::{prepare_upload_async, ImageProfile};
use image::DynamicImage;
use std::sync::Arc;
use tracing::{debug, info};

/// Uploads, downloads and caches the photos attached to food log entries
///
/// Entry ids are opaque: a locally generated pending id and a server-assigned
/// id are both valid keys.
#[derive(Clone)]
pub struct FoodImageManager {
    http: reqwest::Client,
    base_url: String,
    cache: ImageCache,
    profile: ImageProfile,
}

impl FoodImageManager {
    /// Create a manager over a shared HTTP client and cache
    #[must_use]
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        cache: ImageCache,
        profile: ImageProfile,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            cache,
            profile,
        }
    }

    /// The cache this manager reads and writes
    #[must_use]
    pub const fn cache(&self) -> &ImageCache {
        &self.cache
    }

    /// Resize, compress, cache and upload the photo for `entry_id`
    ///
    /// The resized image is cached before the upload starts, so
    /// [`FoodImageManager::load_image`] sees it while the request is in flight
    /// (and keeps it if the upload fails). Concurrent saves for the same id are
    /// not serialized; the last cache write wins.
    ///
    /// # Errors
    ///
    /// - `FoodError::InvalidInput` for a blank entry id or one containing `/`
    /// - `FoodError::Remote` for a non-2xx response
    /// - `FoodError::Transfer` for transport failures
    pub async fn save_image(&self, image: DynamicImage, entry_id: &str) -> FoodResult<String> {
        let entry_id = validate_entry_id(entry_id)?;
        let prepared = prepare_upload_async(image, self.profile).await?;

        self.cache.insert(entry_id, Arc::new(prepared.image));
        debug!(entry_id, jpeg_bytes = prepared.jpeg.len(), "Cached resized food image");

        let url = endpoint(&self.base_url, &endpoints::food_entry_image(entry_id));
        let reference = upload_jpeg(&self.http, &url, prepared.jpeg, images::food_file_name(entry_id)).await?;
        info!(entry_id, "Food image uploaded");
        Ok(reference)
    }

    /// Cached image for `entry_id`; never touches the network
    #[must_use]
    pub fn load_image(&self, entry_id: &str) -> Option<Arc<DynamicImage>> {
        self.cache.get(entry_id)
    }

    /// Cached image for `entry_id`, or download `url` and cache the result
    ///
    /// Relative URLs are resolved against the configured backend.
    ///
    /// # Errors
    ///
    /// - `FoodError::Remote` for a non-2xx response
    /// - `FoodError::Decode` when the body is not an image
    /// - `FoodError::Transfer` for transport failures
    /// - `FoodError::InvalidInput` for an unusable URL
    pub async fn load_image_from_url(&self, url: &str, entry_id: &str) -> FoodResult<Arc<DynamicImage>> {
        if let Some(cached) = self.cache.get(entry_id) {
            return Ok(cached);
        }

        let image = Arc::new(download_image(&self.http, &self.base_url, url).await?);
        self.cache.insert(entry_id, Arc::clone(&image));
        Ok(image)
    }

    /// Forget the cached image for `entry_id`; the server copy is untouched
    pub fn delete_image(&self, entry_id: &str) {
        self.cache.remove(entry_id);
    }

    /// Forget every cached image (e.g. on logout)
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

/// Rejects unusable ids; accepted ids are used verbatim as cache key and path segment
fn validate_entry_id(entry_id: &str) -> FoodResult<&str> {
    if entry_id.trim().is_empty() {
        return Err(FoodError::invalid_input("entry id must not be empty"));
    }
    if entry_id.contains('/') {
        return Err(FoodError::invalid_input(format!(
            "entry id '{entry_id}' must not contain '/'"
        )));
    }
    Ok(entry_id)
}
