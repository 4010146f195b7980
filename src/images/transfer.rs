// ABOUTME: Upload and download primitives shared by the food and profile image managers
// ABOUTME: Maps HTTP status and transport failures into FoodError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{FoodError, FoodResult};
use crate::http::{jpeg_form, resolve_url};
use crate::imaging::decode_image_async;
use image::DynamicImage;
use tracing::{debug, warn};

/// POST `jpeg` as multipart `file` to `url`, returning the response body as-is
pub(super) async fn upload_jpeg(
    http: &reqwest::Client,
    url: &str,
    jpeg: Vec<u8>,
    file_name: String,
) -> FoodResult<String> {
    let size = jpeg.len();
    let form = jpeg_form(jpeg, file_name)?;
    let response = http.post(url).multipart(form).send().await?;

    let status = response.status();
    if !status.is_success() {
        warn!(url, status = status.as_u16(), "Image upload rejected");
        return Err(FoodError::remote(status.as_u16(), "Image upload failed"));
    }

    let body = response.text().await?;
    debug!(url, bytes = size, "Image uploaded");
    Ok(body)
}

/// GET an absolute or backend-relative image URL and decode the body
pub(super) async fn download_image(
    http: &reqwest::Client,
    base_url: &str,
    url: &str,
) -> FoodResult<DynamicImage> {
    let url = resolve_url(base_url, url)?;
    let response = http.get(url.clone()).send().await?;

    let status = response.status();
    if !status.is_success() {
        warn!(url = %url, status = status.as_u16(), "Image download rejected");
        return Err(FoodError::remote(status.as_u16(), "Image download failed"));
    }

    let bytes = response.bytes().await?;
    debug!(url = %url, bytes = bytes.len(), "Image downloaded");
    decode_image_async(bytes).await
}
