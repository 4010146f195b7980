// ABOUTME: Profile photo upload, download and removal against the uploads API
// ABOUTME: Smaller bound and higher quality than food photos; nothing is cached
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::transfer::{download_image, upload_jpeg};
use crate::constants::{endpoints, images};
use crate::errors::{FoodError, FoodResult};
use crate::http::endpoint;
use crate::imaging::{prepare_upload_async, ImageProfile};
use image::DynamicImage;
use tracing::{info, warn};

/// Manages the signed-in user's profile photo
#[derive(Clone)]
pub struct ProfileImageManager {
    http: reqwest::Client,
    base_url: String,
    profile: ImageProfile,
}

impl ProfileImageManager {
    /// Create a manager over a shared HTTP client
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, profile: ImageProfile) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            profile,
        }
    }

    /// Resize, compress and upload a new profile photo
    ///
    /// Returns the server's response body (normally the stored image URL).
    ///
    /// # Errors
    ///
    /// - `FoodError::Remote` for a non-2xx response
    /// - `FoodError::Transfer` for transport failures
    pub async fn upload(&self, image: DynamicImage) -> FoodResult<String> {
        let prepared = prepare_upload_async(image, self.profile).await?;
        let url = endpoint(&self.base_url, endpoints::PROFILE_IMAGE);
        let reference = upload_jpeg(
            &self.http,
            &url,
            prepared.jpeg,
            images::PROFILE_FILE_NAME.to_owned(),
        )
        .await?;
        info!("Profile image uploaded");
        Ok(reference)
    }

    /// Download a profile photo by absolute or backend-relative URL
    ///
    /// # Errors
    ///
    /// - `FoodError::Remote` for a non-2xx response
    /// - `FoodError::Decode` when the body is not an image
    /// - `FoodError::Transfer` for transport failures
    pub async fn download(&self, url: &str) -> FoodResult<DynamicImage> {
        download_image(&self.http, &self.base_url, url).await
    }

    /// Remove the profile photo on the server
    ///
    /// # Errors
    ///
    /// - `FoodError::Remote` for a non-2xx response
    /// - `FoodError::Transfer` for transport failures
    pub async fn delete(&self) -> FoodResult<()> {
        let url = endpoint(&self.base_url, endpoints::PROFILE_IMAGE);
        let response = self.http.delete(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Profile image deletion rejected");
            return Err(FoodError::remote(status.as_u16(), "Profile image deletion failed"));
        }

        info!("Profile image deleted");
        Ok(())
    }
}
