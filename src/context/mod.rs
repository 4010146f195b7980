// ABOUTME: Explicit wiring of the shared HTTP client, image cache and food photo services
// ABOUTME: The cache is constructed once here and shared by analysis and display paths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Service context
//!
//! [`FoodServices`] owns one HTTP client and one [`ImageCache`] and hands them
//! to every component that needs them, instead of relying on globals.

use crate::analysis::{AnalysisCoordinator, FoodClassifier, RemoteAnalysisClient};
use crate::config::ClientConfig;
use crate::errors::FoodResult;
use crate::http::build_http_client;
use crate::images::{FoodImageManager, ImageCache, ProfileImageManager};
use std::sync::Arc;
use tracing::info;

/// Food photo services sharing one HTTP client and one image cache
#[derive(Clone)]
pub struct FoodServices {
    config: Arc<ClientConfig>,
    cache: ImageCache,
    analysis: AnalysisCoordinator,
    food_images: FoodImageManager,
    profile_images: ProfileImageManager,
}

impl FoodServices {
    /// Build every service from configuration and an on-device classifier
    ///
    /// # Errors
    ///
    /// Returns `FoodError::Config` if the HTTP client cannot be built
    pub fn new(config: ClientConfig, classifier: Arc<dyn FoodClassifier>) -> FoodResult<Self> {
        Self::with_cache(config, classifier, ImageCache::new())
    }

    /// Like [`FoodServices::new`], sharing an existing cache
    ///
    /// # Errors
    ///
    /// Returns `FoodError::Config` if the HTTP client cannot be built
    pub fn with_cache(
        config: ClientConfig,
        classifier: Arc<dyn FoodClassifier>,
        cache: ImageCache,
    ) -> FoodResult<Self> {
        let http = build_http_client(&config)?;

        let remote = RemoteAnalysisClient::new(http.clone(), &config.base_url);
        let analysis = AnalysisCoordinator::new(classifier, remote);
        let food_images =
            FoodImageManager::new(http.clone(), &config.base_url, cache.clone(), config.food_image);
        let profile_images = ProfileImageManager::new(http, &config.base_url, config.profile_image);

        info!(base_url = %config.base_url, "Food services initialized");
        Ok(Self {
            config: Arc::new(config),
            cache,
            analysis,
            food_images,
            profile_images,
        })
    }

    /// Configuration the services were built from
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Shared image cache
    #[must_use]
    pub const fn cache(&self) -> &ImageCache {
        &self.cache
    }

    /// Two-tier analysis coordinator
    #[must_use]
    pub const fn analysis(&self) -> &AnalysisCoordinator {
        &self.analysis
    }

    /// Food entry image manager
    #[must_use]
    pub const fn food_images(&self) -> &FoodImageManager {
        &self.food_images
    }

    /// Profile image manager
    #[must_use]
    pub const fn profile_images(&self) -> &ProfileImageManager {
        &self.profile_images
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::UnavailableClassifier;
    use image::{DynamicImage, RgbImage};

    #[test]
    fn test_cache_is_shared_with_food_images() {
        let services =
            FoodServices::new(ClientConfig::new("http://localhost:9"), Arc::new(UnavailableClassifier)).unwrap();
        services
            .cache()
            .insert("e1", Arc::new(DynamicImage::ImageRgb8(RgbImage::new(2, 2))));

        assert!(services.food_images().load_image("e1").is_some());
        services.food_images().clear_cache();
        assert!(services.cache().is_empty());
    }
}
