// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Endpoints, normalization defaults, image profiles and environment variable names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by domain rather than kept in a single flat file.

/// Image transfer bounds and JPEG quality factors
pub mod images;

/// Backend API paths
pub mod endpoints {
    /// Remote food photo analysis (multipart POST)
    pub const FOOD_ANALYZE: &str = "/api/v1/food/analyze";
    /// Per-entry food image upload prefix, followed by `/{entry_id}/image`
    pub const FOOD_PREFIX: &str = "/api/v1/food";
    /// Profile image upload (POST) and removal (DELETE)
    pub const PROFILE_IMAGE: &str = "/api/v1/uploads/profile-image";

    /// Upload path for a logged food entry's photo
    #[must_use]
    pub fn food_entry_image(entry_id: &str) -> String {
        format!("{FOOD_PREFIX}/{entry_id}/image")
    }
}

/// Defaults applied when a source payload omits a field
pub mod analysis {
    /// Portion weight assumed when the backend sends no portion data
    pub const DEFAULT_PORTION_GRAMS: f64 = 200.0;
    /// Confidence assumed when the source provides none
    pub const DEFAULT_CONFIDENCE: f64 = 0.5;
    /// Name given to foods the backend did not name
    pub const PLACEHOLDER_FOOD_NAME: &str = "Food";
    /// Multipart field carrying the photo
    pub const UPLOAD_FIELD_NAME: &str = "file";
    /// File name sent with the analysis upload
    pub const ANALYSIS_FILE_NAME: &str = "food_photo.jpg";
    /// Content type of every photo upload
    pub const JPEG_MIME_TYPE: &str = "image/jpeg";
}

/// Network defaults
pub mod defaults {
    /// Backend base URL used when none is configured
    pub const BASE_URL: &str = "http://localhost:8000";
    /// HTTP request timeout in seconds
    pub const HTTP_TIMEOUT_SECS: u64 = 30;
}

/// Environment variable names read by `ClientConfig::from_env`
pub mod env_config {
    /// Backend base URL
    pub const BASE_URL: &str = "COREVIA_BASE_URL";
    /// Request timeout in seconds (`0` disables the timeout)
    pub const HTTP_TIMEOUT_SECS: &str = "COREVIA_HTTP_TIMEOUT_SECS";
    /// Bearer token attached to every request
    pub const AUTH_TOKEN: &str = "COREVIA_AUTH_TOKEN";
    /// Food photo bound in pixels
    pub const FOOD_IMAGE_MAX_DIMENSION: &str = "COREVIA_FOOD_IMAGE_MAX_DIMENSION";
    /// Food photo JPEG quality
    pub const FOOD_IMAGE_QUALITY: &str = "COREVIA_FOOD_IMAGE_QUALITY";
    /// Profile photo bound in pixels
    pub const PROFILE_IMAGE_MAX_DIMENSION: &str = "COREVIA_PROFILE_IMAGE_MAX_DIMENSION";
    /// Profile photo JPEG quality
    pub const PROFILE_IMAGE_QUALITY: &str = "COREVIA_PROFILE_IMAGE_QUALITY";
}

/// Service identity used in logs and the HTTP user agent
pub mod service_names {
    /// Service name
    pub const COREVIA_FOOD: &str = "corevia-food";
}
