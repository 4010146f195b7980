// ABOUTME: Environment configuration for backend location, timeouts and image profiles
// ABOUTME: Parses environment variables with logged fallbacks to built-in defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration for the food analysis client

use crate::constants::{defaults, env_config};
use crate::imaging::ImageProfile;
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Client configuration shared by the coordinator and both image managers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL without trailing slash
    pub base_url: String,
    /// Request timeout enforced by the HTTP client (`None` disables it)
    pub http_timeout: Option<Duration>,
    /// Bearer token attached to every request
    pub auth_token: Option<String>,
    /// Resize/compress parameters for food entry photos
    pub food_image: ImageProfile,
    /// Resize/compress parameters for profile photos
    pub profile_image: ImageProfile,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(defaults::BASE_URL)
    }
}

impl ClientConfig {
    /// Default configuration pointed at `base_url`
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            http_timeout: Some(Duration::from_secs(defaults::HTTP_TIMEOUT_SECS)),
            auth_token: None,
            food_image: ImageProfile::FOOD,
            profile_image: ImageProfile::PROFILE,
        }
    }

    /// Load configuration from environment variables
    ///
    /// Invalid values are logged and replaced by defaults rather than failing.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env::var(env_config::BASE_URL)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| defaults::BASE_URL.to_owned());

        let timeout_secs: u64 = parse_env_or(env_config::HTTP_TIMEOUT_SECS, defaults::HTTP_TIMEOUT_SECS);

        let food_image = ImageProfile::new(
            parse_env_or(env_config::FOOD_IMAGE_MAX_DIMENSION, ImageProfile::FOOD.max_dimension),
            parse_quality(env_config::FOOD_IMAGE_QUALITY, ImageProfile::FOOD.jpeg_quality),
        );
        let profile_image = ImageProfile::new(
            parse_env_or(
                env_config::PROFILE_IMAGE_MAX_DIMENSION,
                ImageProfile::PROFILE.max_dimension,
            ),
            parse_quality(env_config::PROFILE_IMAGE_QUALITY, ImageProfile::PROFILE.jpeg_quality),
        );

        let config = Self {
            base_url: normalize_base_url(&base_url),
            http_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
            auth_token: env::var(env_config::AUTH_TOKEN)
                .ok()
                .filter(|token| !token.trim().is_empty()),
            food_image,
            profile_image,
        };

        info!(
            base_url = %config.base_url,
            timeout_secs,
            food_max_dimension = config.food_image.max_dimension,
            profile_max_dimension = config.profile_image.max_dimension,
            "Loaded food client configuration"
        );

        config
    }

    /// Override the request timeout
    #[must_use]
    pub const fn with_http_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.http_timeout = timeout;
        self
    }

    /// Attach a bearer token
    #[must_use]
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_owned()
}

fn parse_env_or<T>(name: &str, default: T) -> T
where
    T: FromStr + Display + Copy,
    T::Err: Display,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid value '{raw}' for {name} ({e}), using default {default}");
            default
        }),
        Err(_) => default,
    }
}

/// JPEG quality from the environment, clamped to 1-100; non-numeric values use the default
fn parse_quality(name: &str, default: u8) -> u8 {
    let quality: u32 = parse_env_or(name, u32::from(default));
    quality.clamp(1, 100) as u8
}
