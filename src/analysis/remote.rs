// ABOUTME: HTTP client for the remote food photo analysis endpoint
// ABOUTME: Uploads the original photo bytes as multipart and decodes either response shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::schema::RemotePayload;
use crate::constants::{analysis, endpoints};
use crate::errors::{FoodError, FoodResult};
use crate::http::{endpoint, jpeg_form};
use crate::AnalysisResult;
use bytes::Bytes;
use tracing::{debug, warn};

/// Client for `POST /api/v1/food/analyze`
#[derive(Clone)]
pub struct RemoteAnalysisClient {
    http: reqwest::Client,
    analyze_url: String,
}

impl RemoteAnalysisClient {
    /// Create a client against `base_url`
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            analyze_url: endpoint(base_url, endpoints::FOOD_ANALYZE),
        }
    }

    /// Full URL of the analysis endpoint
    #[must_use]
    pub fn analyze_url(&self) -> &str {
        &self.analyze_url
    }

    /// Upload `photo` unchanged and decode the analysis
    ///
    /// # Errors
    ///
    /// - `FoodError::Remote` for a non-2xx response
    /// - `FoodError::Decode` when the body matches neither response shape
    /// - `FoodError::Transfer` for transport failures
    pub async fn analyze(&self, photo: Bytes) -> FoodResult<AnalysisResult> {
        let size = photo.len();
        let form = jpeg_form(photo.to_vec(), analysis::ANALYSIS_FILE_NAME)?;

        debug!(url = %self.analyze_url, bytes = size, "Submitting photo for remote analysis");
        let response = self.http.post(&self.analyze_url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Remote food analysis rejected");
            return Err(FoodError::remote(status.as_u16(), "Food analysis failed"));
        }

        let body = response.bytes().await?;
        let payload = RemotePayload::parse(&body)?;
        debug!(
            canonical = matches!(payload, RemotePayload::Canonical(_)),
            "Decoded remote analysis response"
        );
        Ok(payload.normalize())
    }
}
