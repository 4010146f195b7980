// ABOUTME: Two-tier food photo analysis: on-device classifier first, remote service second
// ABOUTME: On-device failures are recovered by the remote tier and never reach the caller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::classifier::{run_on_device, FoodClassifier, OnDeviceOutcome};
use super::remote::RemoteAnalysisClient;
use crate::errors::{ClassifierError, FoodResult};
use crate::imaging::decode_image_async;
use crate::AnalysisResult;
use bytes::Bytes;
use image::DynamicImage;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Runs the on-device then remote recognition strategy
///
/// The tiers run strictly in order, never concurrently: the remote request is
/// only issued once the on-device tier has reported a failure.
#[derive(Clone)]
pub struct AnalysisCoordinator {
    classifier: Arc<dyn FoodClassifier>,
    remote: RemoteAnalysisClient,
}

impl AnalysisCoordinator {
    /// Create a coordinator over a classifier and a remote client
    #[must_use]
    pub fn new(classifier: Arc<dyn FoodClassifier>, remote: RemoteAnalysisClient) -> Self {
        Self { classifier, remote }
    }

    /// Analyze raw photo bytes
    ///
    /// The bytes are decoded and handed to the on-device classifier. If
    /// decoding or classification fails, the original bytes are uploaded to
    /// the remote service instead.
    ///
    /// # Errors
    ///
    /// Only remote-tier failures are returned:
    /// - `FoodError::Remote` for a non-2xx response
    /// - `FoodError::Decode` when the response matches neither schema
    /// - `FoodError::Transfer` for transport failures
    #[instrument(skip_all, fields(bytes = photo.as_ref().len(), classifier = self.classifier.name()))]
    pub async fn analyze(&self, photo: impl AsRef<[u8]>) -> FoodResult<AnalysisResult> {
        let photo = Bytes::copy_from_slice(photo.as_ref());
        let decoded = decode_image_async(photo.clone()).await.map_err(|e| {
            ClassifierError::UndecodableImage {
                reason: e.to_string(),
            }
        });

        let outcome = run_on_device(
            self.classifier.as_ref(),
            decoded.as_ref().map_err(ClassifierError::clone),
        )
        .await;
        // The decoded bitmap is only needed by the on-device tier
        drop(decoded);

        match outcome {
            OnDeviceOutcome::Detected(result) => {
                info!(
                    foods = result.foods().len(),
                    total_calories = result.total_calories(),
                    "On-device analysis succeeded"
                );
                Ok(result)
            }
            OnDeviceOutcome::Undecodable(reason) | OnDeviceOutcome::Failed(reason) => {
                warn!(%reason, "On-device analysis failed, falling back to remote analysis");
                let result = self.remote.analyze(photo).await?;
                info!(
                    foods = result.foods().len(),
                    total_calories = result.total_calories(),
                    "Remote analysis succeeded"
                );
                Ok(result)
            }
        }
    }

    /// Analyze a decoded photo with the on-device classifier only
    ///
    /// Never performs network I/O.
    ///
    /// # Errors
    ///
    /// Returns `FoodError::Classifier` when the classifier fails
    #[instrument(skip_all, fields(classifier = self.classifier.name()))]
    pub async fn analyze_offline(&self, image: &DynamicImage) -> FoodResult<AnalysisResult> {
        let result = run_on_device(self.classifier.as_ref(), Ok(image))
            .await
            .into_result()
            .inspect_err(|reason| warn!(%reason, "Offline analysis failed"))?;
        info!(foods = result.foods().len(), "Offline analysis succeeded");
        Ok(result)
    }
}
