// ABOUTME: On-device food classifier seam and its explicit outcome type
// ABOUTME: The coordinator branches on OnDeviceOutcome instead of catching failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::ClassifierError;
use crate::AnalysisResult;
use async_trait::async_trait;
use image::DynamicImage;

/// Local (non-network) food recognition capability
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; one instance is shared by every
/// analysis call.
#[async_trait]
pub trait FoodClassifier: Send + Sync {
    /// Short identifier used in logs (e.g. "labeler", "unavailable")
    fn name(&self) -> &'static str;

    /// Recognize foods in a decoded photo
    ///
    /// # Errors
    ///
    /// Returns `ClassifierError` when no result can be produced locally
    async fn classify(&self, image: &DynamicImage) -> Result<AnalysisResult, ClassifierError>;
}

/// Classifier for hosts without an on-device model
///
/// Always reports [`ClassifierError::Unavailable`], so two-tier analysis goes
/// straight to the remote service.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableClassifier;

#[async_trait]
impl FoodClassifier for UnavailableClassifier {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    async fn classify(&self, _image: &DynamicImage) -> Result<AnalysisResult, ClassifierError> {
        Err(ClassifierError::Unavailable)
    }
}

/// Result of the on-device tier
#[derive(Debug)]
pub enum OnDeviceOutcome {
    /// The classifier produced a result
    Detected(AnalysisResult),
    /// The photo bytes were not a decodable image; the classifier never ran
    Undecodable(ClassifierError),
    /// The classifier ran and failed
    Failed(ClassifierError),
}

impl OnDeviceOutcome {
    /// Failure reason, if the tier did not produce a result
    #[must_use]
    pub const fn error(&self) -> Option<&ClassifierError> {
        match self {
            Self::Detected(_) => None,
            Self::Undecodable(e) | Self::Failed(e) => Some(e),
        }
    }

    /// Convert into a plain `Result`
    ///
    /// # Errors
    ///
    /// Returns the classifier error for the undecodable and failed outcomes
    pub fn into_result(self) -> Result<AnalysisResult, ClassifierError> {
        match self {
            Self::Detected(result) => Ok(result),
            Self::Undecodable(e) | Self::Failed(e) => Err(e),
        }
    }
}

/// Run `classifier` against an optional decoded image
///
/// `decoded` carries the decoder outcome so undecodable photos are reported
/// without invoking the classifier.
pub async fn run_on_device(
    classifier: &dyn FoodClassifier,
    decoded: Result<&DynamicImage, ClassifierError>,
) -> OnDeviceOutcome {
    let image = match decoded {
        Ok(image) => image,
        Err(e) => return OnDeviceOutcome::Undecodable(e),
    };

    match classifier.classify(image).await {
        Ok(result) => OnDeviceOutcome::Detected(result),
        Err(e) => OnDeviceOutcome::Failed(e),
    }
}
