// ABOUTME: Error type for the on-device food classification tier
// ABOUTME: Recovered locally by the two-tier coordinator, surfaced only in offline mode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Reasons the on-device classifier could not produce a result
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifierError {
    /// No on-device model is available on this host
    #[error("On-device classifier is not available")]
    Unavailable,

    /// The model ran but nothing in the photo looked like food
    #[error("No food detected in the photo")]
    NoFoodDetected,

    /// The photo bytes could not be decoded into an image
    #[error("Photo could not be decoded: {reason}")]
    UndecodableImage {
        /// Decoder diagnostic
        reason: String,
    },

    /// The model raised an error
    #[error("Classification failed: {reason}")]
    Failed {
        /// Underlying failure
        reason: String,
    },
}

impl ClassifierError {
    /// Model failure with a reason
    #[must_use]
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }
}
