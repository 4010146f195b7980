// ABOUTME: Unified error taxonomy for food analysis and image transfer
// ABOUTME: FoodError crosses every public boundary; ClassifierError stays local to the on-device tier
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Error Types
//!
//! Every public operation of the client returns `Result<T, FoodError>`. The
//! variants carry a human-readable message and, where one exists, the HTTP
//! status that produced them, so callers can show the message directly.
//!
//! `ClassifierError` belongs to the on-device tier. The two-tier analysis path
//! recovers from it internally; only the offline entry point surfaces it.

mod classifier;

pub use classifier::ClassifierError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable error codes reported alongside user-facing messages
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Caller supplied an unusable argument (bad URL, empty entry id)
    InvalidInput,
    /// Backend answered with a non-success HTTP status
    ExternalServiceError,
    /// Backend could not be reached (connectivity, timeout)
    ExternalServiceUnavailable,
    /// Response body or image bytes could not be decoded
    SerializationError,
    /// Client configuration is invalid
    ConfigError,
    /// On-device classification failed
    ClassifierError,
}

impl ErrorCode {
    /// Get a user-friendly description of this error code
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::ExternalServiceError => "The server rejected the request",
            Self::ExternalServiceUnavailable => "The server could not be reached",
            Self::SerializationError => "The server response could not be processed",
            Self::ConfigError => "Client configuration is invalid",
            Self::ClassifierError => "On-device food recognition failed",
        }
    }
}

/// Failure of any analysis or image transfer operation
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum FoodError {
    /// On-device classification failed and no remote tier was allowed
    #[error("Offline analysis failed: {0}")]
    Classifier(#[from] ClassifierError),

    /// Backend answered with a non-2xx status
    #[error("{message} (HTTP {status})")]
    Remote {
        /// HTTP status code returned by the backend
        status: u16,
        /// What the client was trying to do
        message: String,
    },

    /// Response matched no known schema, or bytes were not a decodable image
    #[error("Response could not be decoded: {message}")]
    Decode {
        /// Decoder diagnostic
        message: String,
    },

    /// Network-level failure during upload or download
    #[error("Network error: {message}")]
    Transfer {
        /// Transport diagnostic
        message: String,
        /// Status code when the transport layer saw one
        status: Option<u16>,
    },

    /// Caller supplied an unusable argument
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// What was wrong with the input
        message: String,
    },

    /// Client configuration is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong with the configuration
        message: String,
    },
}

impl FoodError {
    /// Non-2xx response from the backend
    #[must_use]
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    /// Body or image bytes could not be decoded
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Transport failure without an HTTP status
    #[must_use]
    pub fn transfer(message: impl Into<String>) -> Self {
        Self::Transfer {
            message: message.into(),
            status: None,
        }
    }

    /// Invalid caller input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Invalid configuration
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// HTTP status associated with this failure, if any
    #[must_use]
    pub const fn http_status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            Self::Transfer { status, .. } => *status,
            Self::Classifier(_)
            | Self::Decode { .. }
            | Self::InvalidInput { .. }
            | Self::Config { .. } => None,
        }
    }

    /// Stable code for this failure
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Classifier(_) => ErrorCode::ClassifierError,
            Self::Remote { .. } => ErrorCode::ExternalServiceError,
            Self::Decode { .. } => ErrorCode::SerializationError,
            Self::Transfer { .. } => ErrorCode::ExternalServiceUnavailable,
            Self::InvalidInput { .. } => ErrorCode::InvalidInput,
            Self::Config { .. } => ErrorCode::ConfigError,
        }
    }
}

#[cfg(feature = "http-errors")]
impl From<reqwest::Error> for FoodError {
    fn from(error: reqwest::Error) -> Self {
        let status = error.status().map(|s| s.as_u16());
        let message = if error.is_timeout() {
            format!("request timed out: {error}")
        } else if error.is_connect() {
            format!("could not connect: {error}")
        } else {
            error.to_string()
        };
        Self::Transfer { message, status }
    }
}

/// Result alias used across the client
pub type FoodResult<T> = Result<T, FoodError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_exposes_status() {
        let error = FoodError::remote(500, "Analysis failed");
        assert_eq!(error.http_status(), Some(500));
        assert_eq!(error.code(), ErrorCode::ExternalServiceError);
        assert_eq!(error.to_string(), "Analysis failed (HTTP 500)");
    }

    #[test]
    fn test_transfer_error_has_no_status_by_default() {
        let error = FoodError::transfer("connection reset");
        assert_eq!(error.http_status(), None);
        assert_eq!(error.code(), ErrorCode::ExternalServiceUnavailable);
    }

    #[test]
    fn test_classifier_error_converts() {
        let error: FoodError = ClassifierError::NoFoodDetected.into();
        assert_eq!(error.code(), ErrorCode::ClassifierError);
        assert!(error.to_string().contains("No food"));
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::SerializationError).unwrap();
        assert_eq!(json, "\"SERIALIZATION_ERROR\"");
    }
}
