// ABOUTME: Main library entry point for the CoreVia food photo analysis client
// ABOUTME: On-device first calorie recognition with remote fallback, plus photo upload and caching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # `CoreVia` Food
//!
//! Client-side food photo pipeline for the `CoreVia` fitness app.
//!
//! ## Features
//!
//! - **Two-tier recognition**: on-device classification first, remote analysis
//!   only when the local tier fails, never both at once
//! - **One canonical result**: both backend response shapes are normalized into
//!   [`AnalysisResult`], whose totals always equal the sum of its foods
//! - **Image transfer cache**: photos are resized, compressed, cached and
//!   uploaded per food log entry; later reads are served from the cache first
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use corevia_food::config::ClientConfig;
//! use corevia_food::context::FoodServices;
//! use corevia_food::analysis::UnavailableClassifier;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::from_env();
//! let services = FoodServices::new(config, Arc::new(UnavailableClassifier))?;
//!
//! let photo = std::fs::read("lunch.jpg")?;
//! let result = services.analysis().analyze(photo).await?;
//! println!("{} kcal", result.total_calories());
//! # Ok(())
//! # }
//! ```

/// Two-tier food recognition: classifier seam, remote client, response normalization
pub mod analysis;

/// Environment-based client configuration
pub mod config;

/// Wiring of the shared HTTP client, image cache, coordinator and image managers
pub mod context;

/// Error taxonomy (re-exported from `corevia-core`)
pub mod errors;

/// Shared HTTP client construction, multipart forms and URL resolution
pub mod http;

/// Decode, resize and JPEG-compress images
pub mod imaging;

/// Image cache plus food entry and profile image transfer managers
pub mod images;

/// Tracing subscriber setup
pub mod logging;

pub use corevia_core::constants;
pub use corevia_core::models::{AnalysisResult, DetectedFood, MealType};
