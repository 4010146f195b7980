// ABOUTME: Core types and constants for the CoreVia food photo analysis client
// ABOUTME: Foundation crate with the canonical analysis result, error taxonomy, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # `CoreVia` Core
//!
//! Foundation crate shared by the analysis coordinator and the image transfer
//! layer. It changes rarely, so the application crate can rebuild on its own.
//!
//! ## Modules
//!
//! - **errors**: `FoodError`, `ClassifierError` and stable `ErrorCode`s
//! - **models**: the canonical `AnalysisResult` / `DetectedFood` shape and `MealType`
//! - **constants**: endpoints, normalization defaults, image profiles, env var names

/// Unified error taxonomy for analysis and image transfer operations
pub mod errors;

/// Canonical analysis result and food log models
pub mod models;

/// Endpoints, defaults and environment variable names
pub mod constants;
