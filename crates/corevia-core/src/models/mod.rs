// ABOUTME: Core data models for food photo analysis
// ABOUTME: Re-exports the canonical analysis result and meal classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `AnalysisResult`: the single shape every recognition tier converges to
//! - `DetectedFood`: one recognized item, created fresh on every analysis
//! - `MealType`: meal slot for a confirmed food log entry

mod analysis;
mod nutrition;

pub use analysis::{AnalysisResult, DetectedFood};
pub use nutrition::MealType;
