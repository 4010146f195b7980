// ABOUTME: Error handling entry point for the application crate
// ABOUTME: Re-exports the unified FoodError taxonomy defined in corevia-core
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! Every public operation returns [`FoodResult`]. No panic or raw transport
//! error crosses the crate boundary; callers display
//! [`FoodError`]'s message and optional [`FoodError::http_status`] directly.

pub use corevia_core::errors::{ClassifierError, ErrorCode, FoodError, FoodResult};
