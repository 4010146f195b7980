// ABOUTME: Configuration management module for the food analysis client
// ABOUTME: Environment-only configuration; no config files are read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! - **Environment**: backend URL, timeouts, auth token and image profiles from
//!   environment variables, with logged fallbacks for invalid values

/// Environment-based client configuration
pub mod environment;

pub use environment::ClientConfig;
