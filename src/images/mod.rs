// ABOUTME: Food and profile photo management with a shared in-memory cache
// ABOUTME: Resizes and compresses before upload, resolves downloads cache-first
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Image transfer
//!
//! [`FoodImageManager`] keys images by food log entry id and writes the
//! cache before the upload finishes, so the UI can show a freshly captured
//! photo immediately. [`ProfileImageManager`] talks to the uploads API and
//! caches nothing.

mod cache;
mod food;
mod profile;
mod transfer;

pub use cache::ImageCache;
pub use food::FoodImageManager;
pub use profile::ProfileImageManager;
