// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Command modules for corevia-food
// ABOUTME: Analysis, entry image transfer and profile photo commands

pub mod analyze;
pub mod images;
pub mod profile;

use anyhow::{Context, Result};
use image::DynamicImage;
use std::path::Path;

/// Read and decode an image file
pub(crate) async fn read_image(path: &Path) -> Result<DynamicImage> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    corevia_food::imaging::decode_image_async(bytes.into())
        .await
        .with_context(|| format!("{} is not a supported image", path.display()))
}
