// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Food entry image commands for corevia-food
// ABOUTME: Upload a photo for an entry, or fetch one and write it to disk

use super::read_image;
use anyhow::{Context, Result};
use corevia_food::context::FoodServices;
use image::GenericImageView;
use std::path::Path;

/// Upload `photo` as the image of `entry_id` and print the server reference
pub async fn upload(services: &FoodServices, photo: &Path, entry_id: &str) -> Result<()> {
    let image = read_image(photo).await?;
    let reference = services.food_images().save_image(image, entry_id).await?;
    println!("{reference}");
    Ok(())
}

/// Download `url` for `entry_id` and save it to `output`
pub async fn fetch(services: &FoodServices, url: &str, entry_id: &str, output: &Path) -> Result<()> {
    let image = services.food_images().load_image_from_url(url, entry_id).await?;
    let (width, height) = image.dimensions();

    let target = output.to_path_buf();
    tokio::task::spawn_blocking(move || image.save(target))
        .await
        .context("image writer task failed")?
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!("Saved {} ({width}x{height})", output.display());
    Ok(())
}
