// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Profile photo commands for corevia-food
// ABOUTME: Upload a replacement photo or delete the current one

use super::read_image;
use anyhow::Result;
use corevia_food::context::FoodServices;
use std::path::Path;

/// Upload `photo` as the profile photo and print the server reference
pub async fn upload(services: &FoodServices, photo: &Path) -> Result<()> {
    let image = read_image(photo).await?;
    let reference = services.profile_images().upload(image).await?;
    println!("{reference}");
    Ok(())
}

/// Remove the profile photo on the server
pub async fn delete(services: &FoodServices) -> Result<()> {
    services.profile_images().delete().await?;
    println!("Profile photo deleted");
    Ok(())
}
