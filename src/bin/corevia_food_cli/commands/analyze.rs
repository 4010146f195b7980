// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Photo analysis command for corevia-food
// ABOUTME: Two-tier by default, on-device only with --offline; prints the result as JSON

use super::read_image;
use anyhow::{Context, Result};
use corevia_food::context::FoodServices;
use corevia_food::MealType;
use std::path::Path;
use tracing::info;

/// Analyze `photo` and print the canonical result
pub async fn run(services: &FoodServices, photo: &Path, offline: bool) -> Result<()> {
    let result = if offline {
        let image = read_image(photo).await?;
        services.analysis().analyze_offline(&image).await?
    } else {
        let bytes = tokio::fs::read(photo)
            .await
            .with_context(|| format!("failed to read {}", photo.display()))?;
        services.analysis().analyze(bytes).await?
    };

    info!(
        foods = result.foods().len(),
        total_calories = result.total_calories(),
        meal = %MealType::estimate_now(),
        "Analysis complete"
    );
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
