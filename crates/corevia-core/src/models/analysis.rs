// ABOUTME: Canonical food photo analysis result shared by every recognition tier
// ABOUTME: Totals are derived from the food list on construction and never read from payloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::analysis::{DEFAULT_CONFIDENCE, DEFAULT_PORTION_GRAMS, PLACEHOLDER_FOOD_NAME};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One recognized food item within a photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedFood {
    /// Identifier generated at normalization time
    #[serde(default = "generate_food_id")]
    pub id: String,
    /// Display name
    #[serde(default = "placeholder_name")]
    pub name: String,
    /// Energy in kcal
    #[serde(default)]
    pub calories: f64,
    /// Protein in grams
    #[serde(default)]
    pub protein: f64,
    /// Carbohydrates in grams
    #[serde(default)]
    pub carbs: f64,
    /// Fat in grams
    #[serde(default)]
    pub fat: f64,
    /// Estimated serving weight in grams
    #[serde(default = "default_portion", alias = "portionGrams")]
    pub portion_grams: f64,
    /// Recognition confidence in `[0, 1]`
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

impl DetectedFood {
    /// Create a food with a fresh id, the default portion and default confidence
    #[must_use]
    pub fn new(name: impl Into<String>, calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            id: generate_food_id(),
            name: name.into(),
            calories,
            protein,
            carbs,
            fat,
            portion_grams: DEFAULT_PORTION_GRAMS,
            confidence: DEFAULT_CONFIDENCE,
        }
    }

    /// Override the portion weight
    #[must_use]
    pub fn with_portion_grams(mut self, portion_grams: f64) -> Self {
        self.portion_grams = portion_grams;
        self
    }

    /// Override the confidence
    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    fn sanitized(mut self) -> Self {
        self.calories = non_negative(self.calories);
        self.protein = non_negative(self.protein);
        self.carbs = non_negative(self.carbs);
        self.fat = non_negative(self.fat);
        self.portion_grams = non_negative(self.portion_grams);
        self.confidence = unit_interval(self.confidence);
        if self.id.is_empty() {
            self.id = generate_food_id();
        }
        self
    }
}

/// Canonical output of food photo analysis
///
/// Constructed only through [`AnalysisResult::from_foods`] (deserialization goes
/// through it too), so `total_x == sum(foods[].x)` holds for every macro.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "AnalysisResultWire")]
pub struct AnalysisResult {
    foods: Vec<DetectedFood>,
    total_calories: f64,
    total_protein: f64,
    total_carbs: f64,
    total_fat: f64,
    confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
}

impl AnalysisResult {
    /// Build a result from detected foods, deriving every total from the list
    #[must_use]
    pub fn from_foods(foods: Vec<DetectedFood>, confidence: f64, image_url: Option<String>) -> Self {
        let foods: Vec<DetectedFood> = foods.into_iter().map(DetectedFood::sanitized).collect();
        Self {
            total_calories: foods.iter().map(|f| f.calories).sum(),
            total_protein: foods.iter().map(|f| f.protein).sum(),
            total_carbs: foods.iter().map(|f| f.carbs).sum(),
            total_fat: foods.iter().map(|f| f.fat).sum(),
            foods,
            confidence: unit_interval(confidence),
            image_url,
        }
    }

    /// Detected foods in detection order
    #[must_use]
    pub fn foods(&self) -> &[DetectedFood] {
        &self.foods
    }

    /// Consume the result, keeping only the foods
    #[must_use]
    pub fn into_foods(self) -> Vec<DetectedFood> {
        self.foods
    }

    /// Sum of food calories
    #[must_use]
    pub const fn total_calories(&self) -> f64 {
        self.total_calories
    }

    /// Sum of food protein
    #[must_use]
    pub const fn total_protein(&self) -> f64 {
        self.total_protein
    }

    /// Sum of food carbohydrates
    #[must_use]
    pub const fn total_carbs(&self) -> f64 {
        self.total_carbs
    }

    /// Sum of food fat
    #[must_use]
    pub const fn total_fat(&self) -> f64 {
        self.total_fat
    }

    /// Overall confidence
    #[must_use]
    pub const fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Hosted copy of the analyzed photo, if any
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Attach the URL of a hosted copy of the photo
    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

/// Wire shape of the canonical result; totals in it are accepted and discarded
#[derive(Deserialize)]
struct AnalysisResultWire {
    foods: Vec<DetectedFood>,
    #[serde(default = "default_confidence")]
    confidence: f64,
    #[serde(default, alias = "imageUrl")]
    image_url: Option<String>,
}

impl From<AnalysisResultWire> for AnalysisResult {
    fn from(wire: AnalysisResultWire) -> Self {
        Self::from_foods(wire.foods, wire.confidence, wire.image_url)
    }
}

fn generate_food_id() -> String {
    Uuid::new_v4().to_string()
}

fn placeholder_name() -> String {
    PLACEHOLDER_FOOD_NAME.to_owned()
}

const fn default_portion() -> f64 {
    DEFAULT_PORTION_GRAMS
}

const fn default_confidence() -> f64 {
    DEFAULT_CONFIDENCE
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn unit_interval(value: f64) -> f64 {
    if value.is_nan() {
        DEFAULT_CONFIDENCE
    } else {
        value.clamp(0.0, 1.0)
    }
}
