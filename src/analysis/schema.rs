// ABOUTME: Remote analysis response schemas and their normalization to AnalysisResult
// ABOUTME: Canonical shape first, then the detail shape (itemized list or single aggregate)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Remote response decoding
//!
//! The analysis backend answers with one of two JSON shapes. The canonical
//! shape is the serialized [`AnalysisResult`]. The detail shape carries either
//! a `foods_detail` list or one aggregate food at the top level:
//!
//! ```json
//! {"foods_detail": [{"name": "Rice", "calories": 206}], "confidence": 0.7}
//! {"food_name": "Plov", "calories": 630, "fats": 24.5}
//! ```
//!
//! Decoding tries the canonical shape and falls back to the detail shape;
//! [`RemotePayload::normalize`] maps either into the canonical result.

use crate::constants::analysis::{DEFAULT_CONFIDENCE, DEFAULT_PORTION_GRAMS, PLACEHOLDER_FOOD_NAME};
use crate::errors::{FoodError, FoodResult};
use crate::{AnalysisResult, DetectedFood};
use serde::Deserialize;
use serde_json::Value;

/// One food in the detail shape; every field may be absent
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FoodDetail {
    /// Display name
    #[serde(default, alias = "foodName", alias = "food_name")]
    pub name: Option<String>,
    /// Energy in kcal
    #[serde(default)]
    pub calories: Option<f64>,
    /// Protein in grams
    #[serde(default)]
    pub protein: Option<f64>,
    /// Carbohydrates in grams
    #[serde(default)]
    pub carbs: Option<f64>,
    /// Fat in grams
    #[serde(default, alias = "fat")]
    pub fats: Option<f64>,
}

impl FoodDetail {
    fn into_detected(self, confidence: f64) -> DetectedFood {
        DetectedFood::new(
            self.name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| PLACEHOLDER_FOOD_NAME.to_owned()),
            self.calories.unwrap_or_default(),
            self.protein.unwrap_or_default(),
            self.carbs.unwrap_or_default(),
            self.fats.unwrap_or_default(),
        )
        .with_portion_grams(DEFAULT_PORTION_GRAMS)
        .with_confidence(confidence)
    }
}

/// The looser backend shape, as a tagged union
#[derive(Debug, Clone, PartialEq)]
pub enum DetailResponse {
    /// A non-empty per-food list
    Itemized {
        /// Foods in response order
        items: Vec<FoodDetail>,
        /// Top-level confidence shared by every food
        confidence: Option<f64>,
    },
    /// A single food described by the top-level fields
    Aggregate {
        /// The aggregate food
        food: FoodDetail,
        /// Top-level confidence
        confidence: Option<f64>,
    },
}

impl DetailResponse {
    /// Map into the canonical result: fixed portion, shared confidence, recomputed totals
    #[must_use]
    pub fn normalize(self) -> AnalysisResult {
        let (details, confidence) = match self {
            Self::Itemized { items, confidence } => (items, confidence),
            Self::Aggregate { food, confidence } => (vec![food], confidence),
        };
        let confidence = confidence.unwrap_or(DEFAULT_CONFIDENCE);
        let foods = details
            .into_iter()
            .map(|detail| detail.into_detected(confidence))
            .collect();
        AnalysisResult::from_foods(foods, confidence, None)
    }
}

/// Raw detail shape; only used to pick a [`DetailResponse`] variant
#[derive(Deserialize)]
struct DetailWire {
    #[serde(default, alias = "foodsDetail")]
    foods_detail: Option<Vec<FoodDetail>>,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default, alias = "foodName", alias = "name")]
    food_name: Option<String>,
    #[serde(default)]
    calories: Option<f64>,
    #[serde(default)]
    protein: Option<f64>,
    #[serde(default)]
    carbs: Option<f64>,
    #[serde(default, alias = "fat")]
    fats: Option<f64>,
}

impl From<DetailWire> for DetailResponse {
    fn from(wire: DetailWire) -> Self {
        match wire.foods_detail {
            Some(items) if !items.is_empty() => Self::Itemized {
                items,
                confidence: wire.confidence,
            },
            _ => Self::Aggregate {
                food: FoodDetail {
                    name: wire.food_name,
                    calories: wire.calories,
                    protein: wire.protein,
                    carbs: wire.carbs,
                    fats: wire.fats,
                },
                confidence: wire.confidence,
            },
        }
    }
}

/// A decoded remote analysis body
#[derive(Debug, Clone, PartialEq)]
pub enum RemotePayload {
    /// Body matched the canonical result shape
    Canonical(AnalysisResult),
    /// Body matched the detail shape
    Detail(DetailResponse),
}

impl RemotePayload {
    /// Decode a response body, canonical shape first
    ///
    /// # Errors
    ///
    /// Returns `FoodError::Decode` if the body is not a JSON object or matches
    /// neither shape
    pub fn parse(body: &[u8]) -> FoodResult<Self> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| FoodError::decode(format!("analysis response is not valid JSON: {e}")))?;
        if !value.is_object() {
            return Err(FoodError::decode("analysis response is not a JSON object"));
        }

        if let Ok(result) = AnalysisResult::deserialize(&value) {
            return Ok(Self::Canonical(result));
        }

        DetailWire::deserialize(&value)
            .map(|wire| Self::Detail(wire.into()))
            .map_err(|e| FoodError::decode(format!("analysis response matched no known schema: {e}")))
    }

    /// Map either shape into the canonical result
    #[must_use]
    pub fn normalize(self) -> AnalysisResult {
        match self {
            Self::Canonical(result) => result,
            Self::Detail(detail) => detail.normalize(),
        }
    }
}
