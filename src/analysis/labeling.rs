// ABOUTME: Label-based on-device food classifier built on an image labeler and the food database
// ABOUTME: Filters food labels, looks up portion nutrition and blends label and lookup confidence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::classifier::FoodClassifier;
use super::food_database::FoodDatabase;
use crate::errors::ClassifierError;
use crate::{AnalysisResult, DetectedFood};
use async_trait::async_trait;
use image::DynamicImage;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Labels that suggest the photo shows food (substring match either way)
const FOOD_KEYWORDS: &[&str] = &[
    "food", "dish", "meal", "cuisine", "snack", "dessert", "drink", "beverage", "fruit",
    "vegetable", "meat", "bread", "cake", "pizza", "pasta", "rice", "soup", "salad", "sandwich",
    "burger", "hamburger", "hot dog", "sushi", "noodle", "seafood", "fish", "chicken", "beef",
    "pork", "steak", "egg", "cheese", "chocolate", "ice cream", "cookie", "pie", "donut", "waffle",
    "pancake", "cereal", "yogurt", "milk", "juice", "coffee", "tea", "apple", "banana", "orange",
    "strawberry", "grape", "watermelon", "lemon", "tomato", "potato", "carrot", "broccoli", "corn",
    "mushroom", "onion", "garlic", "pepper", "cucumber", "lettuce", "spinach", "bean", "pea", "nut",
    "almond", "walnut", "peanut", "ramen", "taco", "burrito", "falafel", "hummus", "kebab",
    "curry", "biryani", "dumpling", "spaghetti", "lasagna", "ravioli", "gnocchi", "risotto",
    "croissant", "muffin", "baguette", "pretzel", "bagel", "produce", "baked goods", "fast food",
    "ingredient", "recipe", "tableware", "plate", "bowl", "cup",
];

/// Labels that are never food (exact match)
const NON_FOOD_KEYWORDS: &[&str] = &[
    "person", "human", "face", "hand", "finger", "animal", "dog", "cat", "car", "vehicle",
    "building", "sky", "cloud", "tree", "flower", "computer", "phone", "screen", "text", "logo",
    "symbol", "clothing", "shoe", "bag", "furniture", "chair", "table",
];

/// Labels considered when none look like food
const FALLBACK_LABEL_LIMIT: usize = 3;
/// Upper bound for per-food and overall confidence
const MAX_CONFIDENCE: f64 = 0.95;
/// Lower bound for an unmatched label's confidence
const MIN_UNMATCHED_CONFIDENCE: f64 = 0.3;

/// One label produced by an image labeling model
#[derive(Debug, Clone, PartialEq)]
pub struct ImageLabel {
    /// Label text as reported by the model
    pub text: String,
    /// Model confidence in `[0, 1]`
    pub confidence: f64,
}

impl ImageLabel {
    /// Create a label
    #[must_use]
    pub fn new(text: impl Into<String>, confidence: f64) -> Self {
        Self {
            text: text.into(),
            confidence,
        }
    }

    fn normalized_text(&self) -> String {
        self.text.trim().to_lowercase()
    }
}

/// Generic on-device image labeling model, ordered by descending confidence
#[async_trait]
pub trait ImageLabeler: Send + Sync {
    /// Label a decoded image
    ///
    /// # Errors
    ///
    /// Model failures are reported as `ClassifierError::Failed`
    async fn label(&self, image: &DynamicImage) -> Result<Vec<ImageLabel>, ClassifierError>;
}

/// [`FoodClassifier`] that maps generic image labels to foods via [`FoodDatabase`]
#[derive(Clone)]
pub struct LabelFoodClassifier {
    labeler: Arc<dyn ImageLabeler>,
    database: Arc<FoodDatabase>,
}

impl LabelFoodClassifier {
    /// Create a classifier over a labeler and a nutrition table
    #[must_use]
    pub fn new(labeler: Arc<dyn ImageLabeler>, database: Arc<FoodDatabase>) -> Self {
        Self { labeler, database }
    }

    /// Build the analysis result for a set of labels
    ///
    /// # Errors
    ///
    /// Returns `ClassifierError::NoFoodDetected` if no label yields a food
    pub fn foods_from_labels(&self, labels: &[ImageLabel]) -> Result<AnalysisResult, ClassifierError> {
        let mut seen = HashSet::new();
        let mut foods = Vec::new();

        for label in select_labels(labels) {
            let text = label.normalized_text();
            if !seen.insert(text.clone()) {
                continue;
            }

            let nutrition = self.database.lookup(&text);
            let confidence = if nutrition.matched {
                label
                    .confidence
                    .mul_add(0.5, nutrition.confidence * 0.5)
                    .min(MAX_CONFIDENCE)
            } else {
                (label.confidence * 0.6).max(MIN_UNMATCHED_CONFIDENCE)
            };
            debug!(
                label = %text,
                food = %nutrition.name,
                calories = nutrition.calories,
                matched = nutrition.matched,
                "Label mapped to food"
            );

            foods.push(
                DetectedFood::new(
                    nutrition.name,
                    nutrition.calories,
                    nutrition.protein,
                    nutrition.carbs,
                    nutrition.fat,
                )
                .with_portion_grams(nutrition.portion_grams)
                .with_confidence(confidence),
            );
        }

        if foods.is_empty() {
            return Err(ClassifierError::NoFoodDetected);
        }

        let overall = (foods.iter().map(|f| f.confidence).sum::<f64>() / foods.len() as f64)
            .min(MAX_CONFIDENCE);
        Ok(AnalysisResult::from_foods(foods, overall, None))
    }
}

#[async_trait]
impl FoodClassifier for LabelFoodClassifier {
    fn name(&self) -> &'static str {
        "labeler"
    }

    async fn classify(&self, image: &DynamicImage) -> Result<AnalysisResult, ClassifierError> {
        let labels = self.labeler.label(image).await?;
        debug!(labels = labels.len(), "Image labeled");
        self.foods_from_labels(&labels)
    }
}

fn is_food_label(text: &str) -> bool {
    !text.is_empty()
        && FOOD_KEYWORDS
            .iter()
            .any(|keyword| text.contains(keyword) || keyword.contains(text))
}

fn is_non_food_label(text: &str) -> bool {
    NON_FOOD_KEYWORDS.contains(&text)
}

/// Food-looking labels, or the top few labels that are not explicitly non-food
fn select_labels(labels: &[ImageLabel]) -> Vec<&ImageLabel> {
    let food: Vec<&ImageLabel> = labels
        .iter()
        .filter(|label| {
            let text = label.normalized_text();
            is_food_label(&text) && !is_non_food_label(&text)
        })
        .collect();
    if !food.is_empty() {
        return food;
    }

    labels
        .iter()
        .filter(|label| {
            let text = label.normalized_text();
            !text.is_empty() && !is_non_food_label(&text)
        })
        .take(FALLBACK_LABEL_LIMIT)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    struct FixedLabeler(Vec<ImageLabel>);

    #[async_trait]
    impl ImageLabeler for FixedLabeler {
        async fn label(&self, _image: &DynamicImage) -> Result<Vec<ImageLabel>, ClassifierError> {
            Ok(self.0.clone())
        }
    }

    struct BrokenLabeler;

    #[async_trait]
    impl ImageLabeler for BrokenLabeler {
        async fn label(&self, _image: &DynamicImage) -> Result<Vec<ImageLabel>, ClassifierError> {
            Err(ClassifierError::failed("model not loaded"))
        }
    }

    fn classifier(labeler: impl ImageLabeler + 'static) -> LabelFoodClassifier {
        LabelFoodClassifier::new(Arc::new(labeler), Arc::new(FoodDatabase::builtin().unwrap()))
    }

    fn photo() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::new(8, 8))
    }

    #[tokio::test]
    async fn test_food_labels_are_matched_and_deduplicated() {
        let labeler = FixedLabeler(vec![
            ImageLabel::new("Rice", 0.8),
            ImageLabel::new("Person", 0.95),
            ImageLabel::new("Table", 0.7),
            ImageLabel::new("rice ", 0.6),
        ]);
        let result = classifier(labeler).classify(&photo()).await.unwrap();

        assert_eq!(result.foods().len(), 1);
        let rice = &result.foods()[0];
        assert_eq!(rice.name, "Rice");
        assert!((rice.calories - 260.0).abs() < f64::EPSILON);
        assert!((rice.protein - 5.4).abs() < 1e-9);
        assert!((rice.confidence - 0.85).abs() < 1e-9);
        assert!((result.confidence() - 0.85).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_non_food_only_falls_back_to_top_labels() {
        let labeler = FixedLabeler(vec![ImageLabel::new("Plov", 0.7), ImageLabel::new("Person", 0.9)]);
        let result = classifier(labeler).classify(&photo()).await.unwrap();

        assert_eq!(result.foods().len(), 1);
        assert_eq!(result.foods()[0].name, "Plov");
        assert!((result.total_calories() - 630.0).abs() < f64::EPSILON);
        assert!((result.foods()[0].portion_grams - 350.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_unmatched_food_label_uses_estimate() {
        let labeler = FixedLabeler(vec![ImageLabel::new("Food", 0.9)]);
        let result = classifier(labeler).classify(&photo()).await.unwrap();

        let food = &result.foods()[0];
        assert_eq!(food.name, "Food");
        assert!((food.calories - 200.0).abs() < f64::EPSILON);
        assert!((food.confidence - 0.54).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_only_non_food_labels_detects_nothing() {
        let labeler = FixedLabeler(vec![ImageLabel::new("Person", 0.9), ImageLabel::new("Dog", 0.8)]);
        let err = classifier(labeler).classify(&photo()).await.unwrap_err();

        assert_eq!(err, ClassifierError::NoFoodDetected);
    }

    #[tokio::test]
    async fn test_labeler_failure_passes_through() {
        let err = classifier(BrokenLabeler).classify(&photo()).await.unwrap_err();
        assert!(matches!(err, ClassifierError::Failed { .. }));
    }

    #[test]
    fn test_totals_follow_foods() {
        let result = classifier(FixedLabeler(Vec::new()))
            .foods_from_labels(&[ImageLabel::new("apple", 0.9), ImageLabel::new("banana", 0.9)])
            .unwrap();

        let sum: f64 = result.foods().iter().map(|f| f.calories).sum();
        assert!((result.total_calories() - sum).abs() < f64::EPSILON);
        assert_eq!(result.foods().len(), 2);
    }
}
