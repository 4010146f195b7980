// ABOUTME: Offline nutrition table used by the label-based on-device analyzer
// ABOUTME: Exact, partial and fuzzy name lookup with per-portion macro scaling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Offline food database
//!
//! Values are stored per 100 g with a typical portion weight. Lookups scale
//! them to the portion and fall back to a generic estimate when nothing
//! matches.

use crate::constants::analysis::DEFAULT_PORTION_GRAMS;
use crate::errors::{FoodError, FoodResult};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

const BUILTIN_DATABASE_JSON: &str = include_str!("food_database.json");

/// Minimum LCS similarity for a fuzzy match
const FUZZY_MATCH_THRESHOLD: f64 = 0.55;
/// Confidence reported for a database hit
const MATCHED_CONFIDENCE: f64 = 0.9;

/// Generic estimate used when a name matches nothing
mod fallback {
    pub const CALORIES: f64 = 200.0;
    pub const PROTEIN: f64 = 10.0;
    pub const CARBS: f64 = 25.0;
    pub const FAT: f64 = 8.0;
    pub const CONFIDENCE: f64 = 0.3;
    pub const PORTION_DESC: &str = "1 portion (~200g)";
}

#[derive(Deserialize)]
struct FoodRecord {
    #[serde(default)]
    calories: f64,
    #[serde(default)]
    protein: f64,
    #[serde(default)]
    carbs: f64,
    #[serde(default)]
    fat: f64,
    #[serde(default = "default_portion")]
    portion_g: f64,
    #[serde(default = "default_portion_desc")]
    portion_desc: String,
}

const fn default_portion() -> f64 {
    DEFAULT_PORTION_GRAMS
}

fn default_portion_desc() -> String {
    "1 portion".to_owned()
}

/// Per-100 g nutrition for one food
#[derive(Debug, Clone, PartialEq)]
pub struct FoodEntry {
    /// Display name ("Lule Kebab")
    pub name: String,
    /// kcal per 100 g
    pub calories_per_100g: f64,
    /// Protein grams per 100 g
    pub protein_per_100g: f64,
    /// Carbohydrate grams per 100 g
    pub carbs_per_100g: f64,
    /// Fat grams per 100 g
    pub fat_per_100g: f64,
    /// Typical portion weight
    pub portion_grams: f64,
    /// Human-readable portion ("1 plate (~350g)")
    pub portion_desc: String,
}

/// Nutrition for one portion, as returned by [`FoodDatabase::lookup`]
#[derive(Debug, Clone, PartialEq)]
pub struct PortionNutrition {
    /// Display name
    pub name: String,
    /// Whole kcal
    pub calories: f64,
    /// Protein grams, one decimal
    pub protein: f64,
    /// Carbohydrate grams, one decimal
    pub carbs: f64,
    /// Fat grams, one decimal
    pub fat: f64,
    /// Portion weight
    pub portion_grams: f64,
    /// Human-readable portion
    pub portion_desc: String,
    /// Lookup confidence
    pub confidence: f64,
    /// Whether the name matched a database entry
    pub matched: bool,
}

impl PortionNutrition {
    fn scaled(entry: &FoodEntry) -> Self {
        let multiplier = entry.portion_grams / 100.0;
        Self {
            name: entry.name.clone(),
            calories: (entry.calories_per_100g * multiplier).round(),
            protein: round_tenth(entry.protein_per_100g * multiplier),
            carbs: round_tenth(entry.carbs_per_100g * multiplier),
            fat: round_tenth(entry.fat_per_100g * multiplier),
            portion_grams: entry.portion_grams,
            portion_desc: entry.portion_desc.clone(),
            confidence: MATCHED_CONFIDENCE,
            matched: true,
        }
    }

    fn unmatched(name: &str) -> Self {
        Self {
            name: capitalize_first(name),
            calories: fallback::CALORIES,
            protein: fallback::PROTEIN,
            carbs: fallback::CARBS,
            fat: fallback::FAT,
            portion_grams: DEFAULT_PORTION_GRAMS,
            portion_desc: fallback::PORTION_DESC.to_owned(),
            confidence: fallback::CONFIDENCE,
            matched: false,
        }
    }
}

/// In-memory nutrition table
///
/// Every food is indexed under its original key plus lowercase, underscore and
/// space spellings. The index is ordered so partial and fuzzy matching are
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct FoodDatabase {
    index: BTreeMap<String, Arc<FoodEntry>>,
    foods: usize,
}

impl FoodDatabase {
    /// Load the table bundled with the crate
    ///
    /// # Errors
    ///
    /// Returns `FoodError::Config` if the bundled table is malformed
    pub fn builtin() -> FoodResult<Self> {
        Self::from_json(BUILTIN_DATABASE_JSON)
    }

    /// Load a table from `{"name": {"calories": .., "portion_g": .., ..}}` JSON
    ///
    /// # Errors
    ///
    /// Returns `FoodError::Config` if the JSON does not have that shape
    pub fn from_json(json: &str) -> FoodResult<Self> {
        let records: HashMap<String, FoodRecord> = serde_json::from_str(json)
            .map_err(|e| FoodError::config(format!("invalid food database: {e}")))?;

        let mut database = Self::default();
        for (key, record) in records {
            database.insert(&key, record);
        }
        Ok(database)
    }

    fn insert(&mut self, key: &str, record: FoodRecord) {
        let entry = Arc::new(FoodEntry {
            name: display_name(key),
            calories_per_100g: record.calories,
            protein_per_100g: record.protein,
            carbs_per_100g: record.carbs,
            fat_per_100g: record.fat,
            portion_grams: record.portion_g,
            portion_desc: record.portion_desc,
        });

        let lower = key.to_lowercase();
        let variants = [
            key.to_owned(),
            lower.replace(' ', "_"),
            lower.replace('_', " "),
            lower,
        ];
        for variant in variants {
            self.index.insert(variant, Arc::clone(&entry));
        }
        self.foods += 1;
    }

    /// Number of distinct foods
    #[must_use]
    pub const fn len(&self) -> usize {
        self.foods
    }

    /// Whether the table is empty
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.foods == 0
    }

    /// Entry for an exact (case, space and underscore insensitive) name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FoodEntry> {
        let query = name.trim().to_lowercase();
        [query.clone(), query.replace(' ', "_"), query.replace('_', " ")]
            .iter()
            .find_map(|variant| self.index.get(variant))
            .map(Arc::as_ref)
    }

    /// Portion nutrition for `name`
    ///
    /// Tries an exact match, then containment either way, then the most
    /// similar name above the fuzzy threshold. Anything else gets a generic
    /// 200 kcal estimate with `matched == false`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> PortionNutrition {
        let query = name.trim().to_lowercase();
        if query.is_empty() {
            return PortionNutrition::unmatched(name.trim());
        }

        if let Some(entry) = self.get(&query) {
            return PortionNutrition::scaled(entry);
        }

        if let Some(entry) = self.partial_match(&query) {
            return PortionNutrition::scaled(entry);
        }

        if let Some(entry) = self.fuzzy_match(&query) {
            return PortionNutrition::scaled(entry);
        }

        PortionNutrition::unmatched(name.trim())
    }

    fn partial_match(&self, query: &str) -> Option<&FoodEntry> {
        let spaced = query.replace('_', " ");
        let underscored = query.replace(' ', "_");
        // Longest matching key wins
        let mut best: Option<(&FoodEntry, usize)> = None;
        for (key, entry) in &self.index {
            let key = key.to_lowercase();
            let hit = [query, spaced.as_str(), underscored.as_str()]
                .iter()
                .any(|q| key.contains(q) || q.contains(key.as_str()));
            let longer = match best {
                Some((_, best_len)) => key.len() > best_len,
                None => true,
            };
            if hit && longer {
                best = Some((entry.as_ref(), key.len()));
            }
        }
        best.map(|(entry, _)| entry)
    }

    fn fuzzy_match(&self, query: &str) -> Option<&FoodEntry> {
        let mut best: Option<(&FoodEntry, f64)> = None;
        for (key, entry) in &self.index {
            let score = string_similarity(query, key);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((entry.as_ref(), score)),
            }
        }
        best.filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
            .map(|(entry, _)| entry)
    }
}

/// Similarity in `[0, 1]`: `2 * lcs(a, b) / (|a| + |b|)` over characters
#[must_use]
pub fn string_similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let mut previous = vec![0_usize; b.len() + 1];
    let mut current = vec![0_usize; b.len() + 1];
    for ca in &a {
        for (j, cb) in b.iter().enumerate() {
            current[j + 1] = if ca == cb {
                previous[j] + 1
            } else {
                previous[j + 1].max(current[j])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }

    (2.0 * previous[b.len()] as f64) / (a.len() + b.len()) as f64
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

fn display_name(key: &str) -> String {
    key.replace('_', " ")
        .split(' ')
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}
