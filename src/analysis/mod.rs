// ABOUTME: Food photo recognition: classifier seam, remote client, schemas and the coordinator
// ABOUTME: Also hosts the label-based on-device classifier and its offline nutrition table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Food photo analysis
//!
//! [`AnalysisCoordinator`] is the entry point. It asks a [`FoodClassifier`]
//! first and uploads the photo to the remote analysis service only when the
//! on-device tier fails. Every path produces the canonical
//! [`AnalysisResult`](crate::AnalysisResult).

pub mod classifier;
pub mod coordinator;
pub mod food_database;
pub mod labeling;
pub mod remote;
pub mod schema;

pub use classifier::{run_on_device, FoodClassifier, OnDeviceOutcome, UnavailableClassifier};
pub use coordinator::AnalysisCoordinator;
pub use food_database::{FoodDatabase, FoodEntry, PortionNutrition};
pub use labeling::{ImageLabel, ImageLabeler, LabelFoodClassifier};
pub use remote::RemoteAnalysisClient;
pub use schema::{DetailResponse, FoodDetail, RemotePayload};
