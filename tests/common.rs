// ABOUTME: Shared test utilities for corevia_food integration tests
// ABOUTME: Quiet logging, synthetic photos, scripted classifiers and multipart inspection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `corevia_food`

use async_trait::async_trait;
use corevia_food::analysis::FoodClassifier;
use corevia_food::config::ClientConfig;
use corevia_food::context::FoodServices;
use corevia_food::errors::ClassifierError;
use corevia_food::{AnalysisResult, DetectedFood};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Solid-color RGB photo
pub fn test_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    }))
}

/// Encoded photo bytes in `format`
pub fn encoded_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Cursor::new(Vec::new());
    test_image(width, height)
        .write_to(&mut bytes, format)
        .expect("encode test image");
    bytes.into_inner()
}

/// Encoded JPEG photo
pub fn jpeg_photo(width: u32, height: u32) -> Vec<u8> {
    encoded_image(width, height, ImageFormat::Jpeg)
}

/// Services pointed at `base_url` (usually a `MockServer` URI)
pub fn services(base_url: &str, classifier: Arc<dyn FoodClassifier>) -> FoodServices {
    init_test_logging();
    FoodServices::new(ClientConfig::new(base_url), classifier).expect("build services")
}

/// Classifier that always returns the given foods and counts its calls
pub struct ScriptedClassifier {
    foods: Vec<DetectedFood>,
    calls: AtomicUsize,
}

impl ScriptedClassifier {
    pub fn new(foods: Vec<DetectedFood>) -> Arc<Self> {
        Arc::new(Self {
            foods,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FoodClassifier for ScriptedClassifier {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn classify(&self, _image: &DynamicImage) -> Result<AnalysisResult, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(AnalysisResult::from_foods(self.foods.clone(), 0.8, None))
    }
}

/// Classifier that always fails and counts its calls
#[derive(Default)]
pub struct FailingClassifier {
    calls: AtomicUsize,
}

impl FailingClassifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FoodClassifier for FailingClassifier {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn classify(&self, _image: &DynamicImage) -> Result<AnalysisResult, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ClassifierError::failed("model crashed"))
    }
}

/// Whether `needle` occurs anywhere in `haystack`
pub fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|window| window == needle)
}

/// Content of the single file part in a multipart body
pub fn multipart_file(body: &[u8]) -> &[u8] {
    let filename = find(body, b"filename=", 0).expect("multipart body has a filename");
    let start = find(body, b"\r\n\r\n", filename).expect("multipart part has headers") + 4;
    let end = rfind(body, b"\r\n--").expect("multipart body has a closing boundary");
    &body[start..end]
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|position| position + from)
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).rposition(|window| window == needle)
}
