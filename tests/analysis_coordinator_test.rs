// ABOUTME: Integration tests for two-tier food photo analysis
// ABOUTME: Verifies on-device short-circuit, remote fallback, schema normalization and error mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, missing_docs)]

mod common;

use anyhow::Result;
use common::{contains_bytes, jpeg_photo, services, test_image, FailingClassifier, ScriptedClassifier};
use corevia_food::analysis::UnavailableClassifier;
use corevia_food::errors::{ClassifierError, FoodError};
use corevia_food::DetectedFood;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ANALYZE_PATH: &str = "/api/v1/food/analyze";

async fn mount_analyze(server: &MockServer, response: ResponseTemplate, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path(ANALYZE_PATH))
        .respond_with(response)
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_on_device_success_makes_no_network_call() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let classifier = ScriptedClassifier::new(vec![
        DetectedFood::new("apple", 95.0, 0.5, 25.0, 0.3),
        DetectedFood::new("toast", 120.0, 4.0, 22.0, 1.5),
    ]);
    let services = services(&server.uri(), classifier.clone());

    let result = services.analysis().analyze(jpeg_photo(64, 48)).await?;

    assert_eq!(result.foods().len(), 2);
    assert_eq!(result.foods()[0].name, "apple");
    assert!((result.total_calories() - 215.0).abs() < f64::EPSILON);
    assert_eq!(classifier.calls(), 1);
    Ok(())
}

#[tokio::test]
async fn test_classifier_failure_issues_exactly_one_remote_request() -> Result<()> {
    let server = MockServer::start().await;
    mount_analyze(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "foodsDetail": [{"name": "Rice", "calories": 206}],
            "confidence": 0.7
        })),
        1,
    )
    .await;

    let classifier = FailingClassifier::new();
    let services = services(&server.uri(), classifier.clone());

    let result = services.analysis().analyze(jpeg_photo(64, 48)).await?;

    assert_eq!(classifier.calls(), 1);
    assert_eq!(result.foods().len(), 1);
    assert_eq!(result.foods()[0].name, "Rice");
    assert!((result.total_calories() - 206.0).abs() < f64::EPSILON);
    assert!((result.confidence() - 0.7).abs() < f64::EPSILON);
    Ok(())
}

#[tokio::test]
async fn test_remote_upload_carries_original_bytes_as_file_part() -> Result<()> {
    let server = MockServer::start().await;
    mount_analyze(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"food_name": "Soup", "calories": 120})),
        1,
    )
    .await;

    let photo = jpeg_photo(800, 600);
    let services = services(&server.uri(), Arc::new(UnavailableClassifier));
    services.analysis().analyze(photo.clone()).await?;

    let requests = server.received_requests().await.expect("request recording enabled");
    assert_eq!(requests.len(), 1);
    let body = &requests[0].body;
    assert!(contains_bytes(body, b"name=\"file\""));
    assert!(contains_bytes(body, b"filename=\"food_photo.jpg\""));
    assert!(contains_bytes(body, b"image/jpeg"));
    assert!(contains_bytes(body, &photo));
    Ok(())
}

#[tokio::test]
async fn test_undecodable_photo_skips_classifier_and_goes_remote() -> Result<()> {
    let server = MockServer::start().await;
    mount_analyze(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"food_name": "Tea", "calories": 2})),
        1,
    )
    .await;

    let classifier = ScriptedClassifier::new(vec![DetectedFood::new("never", 1.0, 0.0, 0.0, 0.0)]);
    let services = services(&server.uri(), classifier.clone());

    let result = services.analysis().analyze(b"HEIC? not today".to_vec()).await?;

    assert_eq!(classifier.calls(), 0);
    assert_eq!(result.foods()[0].name, "Tea");
    Ok(())
}

#[tokio::test]
async fn test_remote_http_500_is_remote_error() -> Result<()> {
    let server = MockServer::start().await;
    mount_analyze(&server, ResponseTemplate::new(500).set_body_string("boom"), 1).await;

    let services = services(&server.uri(), FailingClassifier::new());
    let err = services.analysis().analyze(jpeg_photo(16, 16)).await.unwrap_err();

    assert!(matches!(err, FoodError::Remote { status: 500, .. }), "got {err:?}");
    assert_eq!(err.http_status(), Some(500));
    Ok(())
}

#[tokio::test]
async fn test_itemized_detail_recomputes_totals() -> Result<()> {
    let server = MockServer::start().await;
    mount_analyze(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "foods_detail": [
                {"name": "Plov", "calories": 630, "protein": 19.3, "carbs": 87.5, "fats": 24.5},
                {"name": "Ayran", "calories": 100, "protein": 5, "carbs": 7.5, "fats": 5},
                {"name": "Salad", "calories": 40}
            ],
            "calories": 12345,
            "confidence": 0.6
        })),
        1,
    )
    .await;

    let services = services(&server.uri(), FailingClassifier::new());
    let result = services.analysis().analyze(jpeg_photo(16, 16)).await?;

    assert_eq!(result.foods().len(), 3);
    let foods = result.foods();
    let sum = |f: fn(&DetectedFood) -> f64| foods.iter().map(f).sum::<f64>();
    assert!((result.total_calories() - sum(|f| f.calories)).abs() < 1e-9);
    assert!((result.total_protein() - sum(|f| f.protein)).abs() < 1e-9);
    assert!((result.total_carbs() - sum(|f| f.carbs)).abs() < 1e-9);
    assert!((result.total_fat() - sum(|f| f.fat)).abs() < 1e-9);
    assert!((result.total_calories() - 770.0).abs() < 1e-9);

    let ids: HashSet<&str> = foods.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids.len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_aggregate_detail_emits_single_default_portion_food() -> Result<()> {
    let server = MockServer::start().await;
    mount_analyze(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "food_name": "Dolma",
            "calories": 337.5,
            "protein": 20,
            "portion_size": "5-6 pieces"
        })),
        1,
    )
    .await;

    let services = services(&server.uri(), FailingClassifier::new());
    let result = services.analysis().analyze(jpeg_photo(16, 16)).await?;

    assert_eq!(result.foods().len(), 1);
    let food = &result.foods()[0];
    assert_eq!(food.name, "Dolma");
    assert!((food.portion_grams - 200.0).abs() < f64::EPSILON);
    assert!((food.confidence - 0.5).abs() < f64::EPSILON);
    assert!((result.confidence() - 0.5).abs() < f64::EPSILON);
    assert!((result.total_protein() - 20.0).abs() < f64::EPSILON);
    Ok(())
}

#[tokio::test]
async fn test_canonical_response_totals_are_recomputed() -> Result<()> {
    let server = MockServer::start().await;
    mount_analyze(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "foods": [
                {"id": "a", "name": "Egg", "calories": 93, "protein": 7.8, "carbs": 0.7, "fat": 6.6, "portion_grams": 60, "confidence": 0.9},
                {"name": "Bread", "calories": 132.5}
            ],
            "total_calories": 1,
            "total_protein": 1,
            "confidence": 0.88,
            "image_url": "https://cdn.example.com/a.jpg"
        })),
        1,
    )
    .await;

    let services = services(&server.uri(), FailingClassifier::new());
    let result = services.analysis().analyze(jpeg_photo(16, 16)).await?;

    assert_eq!(result.foods().len(), 2);
    assert_eq!(result.foods()[0].id, "a");
    assert!(!result.foods()[1].id.is_empty());
    assert!((result.total_calories() - 225.5).abs() < 1e-9);
    assert!((result.total_protein() - 7.8).abs() < 1e-9);
    assert!((result.confidence() - 0.88).abs() < f64::EPSILON);
    assert_eq!(result.image_url(), Some("https://cdn.example.com/a.jpg"));
    Ok(())
}

#[tokio::test]
async fn test_unrecognized_body_is_decode_error() -> Result<()> {
    let server = MockServer::start().await;
    mount_analyze(
        &server,
        ResponseTemplate::new(200).set_body_string("<html>gateway</html>"),
        1,
    )
    .await;

    let services = services(&server.uri(), FailingClassifier::new());
    let err = services.analysis().analyze(jpeg_photo(16, 16)).await.unwrap_err();

    assert!(matches!(err, FoodError::Decode { .. }), "got {err:?}");
    assert_eq!(err.http_status(), None);
    Ok(())
}

#[tokio::test]
async fn test_unreachable_backend_is_transfer_error() -> Result<()> {
    // Bind and drop a listener so the port is closed
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        listener.local_addr()?.port()
    };

    let services = services(&format!("http://127.0.0.1:{port}"), FailingClassifier::new());
    let err = services.analysis().analyze(jpeg_photo(16, 16)).await.unwrap_err();

    assert!(matches!(err, FoodError::Transfer { .. }), "got {err:?}");
    Ok(())
}

#[tokio::test]
async fn test_offline_failure_surfaces_classifier_error_without_network() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let services = services(&server.uri(), FailingClassifier::new());
    let err = services
        .analysis()
        .analyze_offline(&test_image(32, 32))
        .await
        .unwrap_err();

    assert!(
        matches!(err, FoodError::Classifier(ClassifierError::Failed { .. })),
        "got {err:?}"
    );
    Ok(())
}

#[tokio::test]
async fn test_offline_success_returns_on_device_result() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let classifier = ScriptedClassifier::new(vec![DetectedFood::new("banana", 107.0, 1.3, 27.6, 0.4)]);
    let services = services(&server.uri(), classifier);
    let result = services.analysis().analyze_offline(&test_image(32, 32)).await?;

    assert!((result.total_calories() - 107.0).abs() < f64::EPSILON);
    Ok(())
}
