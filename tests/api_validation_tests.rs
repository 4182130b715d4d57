// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API input validation tests.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

mod common;

async fn assert_rejected(uri: &str, body: serde_json::Value) {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("u1", &state.config.jwt_signing_key);

    let response = common::send(&app, "POST", uri, &token, Some(body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST, "POST {}", uri);

    let body = common::json_body(response).await;
    assert_eq!(body["error"], "validation_failed");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn test_exercise_name_required() {
    assert_rejected("/exercises", json!({"notes": "no name"})).await;
    assert_rejected("/exercises", json!({"name": ""})).await;
}

#[tokio::test]
async fn test_exercise_name_too_long() {
    let long_name = "a".repeat(101);
    assert_rejected("/exercises", json!({"name": long_name})).await;
}

#[tokio::test]
async fn test_zero_repetitions_rejected() {
    assert_rejected(
        "/weight/log/Squat",
        json!({"repetitions": 0, "weight": 100, "date": "01/01/2024"}),
    )
    .await;
}

#[tokio::test]
async fn test_negative_weight_rejected() {
    assert_rejected(
        "/weight/log/Squat",
        json!({"repetitions": 5, "weight": -5, "date": "01/01/2024"}),
    )
    .await;
}

#[tokio::test]
async fn test_nested_snapshot_validated() {
    assert_rejected(
        "/splits",
        json!({"name": "PPL", "workouts": [{"name": "Push", "exercises": [{"name": ""}]}]}),
    )
    .await;
    assert_rejected(
        "/workouts",
        json!({"name": "Push", "exercises": [{"notes": "missing name"}]}),
    )
    .await;
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("u1", &state.config.jwt_signing_key);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/trackedexercises")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"name\": "))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_profile_create_then_conflict() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("u1", &state.config.jwt_signing_key);

    let response = common::send(&app, "GET", "/user/u1", &token, None).await;
    assert_eq!(common::json_body(response).await, json!([]));

    let body = json!({"notes": "bulk"});
    let response = common::send(&app, "POST", "/user", &token, Some(body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = common::send(&app, "POST", "/user", &token, Some(json!({}))).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(common::json_body(response).await["error"], "conflict");

    let response = common::send(
        &app,
        "POST",
        "/user/put/u1",
        &token,
        Some(json!({"height_feet": 5, "height_inches": 11})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = common::send(&app, "GET", "/user/u1", &token, None).await;
    let profiles = common::json_body(response).await;
    assert_eq!(profiles.as_array().unwrap().len(), 1);
    assert_eq!(profiles[0]["notes"], "bulk");
    assert_eq!(profiles[0]["height_inches"], 11);
}

#[tokio::test]
async fn test_repetition_rekey_conflict() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("u1", &state.config.jwt_signing_key);

    let mut ids = Vec::new();
    for reps in [5, 8] {
        let response = common::send(
            &app,
            "POST",
            "/weight/log/Squat",
            &token,
            Some(json!({"repetitions": reps, "weight": 100, "date": "01/01/2024"})),
        )
        .await;
        let log = common::json_body(response).await;
        ids.push(log["repetition"]["id"].as_str().unwrap().to_string());
    }

    let response = common::send(
        &app,
        "POST",
        &format!("/repetitions/put/{}", &ids[0]),
        &token,
        Some(json!({"repetitions": 8})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
