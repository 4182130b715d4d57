// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tracked exercise, repetition and weight endpoint tests.

use axum::http::StatusCode;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_track_twice_lists_once() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("u1", &state.config.jwt_signing_key);
    let body = json!({"ownerId": "u1", "googleId": "u1", "name": "Squat"});

    let first = common::send(&app, "POST", "/trackedexercises", &token, Some(body.clone())).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let second = common::send(&app, "POST", "/trackedexercises", &token, Some(body)).await;
    assert_eq!(second.status(), StatusCode::OK);

    let response = common::send(&app, "GET", "/trackedexercises/u1", &token, None).await;
    let list = common::json_body(response).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "Squat");
}

#[tokio::test]
async fn test_repetition_twice_lists_once() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("u1", &state.config.jwt_signing_key);

    let response = common::send(
        &app,
        "POST",
        "/trackedexercises",
        &token,
        Some(json!({"name": "Bench"})),
    )
    .await;
    let tracked = common::json_body(response).await;
    let tracked_id = tracked["id"].as_str().unwrap();

    for reps in [8, 3, 8, 12] {
        let response = common::send(
            &app,
            "POST",
            "/repetitions",
            &token,
            Some(json!({"tracked_exercise_id": tracked_id, "repetitions": reps})),
        )
        .await;
        assert!(response.status().is_success());
    }

    let response = common::send(
        &app,
        "GET",
        &format!("/repetitions/{}", tracked_id),
        &token,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let list = common::json_body(response).await;
    let counts: Vec<u64> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|rep| rep["repetitions"].as_u64().unwrap())
        .collect();
    assert_eq!(counts, vec![3, 8, 12]);
}

#[tokio::test]
async fn test_log_weight_builds_hierarchy() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("u1", &state.config.jwt_signing_key);

    let response = common::send(
        &app,
        "POST",
        "/weight/log/Squat",
        &token,
        Some(json!({"googleId": "u1", "Repetitions": 5, "Weight": 200, "date": "01/01/2024"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let first = common::json_body(response).await;
    assert_eq!(first["tracked_exercise_created"], true);
    assert_eq!(first["repetition_created"], true);
    assert_eq!(first["tracked_exercise"]["name"], "Squat");
    assert_eq!(first["repetition"]["repetitions"], 5);
    assert_eq!(
        first["repetition"]["tracked_exercise_id"],
        first["tracked_exercise"]["id"]
    );
    assert_eq!(first["weight"]["repetition_id"], first["repetition"]["id"]);

    let response = common::send(
        &app,
        "POST",
        "/weight/log/Squat",
        &token,
        Some(json!({"googleId": "u1", "Repetitions": 5, "Weight": 205, "date": "01/08/2024"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let second = common::json_body(response).await;
    assert_eq!(second["tracked_exercise_created"], false);
    assert_eq!(second["repetition_created"], false);
    assert_eq!(second["repetition"]["id"], first["repetition"]["id"]);

    let response = common::send(&app, "GET", "/trackedexercises/u1", &token, None).await;
    assert_eq!(common::json_body(response).await.as_array().unwrap().len(), 1);

    let rep_id = first["repetition"]["id"].as_str().unwrap();
    let response = common::send(
        &app,
        "GET",
        &format!("/weight/{}", rep_id),
        &token,
        None,
    )
    .await;
    let weights = common::json_body(response).await;
    let values: Vec<f64> = weights
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["weight"].as_f64().unwrap())
        .collect();
    assert_eq!(values, vec![200.0, 205.0]);
}

#[tokio::test]
async fn test_progress_chart() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("u1", &state.config.jwt_signing_key);

    let mut tracked_id = String::new();
    for (reps, weight, date) in [
        (10, 135, "01/01/2024"),
        (5, 185, "01/01/2024"),
        (5, 190, "01/03/2024"),
    ] {
        let response = common::send(
            &app,
            "POST",
            "/weight/log/Deadlift",
            &token,
            Some(json!({"repetitions": reps, "weight": weight, "date": date})),
        )
        .await;
        let log = common::json_body(response).await;
        tracked_id = log["tracked_exercise"]["id"].as_str().unwrap().to_string();
    }

    let response = common::send(
        &app,
        "GET",
        &format!("/progress/{}", &tracked_id),
        &token,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let chart = common::json_body(response).await;

    let series = chart["series"].as_array().unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series[0]["repetition"]["repetitions"], 5);
    assert_eq!(
        series[0]["points"],
        json!([
            {"date": "01/01/2024", "weight": 185.0},
            {"date": "01/03/2024", "weight": 190.0}
        ])
    );
    assert_eq!(series[1]["repetition"]["repetitions"], 10);
}

#[tokio::test]
async fn test_delete_tracked_cascades() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("u1", &state.config.jwt_signing_key);

    let response = common::send(
        &app,
        "POST",
        "/weight/log/Row",
        &token,
        Some(json!({"repetitions": 8, "weight": 95, "date": "02/01/2024"})),
    )
    .await;
    let log = common::json_body(response).await;
    let tracked_id = log["tracked_exercise"]["id"].as_str().unwrap();
    let rep_id = log["repetition"]["id"].as_str().unwrap();

    let response = common::send(
        &app,
        "POST",
        &format!("/trackedexercises/delete/{}", tracked_id),
        &token,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = common::send(
        &app,
        "GET",
        &format!("/weight/{}", rep_id),
        &token,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(state.db.get_weight(log["weight"]["id"].as_str().unwrap()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_weight_update_and_delete() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("u1", &state.config.jwt_signing_key);

    let response = common::send(
        &app,
        "POST",
        "/weight/log/Press",
        &token,
        Some(json!({"repetitions": 5, "weight": 95, "date": "03/01/2024"})),
    )
    .await;
    let log = common::json_body(response).await;
    let weight_id = log["weight"]["id"].as_str().unwrap();

    let response = common::send(
        &app,
        "POST",
        &format!("/weight/put/{}", weight_id),
        &token,
        Some(json!({"weight": 100})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = common::json_body(response).await;
    assert_eq!(updated["weight"], 100.0);
    assert_eq!(updated["date"], "03/01/2024");

    let response = common::send(
        &app,
        "POST",
        &format!("/weight/delete/{}", weight_id),
        &token,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_returned_ids_work_as_path_segments() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("u1", &state.config.jwt_signing_key);

    let response = common::send(
        &app,
        "POST",
        "/trackedexercises",
        &token,
        Some(json!({"name": "Bench Press"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let tracked = common::json_body(response).await;
    let tracked_id = tracked["id"].as_str().unwrap();

    let response = common::send(
        &app,
        "POST",
        "/weight/log/Bench%20Press",
        &token,
        Some(json!({"repetitions": 5, "weight": 185, "date": "01/01/2024"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let log = common::json_body(response).await;
    assert_eq!(log["tracked_exercise"]["id"], tracked["id"]);
    let rep_id = log["repetition"]["id"].as_str().unwrap();

    for uri in [
        format!("/repetitions/{}", tracked_id),
        format!("/weight/{}", rep_id),
        format!("/progress/{}", tracked_id),
        format!("/progress/series/{}", rep_id),
    ] {
        let response = common::send(&app, "GET", &uri, &token, None).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);
    }

    let response = common::send(
        &app,
        "POST",
        &format!("/trackedexercises/delete/{}", tracked_id),
        &token,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_overlong_name_rejected_on_both_paths() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("u1", &state.config.jwt_signing_key);
    let name = "a".repeat(101);

    let response = common::send(
        &app,
        "POST",
        "/trackedexercises",
        &token,
        Some(json!({"name": name})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = common::send(
        &app,
        "POST",
        &format!("/weight/log/{}", name),
        &token,
        Some(json!({"repetitions": 5, "weight": 100, "date": "01/01/2024"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(common::json_body(response).await["error"], "validation_failed");

    let response = common::send(&app, "GET", "/trackedexercises/u1", &token, None).await;
    assert_eq!(common::json_body(response).await, json!([]));

    let name = "a".repeat(100);
    let response = common::send(
        &app,
        "POST",
        &format!("/weight/log/{}", name),
        &token,
        Some(json!({"repetitions": 5, "weight": 100, "date": "01/01/2024"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}
