// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API authentication, ownership and CORS tests.
//!
//! These tests verify that:
//! 1. Protected routes reject requests without valid tokens
//! 2. Owner-scoped paths reject other owners
//! 3. CORS preflight requests return correct headers

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use axum_extra::extract::cookie::Cookie;
use liftlog_api::middleware::auth::SESSION_COOKIE;
use serde_json::json;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_protected_route_without_token() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/exercises/u1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Should return 401 Unauthorized without token
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_invalid_token() {
    let (app, _) = common::create_test_app();

    let response = common::send(&app, "GET", "/exercises/u1", "invalid.token.here", None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_key_rejected() {
    let (app, _) = common::create_test_app();
    let token = common::create_test_jwt("u1", b"some_other_key_that_is_32_bytes!");

    let response = common::send(&app, "GET", "/exercises/u1", &token, None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_cookie_accepted() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("u1", &state.config.jwt_signing_key);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/exercises/u1")
                .header(header::COOKIE, Cookie::new(SESSION_COOKIE, token).to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_me_without_profile() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("u1", &state.config.jwt_signing_key);

    let response = common::send(&app, "GET", "/me", &token, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::json_body(response).await;
    assert_eq!(body["id"], "u1");
    assert_eq!(body["display_name"], "Test Lifter");
    assert!(body["profile"].is_null());
}

#[tokio::test]
async fn test_other_owner_path_forbidden() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("u1", &state.config.jwt_signing_key);

    for uri in [
        "/user/u2",
        "/exercises/u2",
        "/trackedexercises/u2",
        "/workouts/u2",
        "/splits/u2",
    ] {
        let response = common::send(&app, "GET", uri, &token, None).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "GET {}", uri);

        let body = common::json_body(response).await;
        assert_eq!(body["error"], "forbidden");
    }
}

#[tokio::test]
async fn test_body_owner_mismatch_forbidden() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("u1", &state.config.jwt_signing_key);

    let response = common::send(
        &app,
        "POST",
        "/trackedexercises",
        &token,
        Some(json!({"googleId": "u2", "name": "Squat"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_other_owners_documents_not_found() {
    let (app, state) = common::create_test_app();
    let alice = common::create_test_jwt("alice", &state.config.jwt_signing_key);
    let bob = common::create_test_jwt("bob", &state.config.jwt_signing_key);

    let response = common::send(
        &app,
        "POST",
        "/exercises",
        &alice,
        Some(json!({"name": "Squat"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let exercise = common::json_body(response).await;
    let id = exercise["id"].as_str().unwrap();

    let response = common::send(
        &app,
        "POST",
        &format!("/exercises/delete/{}", id),
        &bob,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = common::send(&app, "GET", "/exercises/alice", &alice, None).await;
    let list = common::json_body(response).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_cors_preflight() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/splits/public")
                .header(header::ORIGIN, "http://localhost:5173")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // OPTIONS should return 200 (CORS preflight success)
    assert_eq!(response.status(), StatusCode::OK);

    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
}

#[tokio::test]
async fn test_public_route_no_auth_required() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Health should be accessible without auth
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::X_CONTENT_TYPE_OPTIONS).unwrap(),
        "nosniff"
    );
}
