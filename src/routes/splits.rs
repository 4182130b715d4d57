// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Split routes, including sharing and cloning.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{NewSplit, Split, SplitPatch, VisibilityAction};
use crate::routes::extract::JsonBody;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/splits", post(create_split))
        .route("/splits/public", get(list_public_splits))
        .route("/splits/{owner_id}", get(list_splits))
        .route("/splits/put/{id}", post(update_split))
        .route("/splits/delete/{id}", post(delete_split))
        .route("/splits/public/{id}", post(set_visibility))
        .route("/splits/public/{owner_id}/split/{id}", post(clone_split))
}

async fn list_public_splits(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Split>>> {
    Ok(Json(state.splits.list_public().await?))
}

async fn list_splits(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(owner_id): Path<String>,
) -> Result<Json<Vec<Split>>> {
    user.ensure_owner(&owner_id)?;
    Ok(Json(state.splits.list(&owner_id).await?))
}

async fn create_split(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    JsonBody(request): JsonBody<NewSplit>,
) -> Result<(StatusCode, Json<Split>)> {
    let split = state.splits.create(&user.owner_id, request).await?;
    Ok((StatusCode::CREATED, Json(split)))
}

async fn update_split(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<SplitPatch>,
) -> Result<Json<Split>> {
    Ok(Json(state.splits.update(&user.owner_id, &id, patch).await?))
}

async fn delete_split(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.splits.delete(&user.owner_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Default, Deserialize)]
struct VisibilityRequest {
    #[serde(default)]
    action: VisibilityAction,
}

/// Apply a sharing action. An empty body toggles.
async fn set_visibility(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Split>> {
    let request: VisibilityRequest = if body.iter().all(u8::is_ascii_whitespace) {
        VisibilityRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| AppError::Validation(e.to_string()))?
    };

    Ok(Json(
        state
            .splits
            .set_visibility(&user.owner_id, &id, request.action)
            .await?,
    ))
}

/// Clone a split into the caller's collection. `owner_id` names the
/// caller, as in the other owner-scoped paths.
async fn clone_split(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((owner_id, id)): Path<(String, String)>,
) -> Result<(StatusCode, Json<Split>)> {
    user.ensure_owner(&owner_id)?;
    let copy = state.splits.clone_split(&owner_id, &id).await?;
    Ok((StatusCode::CREATED, Json(copy)))
}
