// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity and user profile routes.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{ProfileFields, User};
use crate::routes::extract::JsonBody;
use crate::services::Identity;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/me", get(get_me))
        .route("/user", post(create_profile))
        .route("/user/{owner_id}", get(get_profile))
        .route("/user/put/{owner_id}", post(update_profile))
        .route("/user/delete/{owner_id}", post(delete_account))
}

/// Session identity; the profile is `null` until one is written.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Identity>> {
    Ok(Json(state.profiles.identity(&user).await?))
}

/// Profile in array form: empty when none exists yet.
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(owner_id): Path<String>,
) -> Result<Json<Vec<User>>> {
    user.ensure_owner(&owner_id)?;
    let profile = state.profiles.get(&owner_id).await?;
    Ok(Json(profile.into_iter().collect()))
}

async fn create_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    JsonBody(fields): JsonBody<ProfileFields>,
) -> Result<(StatusCode, Json<User>)> {
    let profile = state.profiles.create(&user.owner_id, fields).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(owner_id): Path<String>,
    JsonBody(fields): JsonBody<ProfileFields>,
) -> Result<Json<User>> {
    user.ensure_owner(&owner_id)?;
    Ok(Json(state.profiles.update(&owner_id, fields).await?))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteAccountResponse {
    pub deleted: usize,
}

/// Delete the profile and every document the owner has stored.
async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(owner_id): Path<String>,
) -> Result<Json<DeleteAccountResponse>> {
    user.ensure_owner(&owner_id)?;
    tracing::info!(owner_id, "User-initiated account deletion");

    let deleted = state.profiles.delete_account(&owner_id).await?;
    Ok(Json(DeleteAccountResponse { deleted }))
}
