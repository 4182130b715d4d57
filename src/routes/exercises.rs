// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise catalog routes.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{Exercise, ExercisePatch, NewExercise};
use crate::routes::extract::JsonBody;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/exercises", post(create_exercise))
        .route("/exercises/{owner_id}", get(list_exercises))
        .route("/exercises/put/{id}", post(update_exercise))
        .route("/exercises/delete/{id}", post(delete_exercise))
}

async fn list_exercises(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(owner_id): Path<String>,
) -> Result<Json<Vec<Exercise>>> {
    user.ensure_owner(&owner_id)?;
    Ok(Json(state.catalog.list(&owner_id).await?))
}

async fn create_exercise(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    JsonBody(fields): JsonBody<NewExercise>,
) -> Result<(StatusCode, Json<Exercise>)> {
    let exercise = state.catalog.create(&user.owner_id, fields).await?;
    Ok((StatusCode::CREATED, Json(exercise)))
}

async fn update_exercise(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<ExercisePatch>,
) -> Result<Json<Exercise>> {
    Ok(Json(state.catalog.update(&user.owner_id, &id, patch).await?))
}

async fn delete_exercise(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.catalog.delete(&user.owner_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
