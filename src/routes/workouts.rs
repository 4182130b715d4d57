// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout routes.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{NewWorkout, Workout, WorkoutPatch};
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
        .route("/workouts", post(create_workout))
        .route("/workouts/{owner_id}", get(list_workouts))
        .route("/workouts/{owner_id}/{id}", get(get_workout))
        .route("/workouts/put/{id}", post(update_workout))
        .route("/workouts/delete/{id}", post(delete_workout))
}

async fn list_workouts(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(owner_id): Path<String>,
) -> Result<Json<Vec<Workout>>> {
    user.ensure_owner(&owner_id)?;
    Ok(Json(state.workouts.list(&owner_id).await?))
}

async fn get_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((owner_id, id)): Path<(String, String)>,
) -> Result<Json<Workout>> {
    user.ensure_owner(&owner_id)?;
    Ok(Json(state.workouts.get(&owner_id, &id).await?))
}

async fn create_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    JsonBody(request): JsonBody<NewWorkout>,
) -> Result<(StatusCode, Json<Workout>)> {
    let workout = state.workouts.create(&user.owner_id, request).await?;
    Ok((StatusCode::CREATED, Json(workout)))
}

async fn update_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<WorkoutPatch>,
) -> Result<Json<Workout>> {
    Ok(Json(state.workouts.update(&user.owner_id, &id, patch).await?))
}

async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.workouts.delete(&user.owner_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
