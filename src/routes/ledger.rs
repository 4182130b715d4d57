// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tracked exercise, repetition and weight routes.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{
    LogWeight, NewRepetition, NewTrackedExercise, NewWeight, Repetition, RepetitionPatch,
    TrackedExercise, Weight, WeightPatch,
};
use crate::routes::extract::JsonBody;
use crate::services::{FindOrCreate, WeightLog};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/trackedexercises", post(track_exercise))
        .route("/trackedexercises/{owner_id}", get(list_tracked))
        .route("/trackedexercises/delete/{id}", post(delete_tracked))
        .route("/repetitions", post(add_repetition))
        .route("/repetitions/{tracked_exercise_id}", get(list_repetitions))
        .route("/repetitions/put/{id}", post(update_repetition))
        .route("/repetitions/delete/{id}", post(delete_repetition))
        .route("/weight", post(add_weight))
        .route("/weight/{repetition_id}", get(list_weights))
        .route("/weight/put/{id}", post(update_weight))
        .route("/weight/delete/{id}", post(delete_weight))
        .route("/weight/log/{exercise_name}", post(log_weight))
}

// ─── Tracked Exercises ───────────────────────────────────────

async fn list_tracked(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(owner_id): Path<String>,
) -> Result<Json<Vec<TrackedExercise>>> {
    user.ensure_owner(&owner_id)?;
    Ok(Json(state.ledger.list_tracked(&owner_id).await?))
}

/// Idempotent: tracking a name twice returns the first row.
async fn track_exercise(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    JsonBody(request): JsonBody<NewTrackedExercise>,
) -> Result<FindOrCreate<TrackedExercise>> {
    request.validate()?;
    user.ensure_claimed_owner(request.owner_id.as_deref())?;
    state.ledger.track(&user.owner_id, &request.name).await
}

/// Deletes the tracked exercise with its buckets and weights.
async fn delete_tracked(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.ledger.delete_tracked(&user.owner_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ─── Repetitions ─────────────────────────────────────────────

async fn list_repetitions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(tracked_exercise_id): Path<String>,
) -> Result<Json<Vec<Repetition>>> {
    Ok(Json(
        state
            .ledger
            .list_repetitions(&user.owner_id, &tracked_exercise_id)
            .await?,
    ))
}

async fn add_repetition(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    JsonBody(request): JsonBody<NewRepetition>,
) -> Result<FindOrCreate<Repetition>> {
    request.validate()?;
    state
        .ledger
        .add_repetition(&user.owner_id, &request.tracked_exercise_id, request.repetitions)
        .await
}

async fn update_repetition(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<RepetitionPatch>,
) -> Result<Json<Repetition>> {
    Ok(Json(
        state
            .ledger
            .update_repetition(&user.owner_id, &id, patch)
            .await?,
    ))
}

async fn delete_repetition(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.ledger.delete_repetition(&user.owner_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ─── Weights ─────────────────────────────────────────────────

async fn list_weights(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(repetition_id): Path<String>,
) -> Result<Json<Vec<Weight>>> {
    Ok(Json(
        state
            .ledger
            .list_weights(&user.owner_id, &repetition_id)
            .await?,
    ))
}

async fn add_weight(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    JsonBody(entry): JsonBody<NewWeight>,
) -> Result<(StatusCode, Json<Weight>)> {
    let weight = state.ledger.add_weight(&user.owner_id, entry).await?;
    Ok((StatusCode::CREATED, Json(weight)))
}

async fn update_weight(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<WeightPatch>,
) -> Result<Json<Weight>> {
    Ok(Json(
        state.ledger.update_weight(&user.owner_id, &id, patch).await?,
    ))
}

async fn delete_weight(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.ledger.delete_weight(&user.owner_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Composite log: finds or creates the tracked exercise and bucket, then
/// appends the weight.
async fn log_weight(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(exercise_name): Path<String>,
    JsonBody(entry): JsonBody<LogWeight>,
) -> Result<(StatusCode, Json<WeightLog>)> {
    user.ensure_claimed_owner(entry.owner_id.as_deref())?;

    let log = state
        .ledger
        .log_weight(&user.owner_id, &exercise_name, entry)
        .await?;

    tracing::debug!(
        owner_id = %user.owner_id,
        exercise = %exercise_name,
        tracked_exercise_created = log.tracked_exercise_created,
        repetition_created = log.repetition_created,
        "Composite log complete"
    );
    Ok((StatusCode::CREATED, Json(log)))
}
