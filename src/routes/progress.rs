// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Progress chart routes.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::services::{ProgressChart, ProgressSeries};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/progress/{tracked_exercise_id}", get(get_chart))
        .route("/progress/series/{repetition_id}", get(get_series))
}

async fn get_chart(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(tracked_exercise_id): Path<String>,
) -> Result<Json<ProgressChart>> {
    Ok(Json(
        state
            .progress
            .chart(&user.owner_id, &tracked_exercise_id)
            .await?,
    ))
}

async fn get_series(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(repetition_id): Path<String>,
) -> Result<Json<ProgressSeries>> {
    Ok(Json(
        state
            .progress
            .series(&user.owner_id, &repetition_id)
            .await?,
    ))
}
