// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout API routes for authenticated users.
//! The auth middleware is applied in routes/mod.rs for these routes.

use crate::error::{AppError, Result};
use crate::models::{parse_object_body, Principal, RecentQuery};
use crate::services::workouts;
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    routing::{get, patch, post},
    Extension, Json, Router,
};
use serde_json::Value;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/workouts/start", post(start_workout))
        .route("/api/workouts/recent", get(recent_workouts))
        .route("/api/workouts/{id}/end", patch(end_workout))
}

/// Start a new workout.
async fn start_workout(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    body: Bytes,
) -> Result<Json<Value>> {
    let body = parse_object_body(&body)?
        .filter(|b| !b.is_empty())
        .ok_or(AppError::BadRequest(AppError::MISSING_BODY))?;

    let workout = workouts::start(&state.store, &principal, &body, &now_rfc3339())
        .await
        .map_err(|e| e.during("start workout"))?;

    Ok(Json(workout))
}

/// Recent workouts for the caller, newest first.
async fn recent_workouts(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Query(params): Query<RecentQuery>,
) -> Result<Json<Value>> {
    tracing::debug!(user_id = %principal.subject, since = ?params.since, "Fetching workouts");

    let since = params.since.as_deref().filter(|s| !s.is_empty());
    let workouts = workouts::recent(&state.store, &principal, since)
        .await
        .map_err(|e| e.during("fetch workouts"))?;

    Ok(Json(workouts))
}

/// End one of the caller's workouts.
async fn end_workout(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(workout_id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>> {
    let body = parse_object_body(&body)?.unwrap_or_default();

    let workout = workouts::end(
        &state.store,
        &principal,
        &workout_id,
        &body,
        &now_rfc3339(),
    )
    .await
    .map_err(|e| e.during("end workout"))?;

    Ok(Json(workout))
}
