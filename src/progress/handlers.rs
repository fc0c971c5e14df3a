use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::state::AppState;

use super::dto::{AddMeasurementRequest, AddPrRequest, AddWeightRequest, WeightsQuery};
use super::repo::{MeasurementEntry, PrEntry, ProgressJournal, WeightEntry};
use super::services;

pub fn progress_routes() -> Router<AppState> {
    Router::new()
        .route("/progress", get(get_journal))
        .route("/progress/weights", get(list_weights).post(add_weight))
        .route("/progress/measurements", post(add_measurement))
        .route("/progress/prs", post(add_pr))
}

#[instrument(skip(state))]
async fn get_journal(State(state): State<AppState>) -> Json<ProgressJournal> {
    Json(services::journal(&state.kv()).await)
}

#[instrument(skip(state))]
async fn list_weights(
    State(state): State<AppState>,
    Query(q): Query<WeightsQuery>,
) -> Json<Vec<WeightEntry>> {
    Json(services::recent_weights(&state.kv(), q.limit).await)
}

#[instrument(skip(state, payload))]
async fn add_weight(
    State(state): State<AppState>,
    Json(payload): Json<AddWeightRequest>,
) -> Result<(StatusCode, Json<WeightEntry>), (StatusCode, String)> {
    if !payload.value.is_finite() || payload.value <= 0.0 {
        return Err((StatusCode::BAD_REQUEST, "Weight must be positive".into()));
    }
    let entry = services::add_weight(&state.kv(), payload.value)
        .await
        .map_err(internal)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[instrument(skip(state, payload))]
async fn add_measurement(
    State(state): State<AppState>,
    Json(payload): Json<AddMeasurementRequest>,
) -> Result<(StatusCode, Json<MeasurementEntry>), (StatusCode, String)> {
    let entry = services::add_measurement(&state.kv(), payload.waist, payload.chest)
        .await
        .map_err(internal)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[instrument(skip(state, payload))]
async fn add_pr(
    State(state): State<AppState>,
    Json(payload): Json<AddPrRequest>,
) -> Result<(StatusCode, Json<PrEntry>), (StatusCode, String)> {
    let entry = services::add_pr(&state.kv(), payload.squat, payload.bench, payload.deadlift)
        .await
        .map_err(internal)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
