use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use crate::state::AppState;

use super::dto::{LoginRequest, LoginResponse, PublicSession};
use super::services::{self, is_valid_code, is_valid_name};
use super::subscription::{self, SubscriptionStatus};

pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/session/login", post(login))
        .route("/session/logout", post(logout))
        .route("/session/me", get(me))
        .route("/session/subscription", get(subscription_status))
}

#[instrument(skip(state, payload))]
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, (StatusCode, String)> {
    if !is_valid_name(&payload.name) {
        warn!("login rejected: name too short");
        return Err((StatusCode::BAD_REQUEST, "Name too short".into()));
    }
    if !is_valid_code(payload.code.trim()) {
        warn!("login rejected: invalid member code");
        return Err((StatusCode::BAD_REQUEST, "Invalid member code".into()));
    }

    let outcome = services::login(&state.kv(), &payload.name, &payload.code).await;
    info!(name = %outcome.record.name, persisted = outcome.persisted, "logged in");
    Ok(Json(LoginResponse {
        user: outcome.record.into(),
        persisted: outcome.persisted,
    }))
}

#[instrument(skip(state))]
async fn logout(State(state): State<AppState>) -> StatusCode {
    services::logout(&state.kv()).await;
    info!("logged out");
    StatusCode::NO_CONTENT
}

#[instrument(skip(state))]
async fn me(State(state): State<AppState>) -> Result<Json<PublicSession>, (StatusCode, String)> {
    match services::current_user(&state.kv()).await {
        Some(record) => Ok(Json(record.into())),
        None => Err((StatusCode::UNAUTHORIZED, "No active session".into())),
    }
}

/// Always answers, logged in or not; the guest state is simply inactive.
#[instrument(skip(state))]
async fn subscription_status(State(state): State<AppState>) -> Json<SubscriptionStatus> {
    let record = services::current_user(&state.kv()).await;
    let status = subscription::evaluate(
        record.as_ref(),
        OffsetDateTime::now_utc(),
        state.config.trial_days,
    );
    Json(status)
}
