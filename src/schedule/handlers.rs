use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use tracing::instrument;

use crate::state::AppState;

use super::dto::{WeekQuery, WeekResponse};
use super::services;

pub fn schedule_routes() -> Router<AppState> {
    Router::new().route("/schedule/week", get(get_week))
}

#[instrument(skip(_state))]
async fn get_week(
    State(_state): State<AppState>,
    Query(q): Query<WeekQuery>,
) -> Result<Json<WeekResponse>, (StatusCode, String)> {
    let anchor = match q.start {
        Some(raw) => Date::parse(&raw, format_description!("[year]-[month]-[day]"))
            .map_err(|_| (StatusCode::BAD_REQUEST, "Expected a YYYY-MM-DD date".to_string()))?,
        None => OffsetDateTime::now_utc().date(),
    };
    let week_start = services::week_start(anchor);
    Ok(Json(WeekResponse {
        week_start,
        days: services::week_days(week_start),
        classes: services::classes_for_week(week_start),
    }))
}
