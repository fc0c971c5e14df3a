use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::state::AppState;

use super::dto::{PlanFilter, ProgramFilter, ProgramView};
use super::repo_types::{Goal, Plan, SampleDay, Sport};
use super::services::CatalogError;

pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/catalog/sports", get(list_sports))
        .route("/catalog/sports/:id", get(get_sport))
        .route("/catalog/sports/:id/sample-day", get(get_sample_day))
        .route("/catalog/programs", get(list_programs))
        .route("/catalog/nutrition/goals", get(list_goals))
        .route("/catalog/nutrition/goals/:goal_id/plans", get(list_plans))
        .route(
            "/catalog/nutrition/goals/:goal_id/plans/:plan_id",
            get(get_plan),
        )
}

#[instrument(skip(state))]
async fn list_sports(
    State(state): State<AppState>,
) -> Result<Json<Vec<Sport>>, (StatusCode, String)> {
    let sports = state.catalog.sports().await.map_err(unavailable)?;
    Ok(Json(sports))
}

#[instrument(skip(state))]
async fn get_sport(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Sport>, (StatusCode, String)> {
    match state.catalog.sport_by_id(&id).await.map_err(unavailable)? {
        Some(sport) => Ok(Json(sport)),
        None => Err((StatusCode::NOT_FOUND, "Sport not found".into())),
    }
}

#[instrument(skip(state))]
async fn get_sample_day(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SampleDay>, (StatusCode, String)> {
    match state.catalog.sample_day(&id).await.map_err(unavailable)? {
        Some(day) => Ok(Json(day)),
        None => Err((StatusCode::NOT_FOUND, "No sample day for this sport".into())),
    }
}

#[instrument(skip(state))]
async fn list_programs(
    State(state): State<AppState>,
    Query(filter): Query<ProgramFilter>,
) -> Result<Json<Vec<ProgramView>>, (StatusCode, String)> {
    let items = state
        .catalog
        .all_programs(&filter)
        .await
        .map_err(unavailable)?;
    Ok(Json(items))
}

#[instrument(skip(state))]
async fn list_goals(
    State(state): State<AppState>,
) -> Result<Json<Vec<Goal>>, (StatusCode, String)> {
    let goals = state.catalog.nutrition_goals().await.map_err(unavailable)?;
    Ok(Json(goals))
}

/// Unknown goal ids are not an error; the list is simply empty.
#[instrument(skip(state))]
async fn list_plans(
    State(state): State<AppState>,
    Path(goal_id): Path<String>,
    Query(filter): Query<PlanFilter>,
) -> Result<Json<Vec<Plan>>, (StatusCode, String)> {
    let plans = state
        .catalog
        .nutrition_plans(&goal_id, filter.free)
        .await
        .map_err(unavailable)?;
    Ok(Json(plans))
}

#[instrument(skip(state))]
async fn get_plan(
    State(state): State<AppState>,
    Path((goal_id, plan_id)): Path<(String, String)>,
) -> Result<Json<Plan>, (StatusCode, String)> {
    match state
        .catalog
        .nutrition_plan_by_id(&goal_id, &plan_id)
        .await
        .map_err(unavailable)?
    {
        Some(plan) => Ok(Json(plan)),
        None => Err((StatusCode::NOT_FOUND, "Plan not found".into())),
    }
}

/// A catalog that cannot be loaded is a visible, retryable failure; it must
/// never look like an empty catalog.
fn unavailable(e: CatalogError) -> (StatusCode, String) {
    (StatusCode::SERVICE_UNAVAILABLE, e.to_string())
}
