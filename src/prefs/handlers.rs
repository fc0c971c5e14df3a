use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::state::AppState;

use super::repo::{self, Lang, Theme};

pub fn prefs_routes() -> Router<AppState> {
    Router::new()
        .route("/prefs/lang", get(get_lang).put(put_lang))
        .route("/prefs/theme", get(get_theme).put(put_theme))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LangPref {
    pub lang: Lang,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ThemePref {
    pub theme: Theme,
}

#[instrument(skip(state))]
async fn get_lang(State(state): State<AppState>) -> Json<LangPref> {
    Json(LangPref {
        lang: repo::lang(&state.kv()).await,
    })
}

// Unknown values never reach the repo; serde rejects them at the boundary.
#[instrument(skip(state))]
async fn put_lang(
    State(state): State<AppState>,
    Json(payload): Json<LangPref>,
) -> Result<StatusCode, (StatusCode, String)> {
    repo::set_lang(&state.kv(), payload.lang)
        .await
        .map_err(internal)?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
async fn get_theme(State(state): State<AppState>) -> Json<ThemePref> {
    Json(ThemePref {
        theme: repo::theme(&state.kv()).await,
    })
}

#[instrument(skip(state))]
async fn put_theme(
    State(state): State<AppState>,
    Json(payload): Json<ThemePref>,
) -> Result<StatusCode, (StatusCode, String)> {
    repo::set_theme(&state.kv(), payload.theme)
        .await
        .map_err(internal)?;
    Ok(StatusCode::NO_CONTENT)
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
