mod dto;
pub mod handlers;
pub mod repo;
pub mod services;
pub mod subscription;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::session_routes()
}
