use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::sessions;
use crate::state::AppState;

/// Session routes, mounted under `/api/v1/sessions`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(sessions::create_session).get(sessions::list_sessions))
        .route("/{id}", get(sessions::get_session))
        .route("/{id}/status", post(sessions::update_session_status))
}
