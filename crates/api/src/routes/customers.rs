use axum::{routing::get, Router};

use crate::handlers::progress;
use crate::state::AppState;

/// Customer-scoped routes, mounted under `/api/v1/customers`.
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/progress", get(progress::get_progress))
}
