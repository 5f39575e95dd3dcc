use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::assignments;
use crate::state::AppState;

/// Assignment routes, mounted under `/api/v1/assignments`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(assignments::list_assignments).post(assignments::create_assignment),
        )
        .route("/{id}/deactivate", post(assignments::deactivate_assignment))
}
