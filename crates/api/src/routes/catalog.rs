use axum::{routing::get, Router};

use crate::handlers::catalog;
use crate::state::AppState;

/// Catalog routes, mounted under `/api/v1/catalog`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/services", get(catalog::list_services))
        .route("/services/{slug}/plans", get(catalog::list_plans))
}
