use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{generation, orders};
use crate::state::AppState;

/// Order lifecycle routes, mounted under `/api/v1/orders`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::submit_order).get(orders::list_orders))
        .route("/{id}", get(orders::get_order))
        .route("/{id}/approve", post(orders::approve_order))
        .route("/{id}/generate", post(generation::generate_sessions))
        .route("/{id}/accept", post(orders::accept_order))
        .route("/{id}/reject", post(orders::reject_order))
        .route("/{id}/status", post(orders::update_order_status))
}
