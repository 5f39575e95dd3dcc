pub mod assignments;
pub mod catalog;
pub mod customers;
pub mod health;
pub mod orders;
pub mod sessions;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /catalog/services                     list services
/// /catalog/services/{slug}/plans        plans under a service
///
/// /orders                               intake (POST), list (GET)
/// /orders/{id}                          detail
/// /orders/{id}/approve                  admin approval
/// /orders/{id}/generate                 one-shot session generation
/// /orders/{id}/accept                   staff accepts
/// /orders/{id}/reject                   staff declines (reason required)
/// /orders/{id}/status                   admin status write
///
/// /sessions                             admin create (POST), list (GET)
/// /sessions/{id}                        detail
/// /sessions/{id}/status                 status write
///
/// /assignments                          list by customer (GET), admin create (POST)
/// /assignments/{id}/deactivate          soft deactivate
///
/// /customers/{id}/progress              completion aggregate
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/catalog", catalog::router())
        .nest("/orders", orders::router())
        .nest("/sessions", sessions::router())
        .nest("/assignments", assignments::router())
        .nest("/customers", customers::router())
}
