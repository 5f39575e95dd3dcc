//! Shared helpers for HTTP-level integration tests.
//!
//! Tests drive the real router through `tower::ServiceExt::oneshot`, so the
//! full middleware stack (CORS, request ID, timeout, panic recovery) is
//! exercised without a TCP listener.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use chrono::{Datelike, Days, NaiveDate, Utc, Weekday};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use impulsa_api::config::ServerConfig;
use impulsa_api::router::build_app_router;
use impulsa_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout. Session transitions stay in the default
/// permissive mode.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        strict_session_transitions: false,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Mirrors the construction in `main.rs`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    build_app_with_config(pool, config)
}

/// Same as [`build_test_app`] but with the strict session transition graph
/// enabled.
pub fn build_strict_test_app(pool: PgPool) -> Router {
    let config = ServerConfig {
        strict_session_transitions: true,
        ..test_config()
    };
    build_app_with_config(pool, config)
}

fn build_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request and return the response.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert an error response: check the status and the `code` field of the
/// `{"error", "code"}` body.
pub async fn assert_error(response: Response<Body>, status: StatusCode, code: &str) {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["code"], code, "unexpected error body: {json}");
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------
//
// Migrations seed the service/plan catalog only; employees and customers
// are created per test.

/// Insert an active employee and return its id.
pub async fn seed_employee(pool: &PgPool, name: &str, email: &str, role: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO employees (name, email, role) VALUES ($1, $2, $3) RETURNING id")
        .bind(name)
        .bind(email)
        .bind(role)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Insert an inactive employee and return its id.
pub async fn seed_inactive_employee(pool: &PgPool, name: &str, email: &str, role: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO employees (name, email, role, is_active) VALUES ($1, $2, $3, FALSE) RETURNING id",
    )
    .bind(name)
    .bind(email)
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Insert a customer and return its id.
pub async fn seed_customer(pool: &PgPool, name: &str, email: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO customers (name, email) VALUES ($1, $2) RETURNING id")
        .bind(name)
        .bind(email)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Look up a seeded service id by slug.
pub async fn service_id(pool: &PgPool, slug: &str) -> i64 {
    sqlx::query_scalar("SELECT id FROM services WHERE slug = $1")
        .bind(slug)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Count sessions currently in the database.
pub async fn count_sessions(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Date helpers
// ---------------------------------------------------------------------------

/// The next occurrence of `weekday` strictly after `today`, pushed at least
/// a week out so start-date validation never trips during a slow test run.
pub fn upcoming(weekday: Weekday) -> NaiveDate {
    let today = Utc::now().date_naive();
    let mut date = today
        .checked_add_days(Days::new(7))
        .expect("date overflow");
    while date.weekday() != weekday {
        date = date.checked_add_days(Days::new(1)).expect("date overflow");
    }
    date
}

/// Format a date the way the API expects it (`YYYY-MM-DD`).
pub fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
