//! Integration tests for the `/sessions` resource.

mod common;

use axum::http::StatusCode;
use common::{assert_error, body_json, get, post_json, seed_customer, seed_employee, service_id};
use serde_json::json;
use sqlx::PgPool;

/// Seed a customer, a tutor, and an active assignment between them.
async fn seed_assignment(pool: &PgPool) -> i64 {
    let customer = seed_customer(pool, "Maria Lopez", "maria@example.com").await;
    let tutor = seed_employee(pool, "Ana", "ana@example.com", "tutor").await;
    let service = service_id(pool, "tutoring").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/assignments",
        json!({ "customer_id": customer, "employee_id": tutor, "service_id": service }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn create_session(pool: &PgPool, assignment_id: i64) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/sessions",
        json!({
            "assignment_id": assignment_id,
            "date": "2027-03-01",
            "time": "14:00"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_session_defaults_to_scheduled_and_sixty_minutes(pool: PgPool) {
    let assignment = seed_assignment(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/sessions",
        json!({
            "assignment_id": assignment,
            "date": "2027-03-01",
            "time": "14:00"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "scheduled");
    assert_eq!(json["data"]["duration_minutes"], 60);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_session_rejects_unknown_assignment(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/sessions",
        json!({ "assignment_id": 999999, "date": "2027-03-01", "time": "14:00" }),
    )
    .await;
    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_session_rejects_out_of_range_duration(pool: PgPool) {
    let assignment = seed_assignment(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/sessions",
        json!({
            "assignment_id": assignment,
            "date": "2027-03-01",
            "time": "14:00",
            "duration_minutes": 5
        }),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_session_rejects_malformed_date(pool: PgPool) {
    let assignment = seed_assignment(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/sessions",
        json!({ "assignment_id": assignment, "date": "03/01/2027", "time": "14:00" }),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn list_sessions_filters_by_assignment(pool: PgPool) {
    let assignment = seed_assignment(&pool).await;
    create_session(&pool, assignment).await;
    create_session(&pool, assignment).await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/sessions?assignment_id={assignment}")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn get_nonexistent_session_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/sessions/999999").await;
    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

// ---------------------------------------------------------------------------
// Status updates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn permissive_mode_allows_any_known_status_pair(pool: PgPool) {
    let assignment = seed_assignment(&pool).await;
    let session = create_session(&pool, assignment).await;

    // scheduled -> completed skips 'confirmed'; fine by default.
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/sessions/{session}/status"),
        json!({ "status": "completed" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // And back again.
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/sessions/{session}/status"),
        json!({ "status": "scheduled" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "scheduled");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn status_update_rejects_unknown_value(pool: PgPool) {
    let assignment = seed_assignment(&pool).await;
    let session = create_session(&pool, assignment).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/sessions/{session}/status"),
        json!({ "status": "teleported" }),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn status_update_records_employee_notes(pool: PgPool) {
    let assignment = seed_assignment(&pool).await;
    let session = create_session(&pool, assignment).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/sessions/{session}/status"),
        json!({ "status": "completed", "employee_notes": "Covered fractions" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["employee_notes"], "Covered fractions");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn status_update_without_notes_keeps_existing_notes(pool: PgPool) {
    let assignment = seed_assignment(&pool).await;
    let session = create_session(&pool, assignment).await;

    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        &format!("/api/v1/sessions/{session}/status"),
        json!({ "status": "confirmed", "employee_notes": "Covered fractions" }),
    )
    .await;

    // A later write with no notes must not blank them.
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/sessions/{session}/status"),
        json!({ "status": "completed" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["employee_notes"], "Covered fractions");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn strict_mode_rejects_skipping_confirmation(pool: PgPool) {
    let assignment = seed_assignment(&pool).await;
    let session = create_session(&pool, assignment).await;

    // scheduled -> completed skips 'confirmed', illegal under the graph.
    let app = common::build_strict_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/sessions/{session}/status"),
        json!({ "status": "completed" }),
    )
    .await;
    assert_error(response, StatusCode::CONFLICT, "CONFLICT").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn strict_mode_rejects_leaving_a_terminal_status(pool: PgPool) {
    let assignment = seed_assignment(&pool).await;
    let session = create_session(&pool, assignment).await;

    for status in ["confirmed", "completed"] {
        let app = common::build_strict_test_app(pool.clone());
        post_json(
            app,
            &format!("/api/v1/sessions/{session}/status"),
            json!({ "status": status }),
        )
        .await;
    }

    // completed is terminal under the strict graph.
    let app = common::build_strict_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/sessions/{session}/status"),
        json!({ "status": "scheduled" }),
    )
    .await;
    assert_error(response, StatusCode::CONFLICT, "CONFLICT").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn strict_mode_allows_the_normal_path(pool: PgPool) {
    let assignment = seed_assignment(&pool).await;
    let session = create_session(&pool, assignment).await;

    for status in ["confirmed", "completed"] {
        let app = common::build_strict_test_app(pool.clone());
        let response = post_json(
            app,
            &format!("/api/v1/sessions/{session}/status"),
            json!({ "status": status }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK, "transition to {status}");
    }
}
