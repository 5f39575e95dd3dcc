//! Integration tests for the `/assignments` resource.

mod common;

use axum::http::StatusCode;
use common::{assert_error, body_json, get, post_json, seed_customer, seed_employee, service_id};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn create_assignment_returns_201(pool: PgPool) {
    let customer = seed_customer(&pool, "Maria Lopez", "maria@example.com").await;
    let tutor = seed_employee(&pool, "Ana", "ana@example.com", "tutor").await;
    let service = service_id(&pool, "tutoring").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/assignments",
        json!({ "customer_id": customer, "employee_id": tutor, "service_id": service }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["customer_id"], customer);
    assert_eq!(json["data"]["is_active"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_assignment_is_find_or_create(pool: PgPool) {
    let customer = seed_customer(&pool, "Maria Lopez", "maria@example.com").await;
    let tutor = seed_employee(&pool, "Ana", "ana@example.com", "tutor").await;
    let service = service_id(&pool, "tutoring").await;
    let body = json!({ "customer_id": customer, "employee_id": tutor, "service_id": service });

    let app = common::build_test_app(pool.clone());
    let first = body_json(post_json(app, "/api/v1/assignments", body.clone()).await).await;

    let app = common::build_test_app(pool);
    let second = body_json(post_json(app, "/api/v1/assignments", body).await).await;

    // Same triple, same row.
    assert_eq!(first["data"]["id"], second["data"]["id"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_assignment_rejects_unknown_customer(pool: PgPool) {
    let tutor = seed_employee(&pool, "Ana", "ana@example.com", "tutor").await;
    let service = service_id(&pool, "tutoring").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/assignments",
        json!({ "customer_id": 999999, "employee_id": tutor, "service_id": service }),
    )
    .await;
    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_assignments_by_customer(pool: PgPool) {
    let customer = seed_customer(&pool, "Maria Lopez", "maria@example.com").await;
    let other = seed_customer(&pool, "Pedro Soto", "pedro@example.com").await;
    let tutor = seed_employee(&pool, "Ana", "ana@example.com", "tutor").await;
    let service = service_id(&pool, "tutoring").await;

    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/assignments",
        json!({ "customer_id": customer, "employee_id": tutor, "service_id": service }),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/assignments?customer_id={customer}")).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/assignments?customer_id={other}")).await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deactivate_assignment_clears_the_active_flag(pool: PgPool) {
    let customer = seed_customer(&pool, "Maria Lopez", "maria@example.com").await;
    let tutor = seed_employee(&pool, "Ana", "ana@example.com", "tutor").await;
    let service = service_id(&pool, "tutoring").await;

    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/v1/assignments",
            json!({ "customer_id": customer, "employee_id": tutor, "service_id": service }),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = post_json(app, &format!("/api/v1/assignments/{id}/deactivate"), json!({})).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["is_active"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deactivate_nonexistent_assignment_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/assignments/999999/deactivate", json!({})).await;
    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}
