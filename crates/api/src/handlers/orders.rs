//! Handlers for the `/orders` resource: client intake and the staff/admin
//! approval flow.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use impulsa_core::booking::{validate_customer_name, validate_email, validate_start_date};
use impulsa_core::error::CoreError;
use impulsa_core::scheduling;
use impulsa_core::status::OrderStatus;
use impulsa_core::types::DbId;
use impulsa_db::models::order::{NewOrder, Order, OrderListQuery, SubmitOrder};
use impulsa_db::repositories::{CatalogRepo, CustomerRepo, OrderRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch an order by ID, returning `NotFound` if absent.
async fn find_order(pool: &impulsa_db::DbPool, order_id: DbId) -> AppResult<Order> {
    OrderRepo::find_by_id(pool, order_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Order",
            id: order_id,
        }))
}

/// Require that the order currently holds `expected` before a flow step.
fn require_status(order: &Order, expected: OrderStatus) -> AppResult<()> {
    if order.status != expected.as_str() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Order {} is '{}', expected '{expected}'",
            order.id, order.status
        ))));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Intake
// ---------------------------------------------------------------------------

/// POST /api/v1/orders
///
/// Client-facing intake. Validates the request, upserts the customer by
/// email, and creates a `pending` order holding the recurrence parameters.
/// Session counts are NOT taken from the request — generation reads them
/// from the matched catalog plan.
pub async fn submit_order(
    State(state): State<AppState>,
    Json(input): Json<SubmitOrder>,
) -> AppResult<impl IntoResponse> {
    validate_customer_name(&input.name)?;
    validate_email(&input.email)?;

    let service = CatalogRepo::find_service_by_slug(&state.pool, &input.service)
        .await?
        .ok_or_else(|| CoreError::NotFoundByName {
            entity: "Service",
            name: input.service.clone(),
        })?;
    let price = CatalogRepo::find_price(&state.pool, service.id, &input.plan)
        .await?
        .ok_or_else(|| CoreError::NotFoundByName {
            entity: "Plan",
            name: format!("{}/{}", input.service, input.plan),
        })?;

    let today = Utc::now().date_naive();

    // Parse whichever recurrence shape the plan uses. Parsing failures come
    // back as structured validation errors naming the bad field.
    let start_date = input
        .start_date
        .as_deref()
        .map(scheduling::parse_date)
        .transpose()?;
    if let Some(date) = start_date {
        validate_start_date(date, today)?;
    }
    let preferred_time = input
        .preferred_time
        .as_deref()
        .map(scheduling::parse_time)
        .transpose()?;
    if let Some(tokens) = input.preferred_weekdays.as_deref() {
        // Validate the tokens now; the order stores them verbatim so the
        // rotation order survives round-tripping.
        scheduling::parse_weekdays(tokens)?;
    }

    let tutor_start_date = input
        .tutor_start_date
        .as_deref()
        .map(scheduling::parse_date)
        .transpose()?;
    if let Some(date) = tutor_start_date {
        validate_start_date(date, today)?;
    }
    let tutor_time = input
        .tutor_time
        .as_deref()
        .map(scheduling::parse_time)
        .transpose()?;

    let therapist_start_date = input
        .therapist_start_date
        .as_deref()
        .map(scheduling::parse_date)
        .transpose()?;
    if let Some(date) = therapist_start_date {
        validate_start_date(date, today)?;
    }
    let therapist_time = input
        .therapist_time
        .as_deref()
        .map(scheduling::parse_time)
        .transpose()?;

    let customer = CustomerRepo::upsert_by_email(
        &state.pool,
        input.name.trim(),
        input.email.trim(),
        input.phone.as_deref(),
    )
    .await?;

    let order = OrderRepo::create(
        &state.pool,
        &NewOrder {
            customer_id: customer.id,
            service_id: service.id,
            price_id: price.id,
            notes: input.message.clone(),
            employee_id: input.employee_id,
            start_date,
            preferred_weekdays: input.preferred_weekdays.clone(),
            preferred_time,
            tutor_id: input.tutor_id,
            tutor_start_date,
            tutor_time,
            therapist_id: input.therapist_id,
            therapist_start_date,
            therapist_time,
        },
    )
    .await?;

    tracing::info!(
        order_id = order.id,
        customer_id = customer.id,
        service = %service.slug,
        plan = %price.plan,
        "Order submitted",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: order })))
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/v1/orders
///
/// List orders, newest first. Supports optional `status`, `limit`, and
/// `offset` query parameters.
pub async fn list_orders(
    State(state): State<AppState>,
    Query(params): Query<OrderListQuery>,
) -> AppResult<impl IntoResponse> {
    if let Some(status) = params.status.as_deref() {
        status.parse::<OrderStatus>()?;
    }
    let orders = OrderRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: orders }))
}

/// GET /api/v1/orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let order = find_order(&state.pool, order_id).await?;
    Ok(Json(DataResponse { data: order }))
}

// ---------------------------------------------------------------------------
// Approval flow
// ---------------------------------------------------------------------------

/// Body for `POST /api/v1/orders/{id}/approve`.
#[derive(Debug, Deserialize)]
pub struct ApproveOrder {
    /// Optionally pin the single-track employee while approving.
    pub employee_id: Option<DbId>,
}

/// POST /api/v1/orders/{id}/approve — admin approval, `pending` → `confirmed`.
pub async fn approve_order(
    State(state): State<AppState>,
    Path(order_id): Path<DbId>,
    Json(input): Json<ApproveOrder>,
) -> AppResult<impl IntoResponse> {
    let order = find_order(&state.pool, order_id).await?;
    require_status(&order, OrderStatus::Pending)?;

    let order = OrderRepo::approve(&state.pool, order_id, input.employee_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Order",
            id: order_id,
        })?;

    tracing::info!(order_id, "Order approved");
    Ok(Json(DataResponse { data: order }))
}

/// POST /api/v1/orders/{id}/accept — assigned staff accepts, `confirmed` →
/// `in_progress`.
pub async fn accept_order(
    State(state): State<AppState>,
    Path(order_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let order = find_order(&state.pool, order_id).await?;
    require_status(&order, OrderStatus::Confirmed)?;

    let order = OrderRepo::update_status(&state.pool, order_id, OrderStatus::InProgress.as_str())
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Order",
            id: order_id,
        })?;

    tracing::info!(order_id, "Order accepted by staff");
    Ok(Json(DataResponse { data: order }))
}

/// Body for `POST /api/v1/orders/{id}/reject`.
#[derive(Debug, Deserialize)]
pub struct RejectOrder {
    pub reason: String,
}

/// POST /api/v1/orders/{id}/reject — assigned staff declines, `confirmed` →
/// `pending`; staff references cleared, reason appended to the notes.
pub async fn reject_order(
    State(state): State<AppState>,
    Path(order_id): Path<DbId>,
    Json(input): Json<RejectOrder>,
) -> AppResult<impl IntoResponse> {
    if input.reason.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "A rejection reason is required".to_string(),
        )));
    }

    let order = find_order(&state.pool, order_id).await?;
    require_status(&order, OrderStatus::Confirmed)?;

    let order = OrderRepo::reject(&state.pool, order_id, input.reason.trim())
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Order",
            id: order_id,
        })?;

    tracing::info!(order_id, "Order rejected by staff");
    Ok(Json(DataResponse { data: order }))
}

/// Body for `POST /api/v1/orders/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatus {
    pub status: String,
}

/// POST /api/v1/orders/{id}/status — administrative status write (terminal
/// `completed`/`cancelled` transitions included).
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(order_id): Path<DbId>,
    Json(input): Json<UpdateOrderStatus>,
) -> AppResult<impl IntoResponse> {
    let status: OrderStatus = input.status.parse()?;

    let order = OrderRepo::update_status(&state.pool, order_id, status.as_str())
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Order",
            id: order_id,
        })?;

    tracing::info!(order_id, status = %status, "Order status updated");
    Ok(Json(DataResponse { data: order }))
}
