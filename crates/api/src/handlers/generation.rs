//! One-shot session generation for an approved order.
//!
//! The handler resolves everything up front — order, catalog counts, staff,
//! recurrence parameters — computes every track's calendar in
//! `impulsa_core::scheduling`, and only then asks [`GenerationRepo`] to
//! commit. Validation failures leave no partial state; the commit itself is
//! a single transaction guarded by a row lock on the order.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Datelike, NaiveDate, NaiveTime, Utc, Weekday};
use serde::Serialize;

use impulsa_core::booking::validate_start_date;
use impulsa_core::error::CoreError;
use impulsa_core::roles::{required_role, ROLE_PSYCHOLOGIST, ROLE_TUTOR, SERVICE_THERAPY, SERVICE_TUTORING};
use impulsa_core::scheduling::{self, weekday_name, RecurrenceSpec};
use impulsa_core::types::DbId;
use impulsa_db::models::catalog::Price;
use impulsa_db::models::customer::Customer;
use impulsa_db::models::order::Order;
use impulsa_db::repositories::{
    CatalogRepo, CommitResult, CustomerRepo, EmployeeRepo, GenerationRepo, PlannedTrack,
};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response payload
// ---------------------------------------------------------------------------

/// One created session in the success payload.
#[derive(Debug, Serialize)]
pub struct GeneratedSession {
    pub id: DbId,
    /// ISO date, e.g. `2026-09-07`.
    pub date: String,
    /// `HH:MM`.
    pub time: String,
    /// English weekday name, e.g. `Monday`.
    pub weekday: &'static str,
}

/// One committed track in the success payload.
#[derive(Debug, Serialize)]
pub struct GeneratedTrack {
    pub label: String,
    pub assignment_id: DbId,
    pub sessions: Vec<GeneratedSession>,
}

/// Success payload for `POST /api/v1/orders/{id}/generate`.
#[derive(Debug, Serialize)]
pub struct GenerationResponse {
    pub order_id: DbId,
    pub customer: Customer,
    pub tracks: Vec<GeneratedTrack>,
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// POST /api/v1/orders/{id}/generate
///
/// Materialize every session for the order. One-shot: a second call gets
/// 409 and writes nothing.
pub async fn generate_sessions(
    State(state): State<AppState>,
    Path(order_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let order = fetch_order(&state.pool, order_id).await?;

    if order.sessions_generated {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Sessions already generated for order {order_id}"
        ))));
    }

    let price = CatalogRepo::find_price_by_id(&state.pool, order.price_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Price",
            id: order.price_id,
        })?;

    let today = Utc::now().date_naive();
    let tracks = if price.is_combined() {
        plan_combined(&state, &order, &price, today).await?
    } else {
        vec![plan_single(&state, &order, &price, today).await?]
    };

    let result = GenerationRepo::commit(&state.pool, order.id, order.customer_id, &tracks).await?;
    let committed = match result {
        CommitResult::Committed(committed) => committed,
        // A concurrent caller won the row lock race.
        CommitResult::AlreadyGenerated => {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Sessions already generated for order {order_id}"
            ))));
        }
    };

    let customer = CustomerRepo::find_by_id(&state.pool, order.customer_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Customer",
            id: order.customer_id,
        })?;

    let tracks = committed
        .into_iter()
        .map(|track| GeneratedTrack {
            label: track.label,
            assignment_id: track.assignment.id,
            sessions: track
                .sessions
                .iter()
                .map(|session| {
                    let local = session.scheduled_at.naive_utc();
                    GeneratedSession {
                        id: session.id,
                        date: local.date().format("%Y-%m-%d").to_string(),
                        time: local.time().format("%H:%M").to_string(),
                        weekday: weekday_name(local.date().weekday()),
                    }
                })
                .collect(),
        })
        .collect();

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: GenerationResponse {
                order_id: order.id,
                customer,
                tracks,
            },
        }),
    ))
}

// ---------------------------------------------------------------------------
// Track planning
// ---------------------------------------------------------------------------

/// Plan the single recurrence stream of a standard order.
async fn plan_single(
    state: &AppState,
    order: &Order,
    price: &Price,
    today: NaiveDate,
) -> AppResult<PlannedTrack> {
    let service = CatalogRepo::find_service_by_id(&state.pool, order.service_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Service",
            id: order.service_id,
        })?;

    let employee_id = order
        .employee_id
        .ok_or_else(|| CoreError::Validation("No employee assigned to the order".to_string()))?;
    resolve_staff(state, employee_id, required_role(&service.slug), "employee").await?;

    let start_date = order
        .start_date
        .ok_or_else(|| CoreError::Validation("Order has no start date".to_string()))?;
    validate_start_date(start_date, today)?;

    let tokens = order
        .preferred_weekdays
        .as_deref()
        .ok_or_else(|| CoreError::Validation("Order has no preferred weekdays".to_string()))?;
    let weekdays = scheduling::parse_weekdays(tokens)?;

    let time = order
        .preferred_time
        .ok_or_else(|| CoreError::Validation("Order has no preferred time".to_string()))?;

    // The catalog, never the client, decides how many sessions a plan gets.
    let count = price.session_count.ok_or_else(|| {
        CoreError::Internal(format!("Price {} has no session count", price.id))
    })?;

    plan_track(service.slug.clone(), service.id, employee_id, start_date, weekdays, time, count)
}

/// Plan both streams of a combined plan. Both tracks are validated before
/// either is returned, so a bad therapist reference fails the whole request
/// before any tutoring session exists.
async fn plan_combined(
    state: &AppState,
    order: &Order,
    price: &Price,
    today: NaiveDate,
) -> AppResult<Vec<PlannedTrack>> {
    let tutoring = CatalogRepo::find_service_by_slug(&state.pool, SERVICE_TUTORING)
        .await?
        .ok_or_else(|| CoreError::Internal("Tutoring service missing from catalog".to_string()))?;
    let therapy = CatalogRepo::find_service_by_slug(&state.pool, SERVICE_THERAPY)
        .await?
        .ok_or_else(|| CoreError::Internal("Therapy service missing from catalog".to_string()))?;

    let tutor_id = order
        .tutor_id
        .ok_or_else(|| CoreError::Validation("No tutor assigned to the order".to_string()))?;
    resolve_staff(state, tutor_id, Some(ROLE_TUTOR), "tutor").await?;

    let therapist_id = order
        .therapist_id
        .ok_or_else(|| CoreError::Validation("No therapist assigned to the order".to_string()))?;
    resolve_staff(state, therapist_id, Some(ROLE_PSYCHOLOGIST), "therapist").await?;

    let tutor_start = order
        .tutor_start_date
        .ok_or_else(|| CoreError::Validation("Order has no tutoring start date".to_string()))?;
    validate_start_date(tutor_start, today)?;
    let tutor_time = order
        .tutor_time
        .ok_or_else(|| CoreError::Validation("Order has no tutoring time".to_string()))?;

    let therapist_start = order
        .therapist_start_date
        .ok_or_else(|| CoreError::Validation("Order has no therapy start date".to_string()))?;
    validate_start_date(therapist_start, today)?;
    let therapist_time = order
        .therapist_time
        .ok_or_else(|| CoreError::Validation("Order has no therapy time".to_string()))?;

    let tutoring_count = price.tutoring_session_count.ok_or_else(|| {
        CoreError::Internal(format!("Price {} has no tutoring session count", price.id))
    })?;
    let therapy_count = price.therapy_session_count.ok_or_else(|| {
        CoreError::Internal(format!("Price {} has no therapy session count", price.id))
    })?;

    // Combined-plan tracks recur weekly on their own start weekday.
    let tutoring_track = plan_track(
        SERVICE_TUTORING.to_string(),
        tutoring.id,
        tutor_id,
        tutor_start,
        vec![tutor_start.weekday()],
        tutor_time,
        tutoring_count,
    )?;
    let therapy_track = plan_track(
        SERVICE_THERAPY.to_string(),
        therapy.id,
        therapist_id,
        therapist_start,
        vec![therapist_start.weekday()],
        therapist_time,
        therapy_count,
    )?;

    Ok(vec![tutoring_track, therapy_track])
}

/// Run the core date math for one track and package the result.
fn plan_track(
    label: String,
    service_id: DbId,
    employee_id: DbId,
    start_date: NaiveDate,
    weekdays: Vec<Weekday>,
    time: NaiveTime,
    count: i32,
) -> AppResult<PlannedTrack> {
    let count = u32::try_from(count).map_err(|_| {
        CoreError::Validation(format!("Invalid session count: {count}"))
    })?;

    let spec = RecurrenceSpec {
        start_date,
        weekdays,
        time,
        count,
    };
    let occurrences = scheduling::plan_occurrences(&spec)?
        .into_iter()
        .map(|naive| naive.and_utc())
        .collect();

    Ok(PlannedTrack {
        label,
        service_id,
        employee_id,
        occurrences,
    })
}

/// Resolve a staff reference: the employee must exist, be active, and (when
/// the track requires one) carry the expected role.
async fn resolve_staff(
    state: &AppState,
    employee_id: DbId,
    expected_role: Option<&'static str>,
    field: &str,
) -> AppResult<()> {
    let employee = EmployeeRepo::find_by_id(&state.pool, employee_id)
        .await?
        .ok_or_else(|| {
            CoreError::Validation(format!("Unknown {field}: no employee with id {employee_id}"))
        })?;

    if !employee.is_active {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Employee {} ({field}) is not active",
            employee.id
        ))));
    }
    if let Some(role) = expected_role {
        if employee.role != role {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Employee {} ({field}) has role '{}', expected '{role}'",
                employee.id, employee.role
            ))));
        }
    }
    Ok(())
}

/// Fetch an order or return `NotFound`.
async fn fetch_order(pool: &impulsa_db::DbPool, order_id: DbId) -> AppResult<Order> {
    impulsa_db::repositories::OrderRepo::find_by_id(pool, order_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Order",
            id: order_id,
        }))
}
