//! Handlers for the `/sessions` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use impulsa_core::booking::{validate_duration, DEFAULT_SESSION_DURATION_MINUTES};
use impulsa_core::error::CoreError;
use impulsa_core::scheduling;
use impulsa_core::status::{validate_session_transition, SessionStatus};
use impulsa_core::types::DbId;
use impulsa_db::models::session::{CreateSession, SessionListQuery, UpdateSessionStatus};
use impulsa_db::repositories::{AssignmentRepo, SessionRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/sessions
///
/// Administrative single-session create, outside the bulk generator.
pub async fn create_session(
    State(state): State<AppState>,
    Json(input): Json<CreateSession>,
) -> AppResult<impl IntoResponse> {
    let assignment = AssignmentRepo::find_by_id(&state.pool, input.assignment_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Assignment",
            id: input.assignment_id,
        })?;

    let date = scheduling::parse_date(&input.date)?;
    let time = scheduling::parse_time(&input.time)?;
    let scheduled_at = date.and_time(time).and_utc();

    let duration = input
        .duration_minutes
        .unwrap_or(DEFAULT_SESSION_DURATION_MINUTES);
    validate_duration(duration)?;

    let status = match input.status.as_deref() {
        Some(raw) => raw.parse::<SessionStatus>()?,
        None => SessionStatus::Scheduled,
    };

    let session = SessionRepo::create(
        &state.pool,
        assignment.id,
        scheduled_at,
        duration,
        status.as_str(),
        input.notes.as_deref(),
    )
    .await?;

    tracing::info!(
        session_id = session.id,
        assignment_id = assignment.id,
        scheduled_at = %session.scheduled_at,
        "Session created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: session })))
}

/// GET /api/v1/sessions
///
/// List sessions in scheduled order, filtered by `assignment_id` or
/// `customer_id`.
pub async fn list_sessions(
    State(state): State<AppState>,
    Query(params): Query<SessionListQuery>,
) -> AppResult<impl IntoResponse> {
    let sessions = SessionRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: sessions }))
}

/// GET /api/v1/sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let session = SessionRepo::find_by_id(&state.pool, session_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Session",
            id: session_id,
        })?;
    Ok(Json(DataResponse { data: session }))
}

/// POST /api/v1/sessions/{id}/status
///
/// Write a new session status. Membership in the known value set is always
/// checked; the strict transition graph applies only when the server runs
/// with `STRICT_SESSION_TRANSITIONS` enabled.
pub async fn update_session_status(
    State(state): State<AppState>,
    Path(session_id): Path<DbId>,
    Json(input): Json<UpdateSessionStatus>,
) -> AppResult<impl IntoResponse> {
    let new_status: SessionStatus = input.status.parse()?;

    let session = SessionRepo::find_by_id(&state.pool, session_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Session",
            id: session_id,
        })?;

    let current: SessionStatus = session.status.parse().map_err(|_| {
        AppError::InternalError(format!(
            "Session {session_id} holds unknown status '{}'",
            session.status
        ))
    })?;
    validate_session_transition(current, new_status, state.config.strict_session_transitions)?;

    let session = SessionRepo::update_status(
        &state.pool,
        session_id,
        new_status.as_str(),
        input.employee_notes.as_deref(),
    )
    .await?
    .ok_or(CoreError::NotFound {
        entity: "Session",
        id: session_id,
    })?;

    tracing::info!(session_id, status = %new_status, "Session status updated");
    Ok(Json(DataResponse { data: session }))
}
