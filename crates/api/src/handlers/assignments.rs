//! Handlers for the `/assignments` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use impulsa_core::error::CoreError;
use impulsa_core::types::DbId;
use impulsa_db::models::assignment::CreateAssignment;
use impulsa_db::repositories::{AssignmentRepo, CatalogRepo, CustomerRepo, EmployeeRepo};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /api/v1/assignments`.
#[derive(Debug, Deserialize)]
pub struct AssignmentListQuery {
    pub customer_id: DbId,
}

/// GET /api/v1/assignments?customer_id=N
pub async fn list_assignments(
    State(state): State<AppState>,
    Query(params): Query<AssignmentListQuery>,
) -> AppResult<impl IntoResponse> {
    let assignments = AssignmentRepo::list_by_customer(&state.pool, params.customer_id).await?;
    Ok(Json(DataResponse { data: assignments }))
}

/// POST /api/v1/assignments
///
/// Administrative create with find-or-create semantics: an existing active
/// assignment for the triple is returned instead of duplicated.
pub async fn create_assignment(
    State(state): State<AppState>,
    Json(input): Json<CreateAssignment>,
) -> AppResult<impl IntoResponse> {
    CustomerRepo::find_by_id(&state.pool, input.customer_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Customer",
            id: input.customer_id,
        })?;
    EmployeeRepo::find_by_id(&state.pool, input.employee_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Employee",
            id: input.employee_id,
        })?;
    CatalogRepo::find_service_by_id(&state.pool, input.service_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Service",
            id: input.service_id,
        })?;

    let assignment = AssignmentRepo::find_or_create(
        &state.pool,
        input.customer_id,
        input.employee_id,
        input.service_id,
        input.notes.as_deref(),
    )
    .await?;

    tracing::info!(
        assignment_id = assignment.id,
        customer_id = assignment.customer_id,
        employee_id = assignment.employee_id,
        "Assignment created or reused",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: assignment })))
}

/// POST /api/v1/assignments/{id}/deactivate
///
/// Soft-deactivate; sessions under the assignment are untouched.
pub async fn deactivate_assignment(
    State(state): State<AppState>,
    Path(assignment_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let assignment = AssignmentRepo::deactivate(&state.pool, assignment_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Assignment",
            id: assignment_id,
        })?;

    tracing::info!(assignment_id, "Assignment deactivated");
    Ok(Json(DataResponse { data: assignment }))
}
