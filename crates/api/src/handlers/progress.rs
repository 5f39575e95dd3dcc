//! Progress read path for client dashboards and audit views.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use impulsa_core::error::CoreError;
use impulsa_core::progress;
use impulsa_core::types::DbId;
use impulsa_db::repositories::{CustomerRepo, SessionRepo};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Payload for `GET /api/v1/customers/{id}/progress`.
#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub customer_id: DbId,
    pub total: i64,
    pub completed: i64,
    pub scheduled_or_confirmed: i64,
    /// One-decimal display figure, e.g. `33.3`.
    pub progress_percent: f64,
    /// Whole-percent figure for consumers that want an integer.
    pub progress_percent_rounded: i64,
}

/// GET /api/v1/customers/{id}/progress
///
/// Completion across *all* of the customer's assignments — deliberately a
/// cross-service aggregate, not a per-plan figure. A customer with no
/// sessions reports 0%.
pub async fn get_progress(
    State(state): State<AppState>,
    Path(customer_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    CustomerRepo::find_by_id(&state.pool, customer_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Customer",
            id: customer_id,
        })?;

    let counts = SessionRepo::count_by_customer(&state.pool, customer_id).await?;
    let percent = progress::percent(counts.completed, counts.total);

    Ok(Json(DataResponse {
        data: ProgressResponse {
            customer_id,
            total: counts.total,
            completed: counts.completed,
            scheduled_or_confirmed: counts.scheduled_or_confirmed,
            progress_percent: progress::round_display(percent),
            progress_percent_rounded: progress::round_whole(percent),
        },
    }))
}
