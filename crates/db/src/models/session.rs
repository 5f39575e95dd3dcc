//! Session entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use impulsa_core::types::{DbId, Timestamp};

/// A row from the `sessions` table — one concrete scheduled appointment.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Session {
    pub id: DbId,
    pub assignment_id: DbId,
    pub scheduled_at: Timestamp,
    pub duration_minutes: i32,
    pub status: String,
    /// Client-visible notes.
    pub notes: Option<String>,
    /// Staff-only notes, never exposed on client-facing reads.
    pub employee_notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for administrative `POST /api/v1/sessions` (single session, outside
/// the bulk generator).
#[derive(Debug, Deserialize)]
pub struct CreateSession {
    pub assignment_id: DbId,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM`.
    pub time: String,
    /// Defaults to 60.
    pub duration_minutes: Option<i32>,
    /// Defaults to `scheduled`.
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// Query parameters for `GET /api/v1/sessions`.
#[derive(Debug, Deserialize)]
pub struct SessionListQuery {
    pub assignment_id: Option<DbId>,
    pub customer_id: Option<DbId>,
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}

/// DTO for `POST /api/v1/sessions/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateSessionStatus {
    pub status: String,
    /// Optional staff-only note appended alongside the status write.
    pub employee_notes: Option<String>,
}

/// Aggregate counts backing the progress read path.
#[derive(Debug, Clone, Copy, FromRow, Serialize)]
pub struct SessionCounts {
    pub total: i64,
    pub completed: i64,
    pub scheduled_or_confirmed: i64,
}
