//! Service and plan catalog models. Read-only during scheduling.

use serde::Serialize;
use sqlx::FromRow;

use impulsa_core::types::{DbId, Timestamp};

/// A row from the `services` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Service {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
}

/// A row from the `prices` table — one bookable plan under a service.
///
/// Exactly one of the count shapes is populated: `session_count` for
/// single-track plans, the `tutoring_*`/`therapy_*` pair for combined plans.
/// The generator trusts these columns and nothing else for session counts.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Price {
    pub id: DbId,
    pub service_id: DbId,
    pub plan: String,
    pub amount: i64,
    pub currency: String,
    pub description: Option<String>,
    pub session_count: Option<i32>,
    pub tutoring_session_count: Option<i32>,
    pub therapy_session_count: Option<i32>,
    pub created_at: Timestamp,
}

impl Price {
    /// Whether the plan schedules two independent tracks.
    pub fn is_combined(&self) -> bool {
        self.tutoring_session_count.is_some() && self.therapy_session_count.is_some()
    }
}
