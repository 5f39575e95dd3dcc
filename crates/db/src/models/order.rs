//! Order entity models and DTOs for service intake and generation.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use impulsa_core::types::{DbId, Timestamp};

/// A row from the `orders` table.
///
/// Recurrence columns come in two shapes: single-track plans populate
/// `employee_id`/`start_date`/`preferred_weekdays`/`preferred_time`, combined
/// plans populate the `tutor_*` and `therapist_*` groups instead. The
/// `preferred_weekdays` array preserves the client's insertion order — the
/// rotation contract depends on it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: DbId,
    pub customer_id: DbId,
    pub service_id: DbId,
    pub price_id: DbId,
    pub status: String,
    pub notes: Option<String>,
    pub sessions_generated: bool,
    pub employee_id: Option<DbId>,
    pub start_date: Option<NaiveDate>,
    pub preferred_weekdays: Option<Vec<String>>,
    pub preferred_time: Option<NaiveTime>,
    pub tutor_id: Option<DbId>,
    pub tutor_start_date: Option<NaiveDate>,
    pub tutor_time: Option<NaiveTime>,
    pub therapist_id: Option<DbId>,
    pub therapist_start_date: Option<NaiveDate>,
    pub therapist_time: Option<NaiveTime>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for `POST /api/v1/orders` (intake).
///
/// Dates and times arrive as strings (`YYYY-MM-DD`, `HH:MM`) so malformed
/// input surfaces as a structured validation error rather than a
/// deserialization failure.
#[derive(Debug, Deserialize)]
pub struct SubmitOrder {
    /// Service slug, e.g. `tutoring`.
    pub service: String,
    /// Plan name under that service, e.g. `monthly`.
    pub plan: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
    // Single-track recurrence.
    pub employee_id: Option<DbId>,
    pub start_date: Option<String>,
    pub preferred_weekdays: Option<Vec<String>>,
    pub preferred_time: Option<String>,
    // Dual-track recurrence (combined plans).
    pub tutor_id: Option<DbId>,
    pub tutor_start_date: Option<String>,
    pub tutor_time: Option<String>,
    pub therapist_id: Option<DbId>,
    pub therapist_start_date: Option<String>,
    pub therapist_time: Option<String>,
}

/// Validated, typed recurrence parameters ready for persistence.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: DbId,
    pub service_id: DbId,
    pub price_id: DbId,
    pub notes: Option<String>,
    pub employee_id: Option<DbId>,
    pub start_date: Option<NaiveDate>,
    pub preferred_weekdays: Option<Vec<String>>,
    pub preferred_time: Option<NaiveTime>,
    pub tutor_id: Option<DbId>,
    pub tutor_start_date: Option<NaiveDate>,
    pub tutor_time: Option<NaiveTime>,
    pub therapist_id: Option<DbId>,
    pub therapist_start_date: Option<NaiveDate>,
    pub therapist_time: Option<NaiveTime>,
}

/// Query parameters for `GET /api/v1/orders`.
#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    /// Filter by order status (e.g. `pending`, `confirmed`).
    pub status: Option<String>,
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}
