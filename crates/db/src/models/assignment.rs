use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use impulsa_core::types::{DbId, Timestamp};

/// A row from the `assignments` table — the durable client/staff/service
/// relationship that owns sessions.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Assignment {
    pub id: DbId,
    pub customer_id: DbId,
    pub employee_id: DbId,
    pub service_id: DbId,
    pub is_active: bool,
    pub notes: Option<String>,
    pub assigned_at: Timestamp,
}

/// DTO for administrative `POST /api/v1/assignments`.
#[derive(Debug, Deserialize)]
pub struct CreateAssignment {
    pub customer_id: DbId,
    pub employee_id: DbId,
    pub service_id: DbId,
    pub notes: Option<String>,
}
