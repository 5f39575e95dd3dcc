use serde::Serialize;
use sqlx::FromRow;

use impulsa_core::types::{DbId, Timestamp};

/// A row from the `employees` table (tutors, psychologists, admins).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Employee {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}
