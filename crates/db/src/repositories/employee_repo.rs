//! Repository for the `employees` table.

use sqlx::PgPool;

use impulsa_core::types::DbId;

use crate::models::employee::Employee;

/// Column list for `employees` queries.
const COLUMNS: &str = "id, name, email, role, is_active, created_at";

pub struct EmployeeRepo;

impl EmployeeRepo {
    /// Find an employee by ID (active or not; callers check `is_active`).
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE id = $1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
