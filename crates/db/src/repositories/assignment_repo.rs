//! Repository for the `assignments` table.
//!
//! Active assignments are unique per (customer, employee, service) triple;
//! creation always goes through a find-or-create path so generation can be
//! re-run against new orders without duplicating relationships.

use sqlx::{PgPool, Postgres, Transaction};

use impulsa_core::types::DbId;

use crate::models::assignment::Assignment;

/// Column list for `assignments` queries.
const COLUMNS: &str = "id, customer_id, employee_id, service_id, is_active, notes, assigned_at";

pub struct AssignmentRepo;

impl AssignmentRepo {
    /// Find an assignment by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Assignment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assignments WHERE id = $1");
        sqlx::query_as::<_, Assignment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a customer's assignments, newest first.
    pub async fn list_by_customer(
        pool: &PgPool,
        customer_id: DbId,
    ) -> Result<Vec<Assignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assignments WHERE customer_id = $1 ORDER BY assigned_at DESC"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(customer_id)
            .fetch_all(pool)
            .await
    }

    /// Return the active assignment for the triple, creating it if absent.
    pub async fn find_or_create(
        pool: &PgPool,
        customer_id: DbId,
        employee_id: DbId,
        service_id: DbId,
        notes: Option<&str>,
    ) -> Result<Assignment, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let assignment =
            Self::find_or_create_in_tx(&mut tx, customer_id, employee_id, service_id, notes)
                .await?;
        tx.commit().await?;
        Ok(assignment)
    }

    /// Transactional variant used by the session generator so the lookup
    /// shares the generation transaction.
    pub async fn find_or_create_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        customer_id: DbId,
        employee_id: DbId,
        service_id: DbId,
        notes: Option<&str>,
    ) -> Result<Assignment, sqlx::Error> {
        let select = format!(
            "SELECT {COLUMNS} FROM assignments \
             WHERE customer_id = $1 AND employee_id = $2 AND service_id = $3 AND is_active"
        );
        if let Some(existing) = sqlx::query_as::<_, Assignment>(&select)
            .bind(customer_id)
            .bind(employee_id)
            .bind(service_id)
            .fetch_optional(&mut **tx)
            .await?
        {
            return Ok(existing);
        }

        let insert = format!(
            "INSERT INTO assignments (customer_id, employee_id, service_id, notes) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assignment>(&insert)
            .bind(customer_id)
            .bind(employee_id)
            .bind(service_id)
            .bind(notes)
            .fetch_one(&mut **tx)
            .await
    }

    /// Soft-deactivate an assignment. Sessions under it are untouched.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<Option<Assignment>, sqlx::Error> {
        let query = format!(
            "UPDATE assignments SET is_active = FALSE WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
