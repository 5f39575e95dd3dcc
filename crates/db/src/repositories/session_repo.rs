//! Repository for the `sessions` table.

use sqlx::PgPool;

use impulsa_core::types::{DbId, Timestamp};

use crate::models::session::{Session, SessionCounts, SessionListQuery};

/// Column list for `sessions` queries.
const COLUMNS: &str = "\
    id, assignment_id, scheduled_at, duration_minutes, status, \
    notes, employee_notes, created_at, updated_at";

/// Maximum page size for session listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for session listing.
const DEFAULT_LIMIT: i64 = 50;

pub struct SessionRepo;

impl SessionRepo {
    /// Create one session (administrative path; the generator inserts its
    /// sessions inside the generation transaction instead).
    pub async fn create(
        pool: &PgPool,
        assignment_id: DbId,
        scheduled_at: Timestamp,
        duration_minutes: i32,
        status: &str,
        notes: Option<&str>,
    ) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (assignment_id, scheduled_at, duration_minutes, status, notes) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(assignment_id)
            .bind(scheduled_at)
            .bind(duration_minutes)
            .bind(status)
            .bind(notes)
            .fetch_one(pool)
            .await
    }

    /// Find a session by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Session>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sessions WHERE id = $1");
        sqlx::query_as::<_, Session>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List sessions filtered by assignment or by customer (via the owning
    /// assignment), in scheduled order.
    pub async fn list(pool: &PgPool, params: &SessionListQuery) -> Result<Vec<Session>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = params.offset.unwrap_or(0).max(0);

        let query = format!(
            "SELECT {COLUMNS} FROM sessions \
             WHERE ($1::BIGINT IS NULL OR assignment_id = $1) \
               AND ($2::BIGINT IS NULL OR assignment_id IN \
                    (SELECT id FROM assignments WHERE customer_id = $2)) \
             ORDER BY scheduled_at \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(params.assignment_id)
            .bind(params.customer_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Write a session status, optionally replacing the staff-only notes.
    /// A `None` leaves any existing notes in place.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
        employee_notes: Option<&str>,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query = format!(
            "UPDATE sessions \
             SET status = $2, \
                 employee_notes = COALESCE($3, employee_notes), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(id)
            .bind(status)
            .bind(employee_notes)
            .fetch_optional(pool)
            .await
    }

    /// Count a customer's sessions across all of their assignments.
    ///
    /// Deliberately cross-service: the progress figure spans every track the
    /// customer has ever had, not one plan.
    pub async fn count_by_customer(
        pool: &PgPool,
        customer_id: DbId,
    ) -> Result<SessionCounts, sqlx::Error> {
        sqlx::query_as::<_, SessionCounts>(
            "SELECT COUNT(*) AS total, \
                    COUNT(*) FILTER (WHERE s.status = 'completed') AS completed, \
                    COUNT(*) FILTER (WHERE s.status IN ('scheduled', 'confirmed')) \
                        AS scheduled_or_confirmed \
             FROM sessions s \
             JOIN assignments a ON a.id = s.assignment_id \
             WHERE a.customer_id = $1",
        )
        .bind(customer_id)
        .fetch_one(pool)
        .await
    }
}
