//! Repository for the `orders` table.

use sqlx::PgPool;

use impulsa_core::types::DbId;

use crate::models::order::{NewOrder, Order, OrderListQuery};

/// Column list for `orders` queries.
const COLUMNS: &str = "\
    id, customer_id, service_id, price_id, status, notes, sessions_generated, \
    employee_id, start_date, preferred_weekdays, preferred_time, \
    tutor_id, tutor_start_date, tutor_time, \
    therapist_id, therapist_start_date, therapist_time, \
    created_at, updated_at";

/// Maximum page size for order listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for order listing.
const DEFAULT_LIMIT: i64 = 50;

pub struct OrderRepo;

impl OrderRepo {
    /// Create a new pending order from validated intake parameters.
    pub async fn create(pool: &PgPool, input: &NewOrder) -> Result<Order, sqlx::Error> {
        let query = format!(
            "INSERT INTO orders \
                (customer_id, service_id, price_id, status, notes, \
                 employee_id, start_date, preferred_weekdays, preferred_time, \
                 tutor_id, tutor_start_date, tutor_time, \
                 therapist_id, therapist_start_date, therapist_time) \
             VALUES ($1, $2, $3, 'pending', $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(input.customer_id)
            .bind(input.service_id)
            .bind(input.price_id)
            .bind(&input.notes)
            .bind(input.employee_id)
            .bind(input.start_date)
            .bind(&input.preferred_weekdays)
            .bind(input.preferred_time)
            .bind(input.tutor_id)
            .bind(input.tutor_start_date)
            .bind(input.tutor_time)
            .bind(input.therapist_id)
            .bind(input.therapist_start_date)
            .bind(input.therapist_time)
            .fetch_one(pool)
            .await
    }

    /// Find an order by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List orders, newest first, with optional status filter.
    pub async fn list(pool: &PgPool, params: &OrderListQuery) -> Result<Vec<Order>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = params.offset.unwrap_or(0).max(0);

        let query = format!(
            "SELECT {COLUMNS} FROM orders \
             WHERE ($1::TEXT IS NULL OR status = $1) \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(&params.status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Write a new order status, optionally replacing the assigned employee.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET status = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Approve a pending order: set status `confirmed`, optionally pinning
    /// the single-track employee at the same time.
    pub async fn approve(
        pool: &PgPool,
        id: DbId,
        employee_id: Option<DbId>,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "UPDATE orders \
             SET status = 'confirmed', \
                 employee_id = COALESCE($2, employee_id), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(employee_id)
            .fetch_optional(pool)
            .await
    }

    /// Staff rejection: back to `pending`, staff references cleared, the
    /// reason appended to the order notes.
    pub async fn reject(
        pool: &PgPool,
        id: DbId,
        reason: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "UPDATE orders \
             SET status = 'pending', \
                 employee_id = NULL, tutor_id = NULL, therapist_id = NULL, \
                 notes = TRIM(BOTH E'\\n' FROM COALESCE(notes, '') || E'\\n' || $2), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(format!("Rejected by staff: {reason}"))
            .fetch_optional(pool)
            .await
    }
}
