//! Repository for the `customers` table.

use sqlx::PgPool;

use impulsa_core::types::DbId;

use crate::models::customer::Customer;

/// Column list for `customers` queries.
const COLUMNS: &str = "id, name, email, phone, created_at";

pub struct CustomerRepo;

impl CustomerRepo {
    /// Find a customer by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE id = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a customer, or refresh name/phone on the existing row when the
    /// email is already known. Intake treats email as the customer key.
    pub async fn upsert_by_email(
        pool: &PgPool,
        name: &str,
        email: &str,
        phone: Option<&str>,
    ) -> Result<Customer, sqlx::Error> {
        let query = format!(
            "INSERT INTO customers (name, email, phone) \
             VALUES ($1, $2, $3) \
             ON CONFLICT ON CONSTRAINT uq_customers_email \
             DO UPDATE SET name = EXCLUDED.name, phone = EXCLUDED.phone \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(name)
            .bind(email)
            .bind(phone)
            .fetch_one(pool)
            .await
    }
}
