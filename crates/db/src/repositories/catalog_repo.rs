//! Repository for the read-only service/plan catalog.

use sqlx::PgPool;

use impulsa_core::types::DbId;

use crate::models::catalog::{Price, Service};

/// Column list for `services` queries.
const SERVICE_COLUMNS: &str = "id, name, slug, description, created_at";

/// Column list for `prices` queries.
const PRICE_COLUMNS: &str = "\
    id, service_id, plan, amount, currency, description, \
    session_count, tutoring_session_count, therapy_session_count, created_at";

/// Read access to services and their plans.
pub struct CatalogRepo;

impl CatalogRepo {
    /// List all services in catalog order.
    pub async fn list_services(pool: &PgPool) -> Result<Vec<Service>, sqlx::Error> {
        let query = format!("SELECT {SERVICE_COLUMNS} FROM services ORDER BY id");
        sqlx::query_as::<_, Service>(&query).fetch_all(pool).await
    }

    /// Find a service by its ID.
    pub async fn find_service_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Service>, sqlx::Error> {
        let query = format!("SELECT {SERVICE_COLUMNS} FROM services WHERE id = $1");
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a service by its slug.
    pub async fn find_service_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Service>, sqlx::Error> {
        let query = format!("SELECT {SERVICE_COLUMNS} FROM services WHERE slug = $1");
        sqlx::query_as::<_, Service>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List the plans offered under a service.
    pub async fn list_prices_for_service(
        pool: &PgPool,
        service_id: DbId,
    ) -> Result<Vec<Price>, sqlx::Error> {
        let query = format!("SELECT {PRICE_COLUMNS} FROM prices WHERE service_id = $1 ORDER BY id");
        sqlx::query_as::<_, Price>(&query)
            .bind(service_id)
            .fetch_all(pool)
            .await
    }

    /// Find the plan matching a (service, plan name) pair.
    pub async fn find_price(
        pool: &PgPool,
        service_id: DbId,
        plan: &str,
    ) -> Result<Option<Price>, sqlx::Error> {
        let query = format!("SELECT {PRICE_COLUMNS} FROM prices WHERE service_id = $1 AND plan = $2");
        sqlx::query_as::<_, Price>(&query)
            .bind(service_id)
            .bind(plan)
            .fetch_optional(pool)
            .await
    }

    /// Find a price row by its ID.
    pub async fn find_price_by_id(pool: &PgPool, id: DbId) -> Result<Option<Price>, sqlx::Error> {
        let query = format!("SELECT {PRICE_COLUMNS} FROM prices WHERE id = $1");
        sqlx::query_as::<_, Price>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
