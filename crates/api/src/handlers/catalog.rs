//! Handlers for the read-only `/catalog` resource.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use impulsa_core::error::CoreError;
use impulsa_db::repositories::CatalogRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/catalog/services
pub async fn list_services(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let services = CatalogRepo::list_services(&state.pool).await?;
    Ok(Json(DataResponse { data: services }))
}

/// GET /api/v1/catalog/services/{slug}/plans
pub async fn list_plans(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let service = CatalogRepo::find_service_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByName {
                entity: "Service",
                name: slug.clone(),
            })
        })?;
    let prices = CatalogRepo::list_prices_for_service(&state.pool, service.id).await?;
    Ok(Json(DataResponse { data: prices }))
}
