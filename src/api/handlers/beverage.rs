//! Beverage catalog handlers.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use crate::api::extract::ApiPath;
use crate::app_state::AppState;
use crate::domain::Beverage;
use crate::error::{ApiError, ErrorResponse};

/// `GET /beverages` — Active catalog.
///
/// # Errors
///
/// Returns [`ApiError`] on persistence failure.
#[utoipa::path(
    get,
    path = "/api/v1/beverages",
    tag = "Beverages",
    summary = "List beverages",
    description = "Active beverages with their hydration factors, ordered by name.",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Catalog", body = Vec<Beverage>),
    )
)]
pub async fn list_beverages(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.beverage_service.list().await?))
}

/// `GET /beverages/{id}` — One beverage.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] for unknown or retired beverages.
#[utoipa::path(
    get,
    path = "/api/v1/beverages/{id}",
    tag = "Beverages",
    summary = "Get a beverage",
    params(("id" = Uuid, Path, description = "Beverage id")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Beverage", body = Beverage),
        (status = 404, description = "Not found", body = ErrorResponse),
    )
)]
pub async fn get_beverage(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.beverage_service.get(id).await?))
}

/// Beverage routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/beverages", get(list_beverages))
        .route("/beverages/{id}", get(get_beverage))
}
