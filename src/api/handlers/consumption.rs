//! Consumption handlers: CRUD and today's totals.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use crate::api::dto::{
    CreateConsumptionRequest, DateRangeQuery, TodayConsumptionsResponse,
    UpdateConsumptionRequest,
};
use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::app_state::AppState;
use crate::auth::AuthUser;
use crate::domain::Consumption;
use crate::error::{ApiError, ErrorResponse};

/// `POST /consumptions` — Log a drink.
///
/// # Errors
///
/// Returns [`ApiError`] for invalid input, inactive beverages (400) or
/// premium beverages on a free plan (403).
#[utoipa::path(
    post,
    path = "/api/v1/consumptions",
    tag = "Consumptions",
    summary = "Log a drink",
    description = "Volume defaults to the container capacity. Effective hydration and, for alcohol, net dehydration and compensating water are derived from the beverage.",
    request_body = CreateConsumptionRequest,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Drink logged", body = Consumption),
        (status = 400, description = "Invalid field or inactive beverage", body = ErrorResponse),
        (status = 403, description = "Premium beverage on a free plan", body = ErrorResponse),
    )
)]
pub async fn create_consumption(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiJson(req): ApiJson<CreateConsumptionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let consumption = state
        .consumption_service
        .create(caller.user_id, req)
        .await?;
    Ok((StatusCode::CREATED, Json(consumption)))
}

/// `GET /consumptions` — List drinks in a date range.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for an invalid range.
#[utoipa::path(
    get,
    path = "/api/v1/consumptions",
    tag = "Consumptions",
    summary = "List drinks",
    description = "Inclusive `from`/`to` dates; defaults to the last 30 days.",
    params(DateRangeQuery),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Drinks, oldest first", body = Vec<Consumption>),
        (status = 400, description = "Invalid range", body = ErrorResponse),
    )
)]
pub async fn list_consumptions(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiQuery(range): ApiQuery<DateRangeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let consumptions = state
        .consumption_service
        .list(caller.user_id, range.from, range.to)
        .await?;
    Ok(Json(consumptions))
}

/// `GET /consumptions/today` — Today's drinks with totals.
///
/// # Errors
///
/// Returns [`ApiError`] on persistence failure.
#[utoipa::path(
    get,
    path = "/api/v1/consumptions/today",
    tag = "Consumptions",
    summary = "Today's drinks",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Drinks, totals and today's goal", body = TodayConsumptionsResponse),
    )
)]
pub async fn today_consumptions(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.consumption_service.today(caller.user_id).await?))
}

/// `GET /consumptions/{id}` — One drink.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if it does not exist for the caller.
#[utoipa::path(
    get,
    path = "/api/v1/consumptions/{id}",
    tag = "Consumptions",
    summary = "Get a drink",
    params(("id" = Uuid, Path, description = "Consumption id")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Drink", body = Consumption),
        (status = 404, description = "Not found", body = ErrorResponse),
    )
)]
pub async fn get_consumption(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.consumption_service.get(caller.user_id, id).await?))
}

/// `PATCH /consumptions/{id}` — Edit a drink.
///
/// # Errors
///
/// Returns [`ApiError`] for unknown drinks or invalid fields.
#[utoipa::path(
    patch,
    path = "/api/v1/consumptions/{id}",
    tag = "Consumptions",
    summary = "Update a drink",
    params(("id" = Uuid, Path, description = "Consumption id")),
    request_body = UpdateConsumptionRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Updated drink", body = Consumption),
        (status = 400, description = "Invalid field", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
    )
)]
pub async fn update_consumption(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdateConsumptionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let consumption = state
        .consumption_service
        .update(caller.user_id, id, req)
        .await?;
    Ok(Json(consumption))
}

/// `DELETE /consumptions/{id}` — Delete a drink.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if it does not exist for the caller.
#[utoipa::path(
    delete,
    path = "/api/v1/consumptions/{id}",
    tag = "Consumptions",
    summary = "Delete a drink",
    params(("id" = Uuid, Path, description = "Consumption id")),
    security(("bearer" = [])),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorResponse),
    )
)]
pub async fn delete_consumption(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.consumption_service.delete(caller.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Consumption routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/consumptions", get(list_consumptions).post(create_consumption))
        .route("/consumptions/today", get(today_consumptions))
        .route(
            "/consumptions/{id}",
            get(get_consumption)
                .patch(update_consumption)
                .delete(delete_consumption),
        )
}
