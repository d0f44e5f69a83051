//! Premium plan handlers.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{DateRangeQuery, FeaturesResponse, HydrationStats, LimitsResponse};
use crate::api::extract::ApiQuery;
use crate::app_state::AppState;
use crate::auth::AuthUser;
use crate::error::{ApiError, ErrorResponse};

/// `GET /premium/features` — Feature catalog.
///
/// # Errors
///
/// Returns [`ApiError`] on persistence failure.
#[utoipa::path(
    get,
    path = "/api/v1/premium/features",
    tag = "Premium",
    summary = "Premium features",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Features with unlocked flags", body = FeaturesResponse),
    )
)]
pub async fn features(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.premium_service.features(caller.user_id).await?))
}

/// `GET /premium/limits` — Plan quotas and usage.
///
/// # Errors
///
/// Returns [`ApiError`] on persistence failure.
#[utoipa::path(
    get,
    path = "/api/v1/premium/limits",
    tag = "Premium",
    summary = "Plan limits",
    description = "Quotas for the caller's plan (`null` = unlimited) and current usage.",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Limits and usage", body = LimitsResponse),
    )
)]
pub async fn limits(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.premium_service.limits(caller.user_id).await?))
}

/// `GET /premium/stats` — Hydration statistics.
///
/// # Errors
///
/// Returns [`ApiError::PremiumRequired`] for free accounts.
#[utoipa::path(
    get,
    path = "/api/v1/premium/stats",
    tag = "Premium",
    summary = "Hydration statistics",
    description = "Averages and completion rate over an inclusive range (default the last 30 days). Premium only.",
    params(DateRangeQuery),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Statistics", body = HydrationStats),
        (status = 403, description = "Premium plan required", body = ErrorResponse),
    )
)]
pub async fn stats(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiQuery(range): ApiQuery<DateRangeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let stats = state
        .premium_service
        .stats(caller.user_id, range.from, range.to)
        .await?;
    Ok(Json(stats))
}

/// Premium routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/premium/features", get(features))
        .route("/premium/limits", get(limits))
        .route("/premium/stats", get(stats))
}
