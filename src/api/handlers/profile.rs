//! Profile handlers.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{ProfileResponse, UpdateProfileRequest};
use crate::api::extract::ApiJson;
use crate::app_state::AppState;
use crate::auth::AuthUser;
use crate::error::{ApiError, ErrorResponse};

/// `GET /profile` — The caller's profile.
///
/// # Errors
///
/// Returns [`ApiError`] on persistence failure.
#[utoipa::path(
    get,
    path = "/api/v1/profile",
    tag = "Profile",
    summary = "Get profile",
    description = "Returns the caller's profile with age, baseline goal and today's adjusted goal.",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
    )
)]
pub async fn get_profile(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.profile_service.get(caller.user_id).await?;
    Ok(Json(ProfileResponse::from(&user)))
}

/// `PATCH /profile` — Update profile fields.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for out-of-range weight or birth date.
#[utoipa::path(
    patch,
    path = "/api/v1/profile",
    tag = "Profile",
    summary = "Update profile",
    description = "Applies the given fields and recomputes today's goal.",
    request_body = UpdateProfileRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Invalid field", body = ErrorResponse),
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiJson(req): ApiJson<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.profile_service.update(caller.user_id, req).await?;
    Ok(Json(ProfileResponse::from(&user)))
}

/// Profile routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/profile", get(get_profile).patch(update_profile))
}
