//! Reminder handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use crate::api::dto::{CreateReminderRequest, UpdateReminderRequest};
use crate::api::extract::{ApiJson, ApiPath};
use crate::app_state::AppState;
use crate::auth::AuthUser;
use crate::domain::Reminder;
use crate::error::{ApiError, ErrorResponse};

/// `GET /reminders` — The caller's reminders.
///
/// # Errors
///
/// Returns [`ApiError`] on persistence failure.
#[utoipa::path(
    get,
    path = "/api/v1/reminders",
    tag = "Reminders",
    summary = "List reminders",
    description = "Ordered by time of day.",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Reminders", body = Vec<Reminder>),
    )
)]
pub async fn list_reminders(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.reminder_service.list(caller.user_id).await?))
}

/// `POST /reminders` — Schedule a reminder.
///
/// # Errors
///
/// Returns [`ApiError`] for invalid fields or an exhausted plan quota.
#[utoipa::path(
    post,
    path = "/api/v1/reminders",
    tag = "Reminders",
    summary = "Create a reminder",
    request_body = CreateReminderRequest,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Reminder created", body = Reminder),
        (status = 400, description = "Invalid field", body = ErrorResponse),
        (status = 403, description = "Free plan limit reached", body = ErrorResponse),
    )
)]
pub async fn create_reminder(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiJson(req): ApiJson<CreateReminderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let reminder = state.reminder_service.create(caller.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(reminder)))
}

/// `GET /reminders/{id}` — One reminder.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if it does not exist for the caller.
#[utoipa::path(
    get,
    path = "/api/v1/reminders/{id}",
    tag = "Reminders",
    summary = "Get a reminder",
    params(("id" = Uuid, Path, description = "Reminder id")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Reminder", body = Reminder),
        (status = 404, description = "Not found", body = ErrorResponse),
    )
)]
pub async fn get_reminder(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.reminder_service.get(caller.user_id, id).await?))
}

/// `PATCH /reminders/{id}` — Edit a reminder.
///
/// # Errors
///
/// Returns [`ApiError`] for unknown reminders or invalid fields.
#[utoipa::path(
    patch,
    path = "/api/v1/reminders/{id}",
    tag = "Reminders",
    summary = "Update a reminder",
    params(("id" = Uuid, Path, description = "Reminder id")),
    request_body = UpdateReminderRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Updated reminder", body = Reminder),
        (status = 400, description = "Invalid field", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
    )
)]
pub async fn update_reminder(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdateReminderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let reminder = state
        .reminder_service
        .update(caller.user_id, id, req)
        .await?;
    Ok(Json(reminder))
}

/// `DELETE /reminders/{id}` — Delete a reminder.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if it does not exist for the caller.
#[utoipa::path(
    delete,
    path = "/api/v1/reminders/{id}",
    tag = "Reminders",
    summary = "Delete a reminder",
    params(("id" = Uuid, Path, description = "Reminder id")),
    security(("bearer" = [])),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorResponse),
    )
)]
pub async fn delete_reminder(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.reminder_service.delete(caller.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Reminder routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reminders", get(list_reminders).post(create_reminder))
        .route(
            "/reminders/{id}",
            get(get_reminder)
                .patch(update_reminder)
                .delete(delete_reminder),
        )
}
