//! Activity handlers: CRUD, today and day summary.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use crate::api::dto::{
    CreateActivityRequest, DateRangeQuery, DaySummaryQuery, DaySummaryResponse,
    UpdateActivityRequest,
};
use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::app_state::AppState;
use crate::auth::AuthUser;
use crate::domain::Activity;
use crate::error::{ApiError, ErrorResponse};

/// `POST /activities` — Log an activity.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for invalid duration or a future timestamp.
#[utoipa::path(
    post,
    path = "/api/v1/activities",
    tag = "Activities",
    summary = "Log an activity",
    description = "Stores the activity, derives its sweat loss and raises the day's goal accordingly.",
    request_body = CreateActivityRequest,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Activity logged", body = Activity),
        (status = 400, description = "Invalid field", body = ErrorResponse),
    )
)]
pub async fn create_activity(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiJson(req): ApiJson<CreateActivityRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let activity = state.activity_service.create(caller.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(activity)))
}

/// `GET /activities` — List activities in a date range.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for an invalid range.
#[utoipa::path(
    get,
    path = "/api/v1/activities",
    tag = "Activities",
    summary = "List activities",
    description = "Inclusive `from`/`to` dates; defaults to the last 30 days.",
    params(DateRangeQuery),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Activities, oldest first", body = Vec<Activity>),
        (status = 400, description = "Invalid range", body = ErrorResponse),
    )
)]
pub async fn list_activities(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiQuery(range): ApiQuery<DateRangeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let activities = state
        .activity_service
        .list(caller.user_id, range.from, range.to)
        .await?;
    Ok(Json(activities))
}

/// `GET /activities/today` — Today's activities.
///
/// # Errors
///
/// Returns [`ApiError`] on persistence failure.
#[utoipa::path(
    get,
    path = "/api/v1/activities/today",
    tag = "Activities",
    summary = "Today's activities",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Activities logged today", body = Vec<Activity>),
    )
)]
pub async fn today_activities(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.activity_service.today(caller.user_id).await?))
}

/// `GET /activities/day-summary` — Goal breakdown for one day.
///
/// # Errors
///
/// Returns [`ApiError`] on persistence failure.
#[utoipa::path(
    get,
    path = "/api/v1/activities/day-summary",
    tag = "Activities",
    summary = "Day summary",
    description = "Baseline, total sweat loss, adjusted goal and the activities of one day (default today).",
    params(DaySummaryQuery),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Summary", body = DaySummaryResponse),
    )
)]
pub async fn day_summary(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiQuery(query): ApiQuery<DaySummaryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = state
        .activity_service
        .day_summary(caller.user_id, query.date)
        .await?;
    Ok(Json(summary))
}

/// `GET /activities/{id}` — One activity.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if it does not exist for the caller.
#[utoipa::path(
    get,
    path = "/api/v1/activities/{id}",
    tag = "Activities",
    summary = "Get an activity",
    params(("id" = Uuid, Path, description = "Activity id")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Activity", body = Activity),
        (status = 404, description = "Not found", body = ErrorResponse),
    )
)]
pub async fn get_activity(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.activity_service.get(caller.user_id, id).await?))
}

/// `PATCH /activities/{id}` — Edit an activity.
///
/// # Errors
///
/// Returns [`ApiError`] for unknown activities or invalid fields.
#[utoipa::path(
    patch,
    path = "/api/v1/activities/{id}",
    tag = "Activities",
    summary = "Update an activity",
    description = "Recomputes sweat loss and the goals of the old and new day.",
    params(("id" = Uuid, Path, description = "Activity id")),
    request_body = UpdateActivityRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Updated activity", body = Activity),
        (status = 400, description = "Invalid field", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
    )
)]
pub async fn update_activity(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdateActivityRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let activity = state
        .activity_service
        .update(caller.user_id, id, req)
        .await?;
    Ok(Json(activity))
}

/// `DELETE /activities/{id}` — Delete an activity.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if it does not exist for the caller.
#[utoipa::path(
    delete,
    path = "/api/v1/activities/{id}",
    tag = "Activities",
    summary = "Delete an activity",
    params(("id" = Uuid, Path, description = "Activity id")),
    security(("bearer" = [])),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorResponse),
    )
)]
pub async fn delete_activity(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.activity_service.delete(caller.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Activity routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/activities", get(list_activities).post(create_activity))
        .route("/activities/today", get(today_activities))
        .route("/activities/day-summary", get(day_summary))
        .route(
            "/activities/{id}",
            get(get_activity)
                .patch(update_activity)
                .delete(delete_activity),
        )
}
