//! Daily goal handlers.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{DailyGoalHistoryResponse, DailyGoalResponse, DateRangeQuery};
use crate::api::extract::ApiQuery;
use crate::app_state::AppState;
use crate::auth::AuthUser;
use crate::error::{ApiError, ErrorResponse};

/// `GET /daily-goals/today` — Today's goal and progress.
///
/// # Errors
///
/// Returns [`ApiError`] on persistence failure.
#[utoipa::path(
    get,
    path = "/api/v1/daily-goals/today",
    tag = "Daily goals",
    summary = "Today's goal",
    description = "Creates today's record on first access of the day.",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Today's goal", body = DailyGoalResponse),
    )
)]
pub async fn today_goal(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let goal = state.goal_service.today(caller.user_id).await?;
    Ok(Json(DailyGoalResponse::from(&goal)))
}

/// `GET /daily-goals` — Goal history.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for inverted or overlong ranges.
#[utoipa::path(
    get,
    path = "/api/v1/daily-goals",
    tag = "Daily goals",
    summary = "Goal history",
    description = "Inclusive range, at most 366 days, default the last 7. Free accounts only see the last 7 days.",
    params(DateRangeQuery),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Goal records", body = DailyGoalHistoryResponse),
        (status = 400, description = "Invalid range", body = ErrorResponse),
    )
)]
pub async fn goal_history(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiQuery(range): ApiQuery<DateRangeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let history = state
        .goal_service
        .history(caller.user_id, range.from, range.to)
        .await?;
    Ok(Json(DailyGoalHistoryResponse {
        from: history.range.map(|r| r.from),
        to: history.range.map(|r| r.to),
        truncated: history.truncated,
        goals: history.goals.iter().map(DailyGoalResponse::from).collect(),
    }))
}

/// Daily goal routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/daily-goals", get(goal_history))
        .route("/daily-goals/today", get(today_goal))
}
