//! Activity DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{Activity, ActivityType, Intensity};

const fn default_intensity() -> Intensity {
    Intensity::Medium
}

/// Request body for `POST /activities`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateActivityRequest {
    /// Activity kind.
    pub activity_type: ActivityType,
    /// Duration in minutes (1–1440).
    #[validate(range(min = 1, max = 1440, message = "must be between 1 and 1440"))]
    pub duration_minutes: i32,
    /// Perceived effort; defaults to `medium`.
    #[serde(default = "default_intensity")]
    pub intensity: Intensity,
    /// When it took place; defaults to now. Must not be in the future.
    #[serde(default)]
    pub performed_at: Option<DateTime<Utc>>,
    /// Optional note.
    #[serde(default)]
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub notes: Option<String>,
}

/// Request body for `PATCH /activities/{id}`. Absent fields are unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateActivityRequest {
    /// New activity kind.
    #[serde(default)]
    pub activity_type: Option<ActivityType>,
    /// New duration in minutes (1–1440).
    #[serde(default)]
    #[validate(range(min = 1, max = 1440, message = "must be between 1 and 1440"))]
    pub duration_minutes: Option<i32>,
    /// New intensity.
    #[serde(default)]
    pub intensity: Option<Intensity>,
    /// New timestamp. Must not be in the future.
    #[serde(default)]
    pub performed_at: Option<DateTime<Utc>>,
    /// New note.
    #[serde(default)]
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub notes: Option<String>,
}

/// Query for `GET /activities/day-summary`.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DaySummaryQuery {
    /// Day to summarise, `YYYY-MM-DD`; defaults to today.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Response body for `GET /activities/day-summary`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DaySummaryResponse {
    /// Day summarised.
    pub date: NaiveDate,
    /// Baseline goal from the profile.
    pub baseline_ml: i32,
    /// Sum of the day's sweat loss.
    pub total_sweat_loss_ml: i32,
    /// Baseline plus sweat loss.
    pub adjusted_goal_ml: i32,
    /// Number of activities.
    pub activity_count: usize,
    /// Sum of durations.
    pub total_minutes: i32,
    /// The activities, oldest first.
    pub activities: Vec<Activity>,
}
