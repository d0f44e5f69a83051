//! Reminder DTOs.

use chrono::NaiveTime;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::common_dto::validate_not_blank;
use crate::domain::Recurrence;

const fn default_active() -> bool {
    true
}

/// Request body for `POST /reminders`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateReminderRequest {
    /// Time of day, `HH:MM[:SS]`.
    #[schema(value_type = String, example = "09:30:00")]
    pub time: NaiveTime,
    /// Notification text (1–255 characters).
    #[validate(
        length(min = 1, max = 255, message = "must be between 1 and 255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub message: String,
    /// Recurrence rule; defaults to `daily`.
    #[serde(default)]
    pub recurrence: Recurrence,
    /// Defaults to `true`.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Request body for `PATCH /reminders/{id}`. Absent fields are unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateReminderRequest {
    /// New time of day.
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub time: Option<NaiveTime>,
    /// New text.
    #[serde(default)]
    #[validate(
        length(min = 1, max = 255, message = "must be between 1 and 255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub message: Option<String>,
    /// New recurrence rule.
    #[serde(default)]
    pub recurrence: Option<Recurrence>,
    /// New active flag.
    #[serde(default)]
    pub is_active: Option<bool>,
}
