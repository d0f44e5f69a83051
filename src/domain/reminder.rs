//! Drink reminders.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::UserId;

/// How often a reminder fires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    /// Every day.
    #[default]
    Daily,
    /// Monday to Friday.
    Weekdays,
    /// Saturday and Sunday.
    Weekends,
    /// A single time, then deactivated by the client.
    Once,
}

impl Recurrence {
    /// Returns the stored code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekdays => "weekdays",
            Self::Weekends => "weekends",
            Self::Once => "once",
        }
    }

    /// Parses a stored code, defaulting to [`Self::Daily`].
    #[must_use]
    pub fn from_code_lenient(code: &str) -> Self {
        match code {
            "weekdays" => Self::Weekdays,
            "weekends" => Self::Weekends,
            "once" => Self::Once,
            _ => Self::Daily,
        }
    }
}

/// A user-owned notification schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Reminder {
    /// Row identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: UserId,
    /// Time of day the reminder fires.
    #[schema(value_type = String, example = "09:30:00")]
    pub time: NaiveTime,
    /// Notification text.
    pub message: String,
    /// Recurrence rule.
    pub recurrence: Recurrence,
    /// Disabled reminders are kept but never fire.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Reminder {
    /// Creates an active reminder.
    #[must_use]
    pub fn new(user_id: UserId, time: NaiveTime, message: String, recurrence: Recurrence) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            time,
            message,
            recurrence,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
