//! Logged physical activity and its enumerated attributes.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::UserId;
use crate::hydration::sweat_loss;

/// Kind of physical activity a user can log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    /// Walking.
    Walking,
    /// Running or jogging.
    Running,
    /// Road or stationary cycling.
    Cycling,
    /// Pool or open-water swimming.
    Swimming,
    /// Football / soccer.
    Soccer,
    /// Basketball.
    Basketball,
    /// Tennis or other racket sports.
    Tennis,
    /// Weight or resistance training.
    Strength,
    /// Regular yoga.
    Yoga,
    /// Yoga in a heated room.
    HotYoga,
    /// High-intensity interval training.
    Hiit,
    /// Dance.
    Dance,
    /// Hiking.
    Hiking,
    /// Anything not covered above.
    Other,
}

impl ActivityType {
    /// Every activity type, in catalog order.
    pub const ALL: [Self; 14] = [
        Self::Walking,
        Self::Running,
        Self::Cycling,
        Self::Swimming,
        Self::Soccer,
        Self::Basketball,
        Self::Tennis,
        Self::Strength,
        Self::Yoga,
        Self::HotYoga,
        Self::Hiit,
        Self::Dance,
        Self::Hiking,
        Self::Other,
    ];

    /// Returns the stored code for this type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Walking => "walking",
            Self::Running => "running",
            Self::Cycling => "cycling",
            Self::Swimming => "swimming",
            Self::Soccer => "soccer",
            Self::Basketball => "basketball",
            Self::Tennis => "tennis",
            Self::Strength => "strength",
            Self::Yoga => "yoga",
            Self::HotYoga => "hot_yoga",
            Self::Hiit => "hiit",
            Self::Dance => "dance",
            Self::Hiking => "hiking",
            Self::Other => "other",
        }
    }

    /// Parses a stored code, mapping anything unrecognised to [`Self::Other`].
    #[must_use]
    pub fn from_code_lenient(code: &str) -> Self {
        code.parse().unwrap_or(Self::Other)
    }
}

impl FromStr for ActivityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown activity type: {s}"))
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Perceived effort of an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    /// Light effort.
    Low,
    /// Moderate effort.
    Medium,
    /// Hard effort.
    High,
}

impl Intensity {
    /// Returns the stored code for this intensity.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses a stored code, mapping anything unrecognised to [`Self::Medium`].
    #[must_use]
    pub fn from_code_lenient(code: &str) -> Self {
        match code {
            "low" => Self::Low,
            "high" => Self::High,
            _ => Self::Medium,
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shortest loggable activity, in minutes.
pub const MIN_DURATION_MINUTES: i32 = 1;

/// Longest loggable activity (one full day), in minutes.
pub const MAX_DURATION_MINUTES: i32 = 1440;

/// A physical activity logged by a user.
///
/// `sweat_loss_ml` is always derived from type, duration and intensity via
/// [`Activity::recompute_sweat_loss`]; it is never accepted from clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Activity {
    /// Row identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: UserId,
    /// What kind of activity this was.
    pub activity_type: ActivityType,
    /// Duration in minutes (1–1440).
    pub duration_minutes: i32,
    /// Perceived effort.
    pub intensity: Intensity,
    /// When the activity took place.
    pub performed_at: DateTime<Utc>,
    /// Optional free-text note.
    pub notes: Option<String>,
    /// Estimated sweat loss in milliliters.
    pub sweat_loss_ml: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Activity {
    /// Creates a new activity and computes its sweat loss.
    #[must_use]
    pub fn new(
        user_id: UserId,
        activity_type: ActivityType,
        duration_minutes: i32,
        intensity: Intensity,
        performed_at: DateTime<Utc>,
        notes: Option<String>,
    ) -> Self {
        let now = Utc::now();
        let mut activity = Self {
            id: Uuid::new_v4(),
            user_id,
            activity_type,
            duration_minutes,
            intensity,
            performed_at,
            notes,
            sweat_loss_ml: 0,
            created_at: now,
            updated_at: now,
        };
        activity.recompute_sweat_loss();
        activity
    }

    /// Recomputes `sweat_loss_ml` from the raw fields.
    pub fn recompute_sweat_loss(&mut self) {
        let minutes = u32::try_from(self.duration_minutes).unwrap_or(0);
        self.sweat_loss_ml = sweat_loss::estimate_ml(minutes, self.activity_type, self.intensity);
    }

    /// Calendar day (UTC) the activity counts towards.
    #[must_use]
    pub fn day(&self) -> NaiveDate {
        self.performed_at.date_naive()
    }
}
