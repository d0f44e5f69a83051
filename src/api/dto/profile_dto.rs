//! Profile DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{ActivityLevel, User, UserId};
use crate::hydration::{dates, goal};

/// Public view of an account.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileResponse {
    /// Account identifier.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Display name.
    pub display_name: Option<String>,
    /// Body weight in kilograms.
    pub weight_kg: Option<f64>,
    /// Date of birth.
    pub birth_date: Option<NaiveDate>,
    /// Age in completed years today.
    pub age: Option<u32>,
    /// Self-reported activity level.
    pub activity_level: ActivityLevel,
    /// Fragility flag.
    pub is_fragile: bool,
    /// Premium plan flag.
    pub is_premium: bool,
    /// Baseline goal from the profile alone.
    pub baseline_goal_ml: i32,
    /// Current daily goal: baseline plus today's sweat loss.
    pub daily_goal_ml: i32,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&User> for ProfileResponse {
    fn from(user: &User) -> Self {
        let today = dates::today();
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            weight_kg: user.weight_kg,
            birth_date: user.birth_date,
            age: user.birth_date.and_then(|b| dates::age_on(b, today)),
            activity_level: user.activity_level,
            is_fragile: user.is_fragile,
            is_premium: user.is_premium,
            baseline_goal_ml: goal::baseline_for(user, today),
            daily_goal_ml: user.daily_goal_ml,
            created_at: user.created_at,
        }
    }
}

/// Request body for `PATCH /profile`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    /// New display name.
    #[serde(default)]
    #[validate(length(max = 150, message = "must be at most 150 characters"))]
    pub display_name: Option<String>,
    /// New weight in kilograms (1–500).
    #[serde(default)]
    #[validate(range(min = 1.0, max = 500.0, message = "must be between 1 and 500 kg"))]
    pub weight_kg: Option<f64>,
    /// New date of birth.
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    /// New activity level.
    #[serde(default)]
    pub activity_level: Option<ActivityLevel>,
    /// New fragility flag.
    #[serde(default)]
    pub is_fragile: Option<bool>,
}
