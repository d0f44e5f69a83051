//! User account with its physiological profile and derived daily goal.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::UserId;

/// Self-reported general activity level.
///
/// Stored with the profile; the goal calculator does not use it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise.
    Sedentary,
    /// Light exercise 1–3 days a week.
    Light,
    /// Moderate exercise 3–5 days a week.
    #[default]
    Moderate,
    /// Hard exercise 6–7 days a week.
    Active,
    /// Physical job or twice-daily training.
    VeryActive,
}

impl ActivityLevel {
    /// Returns the stored code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Active => "active",
            Self::VeryActive => "very_active",
        }
    }

    /// Parses a stored code, defaulting to [`Self::Moderate`].
    #[must_use]
    pub fn from_code_lenient(code: &str) -> Self {
        match code {
            "sedentary" => Self::Sedentary,
            "light" => Self::Light,
            "active" => Self::Active,
            "very_active" => Self::VeryActive,
            _ => Self::Moderate,
        }
    }
}

/// A registered account.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Account identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Unique email address (stored lowercase).
    pub email: String,
    /// Argon2 PHC hash of the password.
    pub password_hash: String,
    /// Optional display name.
    pub display_name: Option<String>,
    /// Body weight in kilograms.
    pub weight_kg: Option<f64>,
    /// Date of birth.
    pub birth_date: Option<NaiveDate>,
    /// Self-reported activity level.
    pub activity_level: ActivityLevel,
    /// Frail or with cardiac insufficiency; lowers the over-65 goal band.
    pub is_fragile: bool,
    /// Whether the account has the premium plan.
    pub is_premium: bool,
    /// Current daily goal: baseline plus today's estimated sweat loss.
    pub daily_goal_ml: i32,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
    /// Last profile change.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a free-plan user with an empty profile.
    ///
    /// `daily_goal_ml` starts at zero; callers are expected to run the goal
    /// calculator before persisting.
    #[must_use]
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            username,
            email: email.to_lowercase(),
            password_hash,
            display_name: None,
            weight_kg: None,
            birth_date: None,
            activity_level: ActivityLevel::default(),
            is_fragile: false,
            is_premium: false,
            daily_goal_ml: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Profile fields to overwrite; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileChanges {
    /// New display name; `Some(None)` clears it.
    pub display_name: Option<Option<String>>,
    /// New body weight.
    pub weight_kg: Option<f64>,
    /// New birth date.
    pub birth_date: Option<NaiveDate>,
    /// New activity level.
    pub activity_level: Option<ActivityLevel>,
    /// New fragility flag.
    pub is_fragile: Option<bool>,
}

impl ProfileChanges {
    /// Writes the set fields onto `user`.
    pub fn apply_to(&self, user: &mut User, now: DateTime<Utc>) {
        if let Some(display_name) = &self.display_name {
            user.display_name.clone_from(display_name);
        }
        if let Some(weight_kg) = self.weight_kg {
            user.weight_kg = Some(weight_kg);
        }
        if let Some(birth_date) = self.birth_date {
            user.birth_date = Some(birth_date);
        }
        if let Some(level) = self.activity_level {
            user.activity_level = level;
        }
        if let Some(is_fragile) = self.is_fragile {
            user.is_fragile = is_fragile;
        }
        user.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_fields_are_left_alone() {
        let mut user = User::new("ana".into(), "ana@example.com".into(), "hash".into());
        user.weight_kg = Some(70.0);
        user.display_name = Some("Ana".into());

        let changes = ProfileChanges {
            display_name: Some(None),
            is_fragile: Some(true),
            ..ProfileChanges::default()
        };
        changes.apply_to(&mut user, Utc::now());

        assert_eq!(user.display_name, None);
        assert_eq!(user.weight_kg, Some(70.0));
        assert!(user.is_fragile);
        assert_eq!(user.password_hash, "hash");
    }
}
