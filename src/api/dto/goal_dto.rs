//! Daily goal DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::DailyGoal;

/// A daily goal with its progress ratio.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DailyGoalResponse {
    /// Calendar day (UTC).
    pub date: NaiveDate,
    /// Baseline from the profile.
    pub baseline_ml: i32,
    /// Sweat loss from the day's activities.
    pub sweat_loss_ml: i32,
    /// Adjusted target.
    pub target_ml: i32,
    /// Raw volume consumed.
    pub consumed_ml: i32,
    /// Effective hydration consumed.
    pub effective_ml: i32,
    /// Volume still needed to reach the target.
    pub remaining_ml: i32,
    /// Fraction of the target reached (0.0–1.0).
    pub progress: f64,
    /// Whether the target was reached.
    pub completed: bool,
    /// Last recomputation.
    pub updated_at: DateTime<Utc>,
}

impl From<&DailyGoal> for DailyGoalResponse {
    fn from(goal: &DailyGoal) -> Self {
        Self {
            date: goal.date,
            baseline_ml: goal.baseline_ml,
            sweat_loss_ml: goal.sweat_loss_ml,
            target_ml: goal.target_ml,
            consumed_ml: goal.consumed_ml,
            effective_ml: goal.effective_ml,
            remaining_ml: (goal.target_ml - goal.effective_ml).max(0),
            progress: goal.progress(),
            completed: goal.completed,
            updated_at: goal.updated_at,
        }
    }
}

/// Response body for `GET /daily-goals`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DailyGoalHistoryResponse {
    /// First day actually covered (after plan limits).
    pub from: Option<NaiveDate>,
    /// Last day actually covered.
    pub to: Option<NaiveDate>,
    /// Whether the requested range was shortened by the free plan window.
    pub truncated: bool,
    /// Goal records, oldest first. Days without activity or drinks are absent.
    pub goals: Vec<DailyGoalResponse>,
}
