//! Daily goal reads: today's record and history.
//!
//! Goal rows are rebuilt by the store inside each goal-affecting write (see
//! [`GoalSync`]); this service only materialises a missing day and serves
//! stored rows.

use std::sync::Arc;

use chrono::NaiveDate;

use super::load_user;
use crate::domain::{DailyGoal, UserId, UsageLimits};
use crate::error::ApiError;
use crate::hydration::dates::{self, DateRange};
use crate::persistence::{GoalSync, Store};

/// Result of a daily-goal history query.
#[derive(Debug, Clone)]
pub struct GoalHistory {
    /// Range actually served, `None` if the plan window excludes it entirely.
    pub range: Option<DateRange>,
    /// Whether plan limits shortened the requested range.
    pub truncated: bool,
    /// Stored goal rows inside the range.
    pub goals: Vec<DailyGoal>,
}

/// Serves per-day goals.
#[derive(Debug, Clone)]
pub struct GoalService {
    store: Arc<dyn Store>,
}

impl GoalService {
    /// Creates a new `GoalService`.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Today's goal for `user_id`, computing and storing it if absent.
    ///
    /// Materialising the row also rolls the user's current goal over to the
    /// new day.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown user or
    /// [`ApiError::Persistence`] on storage failure.
    pub async fn today(&self, user_id: UserId) -> Result<DailyGoal, ApiError> {
        let today = dates::today();
        if let Some(goal) = self.store.daily_goal(user_id, today).await? {
            return Ok(goal);
        }
        load_user(self.store.as_ref(), user_id).await?;
        let rows = self
            .store
            .refresh_goals(&GoalSync::at(user_id, &[today], today))
            .await?;
        let Some(goal) = rows.into_iter().next() else {
            return Err(ApiError::Internal("goal rebuild produced no row".into()));
        };
        tracing::info!(%user_id, date = %today, target_ml = goal.target_ml, "daily goal created");
        Ok(goal)
    }

    /// Stored goals between `from` and `to` (inclusive).
    ///
    /// Missing bounds default to the last seven days. Free accounts only see
    /// their plan's history window.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for inverted or overlong ranges.
    pub async fn history(
        &self,
        user_id: UserId,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<GoalHistory, ApiError> {
        let user = load_user(self.store.as_ref(), user_id).await?;
        let today = dates::today();
        let requested = resolve_range(from, to, today, 7)?;

        let limits = UsageLimits::for_plan(user.is_premium);
        let range = match limits.history_days {
            Some(days) => requested.clamp_to_window(today, days),
            None => Some(requested),
        };
        let truncated = range != Some(requested);

        let goals = match range {
            Some(range) => self.store.daily_goals_in(user_id, range).await?,
            None => Vec::new(),
        };
        Ok(GoalHistory {
            range,
            truncated,
            goals,
        })
    }
}

/// Resolves optional bounds into a validated range.
///
/// A missing `to` means today; a missing `from` means `default_days` ending
/// on `to`.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for inverted or overlong ranges.
pub fn resolve_range(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    today: NaiveDate,
    default_days: u32,
) -> Result<DateRange, ApiError> {
    let to = to.unwrap_or(today);
    let from = from.unwrap_or_else(|| DateRange::trailing(to, default_days).from);
    Ok(DateRange::new(from, to)?)
}
