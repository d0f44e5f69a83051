//! Per-user, per-day hydration target and progress.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Activity, Consumption, User, UserId};
use crate::hydration::goal;

/// Aggregated hydration state for one user on one calendar day.
///
/// At most one record exists per `(user_id, date)`. Every field apart from
/// the identifiers is derived from the user's profile and that day's
/// activities and consumptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyGoal {
    /// Row identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: UserId,
    /// Calendar day (UTC).
    pub date: NaiveDate,
    /// Baseline goal from the profile on that day.
    pub baseline_ml: i32,
    /// Sum of estimated sweat loss over the day's activities.
    pub sweat_loss_ml: i32,
    /// Adjusted target: baseline plus sweat loss.
    pub target_ml: i32,
    /// Raw volume consumed.
    pub consumed_ml: i32,
    /// Effective hydration volume consumed.
    pub effective_ml: i32,
    /// Whether effective hydration reached the target.
    pub completed: bool,
    /// Last recomputation.
    pub updated_at: DateTime<Utc>,
}

impl DailyGoal {
    /// Builds the goal row for `date` from the profile and the day's entries.
    ///
    /// Stores call this while holding the user's write lock so the sums
    /// always reflect every committed entry.
    #[must_use]
    pub fn compose(
        user: &User,
        date: NaiveDate,
        activities: &[Activity],
        consumptions: &[Consumption],
        now: DateTime<Utc>,
    ) -> Self {
        let baseline_ml = goal::baseline_for(user, date);
        let sweat_loss_ml = activities
            .iter()
            .fold(0_i32, |acc, a| acc.saturating_add(a.sweat_loss_ml.max(0)));
        let consumed_ml = consumptions
            .iter()
            .fold(0_i32, |acc, c| acc.saturating_add(c.volume_ml.max(0)));
        let effective_ml = consumptions
            .iter()
            .fold(0_i32, |acc, c| acc.saturating_add(c.effective_ml.max(0)));
        let target_ml = baseline_ml.saturating_add(sweat_loss_ml);

        Self {
            id: Uuid::new_v4(),
            user_id: user.id,
            date,
            baseline_ml,
            sweat_loss_ml,
            target_ml,
            consumed_ml,
            effective_ml,
            completed: effective_ml >= target_ml,
            updated_at: now,
        }
    }

    /// Fraction of the target reached, capped at 1.0.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.target_ml <= 0 {
            return 1.0;
        }
        (f64::from(self.effective_ml) / f64::from(self.target_ml)).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::beverage::BEVERAGE_CATALOG;
    use crate::domain::{ActivityType, Beverage, Intensity};
    use crate::hydration::dates;

    fn beverage(slug: &str) -> Beverage {
        let Some(seed) = BEVERAGE_CATALOG.iter().find(|s| s.slug == slug) else {
            panic!("unknown slug {slug}");
        };
        Beverage::from(seed)
    }

    fn goal(target_ml: i32, effective_ml: i32) -> DailyGoal {
        DailyGoal {
            id: Uuid::new_v4(),
            user_id: UserId::new(),
            date: Utc::now().date_naive(),
            baseline_ml: target_ml,
            sweat_loss_ml: 0,
            target_ml,
            consumed_ml: effective_ml,
            effective_ml,
            completed: effective_ml >= target_ml,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn progress_is_capped() {
        assert!((goal(2000, 1000).progress() - 0.5).abs() < f64::EPSILON);
        assert!((goal(2000, 3000).progress() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_target_counts_as_done() {
        assert!((goal(0, 0).progress() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn compose_sums_entries() {
        let mut user = User::new("ana".into(), "ana@example.com".into(), "hash".into());
        user.weight_kg = Some(70.0);
        user.birth_date = NaiveDate::from_ymd_opt(1990, 1, 1);
        let day = dates::today();
        let at = dates::day_bounds(day).start;
        let run = Activity::new(user.id, ActivityType::Running, 30, Intensity::High, at, None);
        let walk = Activity::new(user.id, ActivityType::Walking, 60, Intensity::Medium, at, None);
        let water = Consumption::new(user.id, &beverage("water"), None, 500, at);
        let beer = Consumption::new(user.id, &beverage("beer"), None, 330, at);

        let row = DailyGoal::compose(&user, day, &[run, walk], &[water, beer], Utc::now());

        let baseline = goal::baseline_for(&user, day);
        assert_eq!(row.baseline_ml, baseline);
        assert_eq!(row.sweat_loss_ml, 601 + 252);
        assert_eq!(row.target_ml, baseline + 853);
        assert_eq!(row.consumed_ml, 830);
        assert_eq!(row.effective_ml, 665);
        assert!(!row.completed);
    }

    #[test]
    fn compose_marks_completion() {
        let user = User::new("bo".into(), "bo@example.com".into(), "hash".into());
        let day = dates::today();
        let at = dates::day_bounds(day).start;
        let water = Consumption::new(user.id, &beverage("water"), None, 2000, at);
        let row = DailyGoal::compose(&user, day, &[], &[water], Utc::now());
        assert_eq!(row.target_ml, goal::FALLBACK_GOAL_ML);
        assert!(row.completed);
    }
}
