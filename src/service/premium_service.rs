//! Premium plan features, quotas and statistics.

use std::sync::Arc;

use chrono::NaiveDate;

use super::goal_service::resolve_range;
use super::load_user;
use crate::api::dto::{FeatureStatus, FeaturesResponse, HydrationStats, LimitsResponse, UsageCounts};
use crate::domain::{DailyGoal, PremiumFeature, UsageLimits, UserId};
use crate::error::ApiError;
use crate::hydration::dates::{self, DateRange};
use crate::persistence::Store;

/// Default statistics window when no range is given, in days.
const DEFAULT_STATS_DAYS: u32 = 30;

/// Reports what the caller's plan includes.
#[derive(Debug, Clone)]
pub struct PremiumService {
    store: Arc<dyn Store>,
}

impl PremiumService {
    /// Creates a new `PremiumService`.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Feature catalog with the caller's unlocked flags.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown user.
    pub async fn features(&self, user_id: UserId) -> Result<FeaturesResponse, ApiError> {
        let user = load_user(self.store.as_ref(), user_id).await?;
        let features = PremiumFeature::ALL
            .into_iter()
            .map(|feature| FeatureStatus {
                feature,
                description: feature.description().to_string(),
                unlocked: user.is_premium,
            })
            .collect();
        Ok(FeaturesResponse {
            is_premium: user.is_premium,
            features,
        })
    }

    /// Plan quotas and current usage.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown user.
    pub async fn limits(&self, user_id: UserId) -> Result<LimitsResponse, ApiError> {
        let user = load_user(self.store.as_ref(), user_id).await?;
        let containers = self.store.containers(user_id).await?.len();
        let reminders = self.store.reminders(user_id).await?.len();
        Ok(LimitsResponse {
            is_premium: user.is_premium,
            limits: UsageLimits::for_plan(user.is_premium),
            usage: UsageCounts {
                containers: u32::try_from(containers).unwrap_or(u32::MAX),
                reminders: u32::try_from(reminders).unwrap_or(u32::MAX),
            },
        })
    }

    /// Aggregates stored daily goals over a range (default: last 30 days).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PremiumRequired`] for free accounts and
    /// [`ApiError::Validation`] for inverted or overlong ranges.
    pub async fn stats(
        &self,
        user_id: UserId,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<HydrationStats, ApiError> {
        let user = load_user(self.store.as_ref(), user_id).await?;
        if !user.is_premium {
            return Err(ApiError::PremiumRequired(
                PremiumFeature::HydrationStats.as_str(),
            ));
        }
        let range = resolve_range(from, to, dates::today(), DEFAULT_STATS_DAYS)?;
        let goals = self.store.daily_goals_in(user_id, range).await?;
        Ok(summarize(range, &goals))
    }
}

/// Folds goal rows into range statistics.
#[must_use]
pub fn summarize(range: DateRange, goals: &[DailyGoal]) -> HydrationStats {
    let days_tracked = u32::try_from(goals.len()).unwrap_or(u32::MAX);
    let days_completed =
        u32::try_from(goals.iter().filter(|g| g.completed).count()).unwrap_or(u32::MAX);
    let total_target: i64 = goals.iter().map(|g| i64::from(g.target_ml)).sum();
    let total_consumed_ml: i64 = goals.iter().map(|g| i64::from(g.consumed_ml)).sum();
    let total_effective_ml: i64 = goals.iter().map(|g| i64::from(g.effective_ml)).sum();
    let total_sweat_loss_ml: i64 = goals.iter().map(|g| i64::from(g.sweat_loss_ml)).sum();

    let mean = |total: i64| {
        if days_tracked == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let total = total as f64;
            total / f64::from(days_tracked)
        }
    };

    HydrationStats {
        from: range.from,
        to: range.to,
        days_tracked,
        days_completed,
        completion_rate: if days_tracked == 0 {
            0.0
        } else {
            f64::from(days_completed) / f64::from(days_tracked)
        },
        average_target_ml: mean(total_target),
        average_effective_ml: mean(total_effective_ml),
        total_consumed_ml,
        total_effective_ml,
        total_sweat_loss_ml,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::domain::User;
    use crate::persistence::MemoryStore;

    fn goal(user_id: UserId, date: NaiveDate, target_ml: i32, effective_ml: i32) -> DailyGoal {
        DailyGoal {
            id: Uuid::new_v4(),
            user_id,
            date,
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
    fn summarize_empty_range() {
        let today = dates::today();
        let range = DateRange::trailing(today, 7);
        let stats = summarize(range, &[]);
        assert_eq!(stats.days_tracked, 0);
        assert!(stats.completion_rate.abs() < f64::EPSILON);
        assert!(stats.average_target_ml.abs() < f64::EPSILON);
    }

    #[test]
    fn summarize_averages() {
        let user_id = UserId::new();
        let today = dates::today();
        let goals = [
            goal(user_id, today - Duration::days(1), 2000, 2100),
            goal(user_id, today, 2400, 1200),
        ];
        let stats = summarize(DateRange::trailing(today, 7), &goals);
        assert_eq!(stats.days_tracked, 2);
        assert_eq!(stats.days_completed, 1);
        assert!((stats.completion_rate - 0.5).abs() < f64::EPSILON);
        assert!((stats.average_target_ml - 2200.0).abs() < f64::EPSILON);
        assert!((stats.average_effective_ml - 1650.0).abs() < f64::EPSILON);
        assert_eq!(stats.total_effective_ml, 3300);
    }

    #[tokio::test]
    async fn stats_are_premium_only() {
        let memory = Arc::new(MemoryStore::new());
        let user = User::new("ana".into(), "ana@example.com".into(), "hash".into());
        let Ok(()) = memory.insert_user(&user).await else {
            panic!("insert failed");
        };
        let service = PremiumService::new(Arc::clone(&memory) as Arc<dyn Store>);

        assert!(matches!(
            service.stats(user.id, None, None).await,
            Err(ApiError::PremiumRequired("hydration_stats"))
        ));
        let Ok(features) = service.features(user.id).await else {
            panic!("features failed");
        };
        assert!(features.features.iter().all(|f| !f.unlocked));

        assert_eq!(memory.set_premium(user.id, true).await, Ok(true));
        let Ok(stats) = service.stats(user.id, None, None).await else {
            panic!("stats failed");
        };
        assert_eq!(stats.to, dates::today());
        let Ok(limits) = service.limits(user.id).await else {
            panic!("limits failed");
        };
        assert_eq!(limits.limits, UsageLimits::PREMIUM);
        assert_eq!(limits.usage.containers, 0);
    }
}
