//! Activity logging and the sweat-loss adjustment of daily goals.
//!
//! Every create, update and delete asks the store to rebuild the affected
//! days' goals in the same write as the activity itself.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;
use validator::Validate;

use super::goal_service::resolve_range;
use super::{ensure_not_future, load_user};
use crate::api::dto::{CreateActivityRequest, DaySummaryResponse, UpdateActivityRequest};
use crate::domain::{Activity, UserId};
use crate::error::ApiError;
use crate::hydration::{dates, goal};
use crate::persistence::{GoalSync, Store};

/// Default listing window when no range is given, in days.
const DEFAULT_LIST_DAYS: u32 = 30;

/// Activity CRUD with synchronous goal recomputation.
#[derive(Debug, Clone)]
pub struct ActivityService {
    store: Arc<dyn Store>,
}

impl ActivityService {
    /// Creates a new `ActivityService`.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Logs an activity.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for a duration outside 1–1440 minutes
    /// or a timestamp in the future.
    pub async fn create(
        &self,
        user_id: UserId,
        req: CreateActivityRequest,
    ) -> Result<Activity, ApiError> {
        req.validate()?;
        let now = Utc::now();
        let performed_at = req.performed_at.unwrap_or(now);
        ensure_not_future("performed_at", performed_at, now)?;

        load_user(self.store.as_ref(), user_id).await?;
        let activity = Activity::new(
            user_id,
            req.activity_type,
            req.duration_minutes,
            req.intensity,
            performed_at,
            req.notes,
        );

        let sync = GoalSync::for_days(user_id, &[activity.day()]);
        self.store.save_activity(&activity, &sync).await?;

        tracing::info!(
            %user_id,
            activity_id = %activity.id,
            activity_type = %activity.activity_type,
            sweat_loss_ml = activity.sweat_loss_ml,
            "activity logged"
        );
        Ok(activity)
    }

    /// Fetches one of the caller's activities.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if it does not exist for this user.
    pub async fn get(&self, user_id: UserId, id: Uuid) -> Result<Activity, ApiError> {
        self.store
            .activity(user_id, id)
            .await?
            .ok_or_else(|| ApiError::not_found("activity", id))
    }

    /// Activities between `from` and `to` (inclusive), oldest first.
    ///
    /// Defaults to the last 30 days.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for inverted or overlong ranges.
    pub async fn list(
        &self,
        user_id: UserId,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<Activity>, ApiError> {
        let range = resolve_range(from, to, dates::today(), DEFAULT_LIST_DAYS)?;
        Ok(self.store.activities_in(user_id, range.time_range()).await?)
    }

    /// Today's activities.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    pub async fn today(&self, user_id: UserId) -> Result<Vec<Activity>, ApiError> {
        Ok(self
            .store
            .activities_in(user_id, dates::day_bounds(dates::today()))
            .await?)
    }

    /// Edits an activity and recomputes the old and new days' goals.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown activity and
    /// [`ApiError::Validation`] for invalid fields.
    pub async fn update(
        &self,
        user_id: UserId,
        id: Uuid,
        req: UpdateActivityRequest,
    ) -> Result<Activity, ApiError> {
        req.validate()?;
        let now = Utc::now();
        if let Some(performed_at) = req.performed_at {
            ensure_not_future("performed_at", performed_at, now)?;
        }

        let mut activity = self.get(user_id, id).await?;
        let old_day = activity.day();

        if let Some(activity_type) = req.activity_type {
            activity.activity_type = activity_type;
        }
        if let Some(duration) = req.duration_minutes {
            activity.duration_minutes = duration;
        }
        if let Some(intensity) = req.intensity {
            activity.intensity = intensity;
        }
        if let Some(performed_at) = req.performed_at {
            activity.performed_at = performed_at;
        }
        if let Some(notes) = req.notes {
            activity.notes = Some(notes).filter(|n| !n.trim().is_empty());
        }
        activity.recompute_sweat_loss();
        activity.updated_at = now;

        let sync = GoalSync::for_days(user_id, &[old_day, activity.day()]);
        self.store.save_activity(&activity, &sync).await?;

        tracing::info!(%user_id, activity_id = %id, sweat_loss_ml = activity.sweat_loss_ml, "activity updated");
        Ok(activity)
    }

    /// Deletes an activity and recomputes its day's goal.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if it does not exist for this user.
    pub async fn delete(&self, user_id: UserId, id: Uuid) -> Result<(), ApiError> {
        let activity = self.get(user_id, id).await?;
        let sync = GoalSync::for_days(user_id, &[activity.day()]);
        if !self.store.delete_activity(user_id, id, &sync).await? {
            return Err(ApiError::not_found("activity", id));
        }
        tracing::info!(%user_id, activity_id = %id, "activity deleted");
        Ok(())
    }

    /// Baseline, sweat loss and adjusted goal for one day.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown user.
    pub async fn day_summary(
        &self,
        user_id: UserId,
        date: Option<NaiveDate>,
    ) -> Result<DaySummaryResponse, ApiError> {
        let date = date.unwrap_or_else(dates::today);
        let user = load_user(self.store.as_ref(), user_id).await?;
        let activities = self
            .store
            .activities_in(user_id, dates::day_bounds(date))
            .await?;

        let baseline_ml = goal::baseline_for(&user, date);
        let total_sweat_loss_ml = activities
            .iter()
            .fold(0_i32, |acc, a| acc.saturating_add(a.sweat_loss_ml));
        let total_minutes = activities
            .iter()
            .fold(0_i32, |acc, a| acc.saturating_add(a.duration_minutes));

        Ok(DaySummaryResponse {
            date,
            baseline_ml,
            total_sweat_loss_ml,
            adjusted_goal_ml: baseline_ml.saturating_add(total_sweat_loss_ml),
            activity_count: activities.len(),
            total_minutes,
            activities,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::{Duration, NaiveDate};

    use super::*;
    use crate::domain::{ActivityType, Intensity, User};
    use crate::persistence::MemoryStore;

    struct Fixture {
        store: Arc<dyn Store>,
        service: ActivityService,
        user_id: UserId,
    }

    async fn fixture() -> Fixture {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let mut user = User::new("ana".into(), "ana@example.com".into(), "hash".into());
        user.weight_kg = Some(70.0);
        user.birth_date = NaiveDate::from_ymd_opt(1990, 1, 1);
        user.daily_goal_ml = 1820;
        let Ok(()) = store.insert_user(&user).await else {
            panic!("insert failed");
        };
        Fixture {
            service: ActivityService::new(Arc::clone(&store)),
            store,
            user_id: user.id,
        }
    }

    fn request(minutes: i32) -> CreateActivityRequest {
        CreateActivityRequest {
            activity_type: ActivityType::Running,
            duration_minutes: minutes,
            intensity: Intensity::High,
            performed_at: Some(Utc::now() - Duration::seconds(5)),
            notes: None,
        }
    }

    async fn user_goal(fixture: &Fixture) -> i32 {
        let Ok(Some(user)) = fixture.store.user_by_id(fixture.user_id).await else {
            panic!("user missing");
        };
        user.daily_goal_ml
    }

    #[tokio::test]
    async fn duration_bounds() {
        let f = fixture().await;
        for minutes in [0, 1441] {
            let Err(err) = f.service.create(f.user_id, request(minutes)).await else {
                panic!("{minutes} minutes accepted");
            };
            assert_eq!(err.field(), Some("duration_minutes"));
        }
        for minutes in [1, 1440] {
            assert!(f.service.create(f.user_id, request(minutes)).await.is_ok());
        }
    }

    #[tokio::test]
    async fn future_timestamp_is_rejected() {
        let f = fixture().await;
        let mut req = request(30);
        req.performed_at = Some(Utc::now() + Duration::minutes(5));
        let Err(err) = f.service.create(f.user_id, req).await else {
            panic!("future activity accepted");
        };
        assert_eq!(err.field(), Some("performed_at"));
    }

    #[tokio::test]
    async fn create_then_delete_restores_goal() {
        let f = fixture().await;
        let req = request(30);
        let Some(at) = req.performed_at else {
            panic!("timestamp missing");
        };
        let day = at.date_naive();
        let before_goal = f.service.day_summary(f.user_id, Some(day)).await;
        let before_user = user_goal(&f).await;

        let Ok(activity) = f.service.create(f.user_id, req).await else {
            panic!("create failed");
        };
        assert_eq!(activity.sweat_loss_ml, 601);
        let Ok(Some(row)) = f.store.daily_goal(f.user_id, day).await else {
            panic!("goal row missing");
        };
        let Ok(before) = before_goal else {
            panic!("summary failed");
        };
        assert_eq!(row.target_ml, before.baseline_ml + 601);

        let Ok(()) = f.service.delete(f.user_id, activity.id).await else {
            panic!("delete failed");
        };
        let Ok(Some(row)) = f.store.daily_goal(f.user_id, day).await else {
            panic!("goal row missing");
        };
        assert_eq!(row.target_ml, before.adjusted_goal_ml);
        assert_eq!(user_goal(&f).await, before_user);
    }

    #[tokio::test]
    async fn update_recomputes_sweat_loss() {
        let f = fixture().await;
        let Ok(activity) = f.service.create(f.user_id, request(30)).await else {
            panic!("create failed");
        };
        let changes = UpdateActivityRequest {
            activity_type: Some(ActivityType::Walking),
            intensity: Some(Intensity::Medium),
            duration_minutes: Some(60),
            ..UpdateActivityRequest::default()
        };
        let Ok(updated) = f.service.update(f.user_id, activity.id, changes).await else {
            panic!("update failed");
        };
        assert_eq!(updated.sweat_loss_ml, 252);
        let Ok(summary) = f.service.day_summary(f.user_id, Some(updated.day())).await else {
            panic!("summary failed");
        };
        assert_eq!(summary.total_sweat_loss_ml, 252);
        assert_eq!(summary.activity_count, 1);
        assert_eq!(summary.total_minutes, 60);
    }

    #[tokio::test]
    async fn other_users_cannot_see_or_delete() {
        let f = fixture().await;
        let Ok(activity) = f.service.create(f.user_id, request(30)).await else {
            panic!("create failed");
        };
        let stranger = UserId::new();
        assert!(matches!(
            f.service.get(stranger, activity.id).await,
            Err(ApiError::NotFound { .. })
        ));
        assert!(f.service.delete(stranger, activity.id).await.is_err());
        assert!(f.service.get(f.user_id, activity.id).await.is_ok());
    }

    #[tokio::test]
    async fn update_rejects_future_and_out_of_range() {
        let f = fixture().await;
        let Ok(activity) = f.service.create(f.user_id, request(30)).await else {
            panic!("create failed");
        };

        let future = UpdateActivityRequest {
            performed_at: Some(Utc::now() + Duration::minutes(5)),
            duration_minutes: Some(45),
            ..UpdateActivityRequest::default()
        };
        let Err(err) = f.service.update(f.user_id, activity.id, future).await else {
            panic!("future update accepted");
        };
        assert_eq!(err.field(), Some("performed_at"));

        for minutes in [0, 1441] {
            let changes = UpdateActivityRequest {
                duration_minutes: Some(minutes),
                ..UpdateActivityRequest::default()
            };
            let Err(err) = f.service.update(f.user_id, activity.id, changes).await else {
                panic!("{minutes} minutes accepted");
            };
            assert_eq!(err.field(), Some("duration_minutes"));
        }

        let Ok(stored) = f.service.get(f.user_id, activity.id).await else {
            panic!("activity missing");
        };
        assert_eq!(stored, activity);
    }

    #[tokio::test]
    async fn moving_activity_recomputes_both_days() {
        let f = fixture().await;
        let moved_to = Utc::now() - Duration::seconds(1);
        let new_day = moved_to.date_naive();
        let old_day = new_day - Duration::days(1);
        let mut req = request(30);
        req.performed_at = Some(dates::day_bounds(new_day).start - Duration::hours(1));

        let Ok(activity) = f.service.create(f.user_id, req).await else {
            panic!("create failed");
        };
        let Ok(Some(old_row)) = f.store.daily_goal(f.user_id, old_day).await else {
            panic!("old day row missing");
        };
        assert_eq!(old_row.sweat_loss_ml, 601);

        let changes = UpdateActivityRequest {
            performed_at: Some(moved_to),
            ..UpdateActivityRequest::default()
        };
        let Ok(moved) = f.service.update(f.user_id, activity.id, changes).await else {
            panic!("update failed");
        };
        assert_eq!(moved.day(), new_day);

        let Ok(Some(old_row)) = f.store.daily_goal(f.user_id, old_day).await else {
            panic!("old day row missing");
        };
        assert_eq!(old_row.sweat_loss_ml, 0);
        assert_eq!(old_row.target_ml, old_row.baseline_ml);
        let Ok(Some(new_row)) = f.store.daily_goal(f.user_id, new_day).await else {
            panic!("new day row missing");
        };
        assert_eq!(new_row.sweat_loss_ml, 601);
        assert_eq!(new_row.target_ml, new_row.baseline_ml + 601);
        if new_day == dates::today() {
            assert_eq!(user_goal(&f).await, new_row.target_ml);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_keep_every_sweat_loss() {
        let f = fixture().await;
        let at = Utc::now() - Duration::seconds(5);
        let day = at.date_naive();

        let mut handles = Vec::new();
        for _ in 0..200 {
            let service = f.service.clone();
            let user_id = f.user_id;
            let mut req = request(30);
            req.performed_at = Some(at);
            handles.push(tokio::spawn(async move { service.create(user_id, req).await }));
        }
        for handle in handles {
            let Ok(Ok(_)) = handle.await else {
                panic!("create failed");
            };
        }

        let Ok(activities) = f.store.activities_in(f.user_id, dates::day_bounds(day)).await else {
            panic!("list failed");
        };
        assert_eq!(activities.len(), 200);
        let Ok(Some(row)) = f.store.daily_goal(f.user_id, day).await else {
            panic!("goal row missing");
        };
        assert_eq!(row.sweat_loss_ml, 200 * 601);
        assert_eq!(row.target_ml, row.baseline_ml + 200 * 601);
        if day == dates::today() {
            assert_eq!(user_goal(&f).await, row.target_ml);
        }
    }
}
