//! Profile reads and updates.

use std::sync::Arc;

use validator::Validate;

use super::auth_service::check_birth_date;
use super::goal_service::GoalService;
use super::load_user;
use crate::api::dto::UpdateProfileRequest;
use crate::domain::{ProfileChanges, User, UserId};
use crate::error::ApiError;
use crate::hydration::dates;
use crate::persistence::{GoalSync, Store};

/// Reads and edits the caller's profile.
#[derive(Debug, Clone)]
pub struct ProfileService {
    store: Arc<dyn Store>,
    goals: Arc<GoalService>,
}

impl ProfileService {
    /// Creates a new `ProfileService`.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, goals: Arc<GoalService>) -> Self {
        Self { store, goals }
    }

    /// The caller's profile with today's goal up to date.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown user.
    pub async fn get(&self, user_id: UserId) -> Result<User, ApiError> {
        self.goals.today(user_id).await?;
        load_user(self.store.as_ref(), user_id).await
    }

    /// Applies the given fields and recomputes today's goal.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for out-of-range weight or birth date.
    pub async fn update(&self, user_id: UserId, req: UpdateProfileRequest) -> Result<User, ApiError> {
        req.validate()?;
        let today = dates::today();
        if let Some(birth_date) = req.birth_date {
            check_birth_date(birth_date, today)?;
        }

        let changes = ProfileChanges {
            display_name: req
                .display_name
                .map(|name| Some(name).filter(|n| !n.trim().is_empty())),
            weight_kg: req.weight_kg,
            birth_date: req.birth_date,
            activity_level: req.activity_level,
            is_fragile: req.is_fragile,
        };
        let sync = GoalSync::at(user_id, &[today], today);
        let user = self
            .store
            .update_profile(user_id, &changes, &sync)
            .await?
            .ok_or_else(|| ApiError::not_found("user", user_id))?;
        tracing::info!(%user_id, daily_goal_ml = user.daily_goal_ml, "profile updated");
        Ok(user)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::persistence::MemoryStore;

    async fn setup() -> (ProfileService, UserId) {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let user = User::new("ana".into(), "ana@example.com".into(), "hash".into());
        let Ok(()) = store.insert_user(&user).await else {
            panic!("insert failed");
        };
        let goals = Arc::new(GoalService::new(Arc::clone(&store)));
        (ProfileService::new(store, goals), user.id)
    }

    #[tokio::test]
    async fn profile_change_recomputes_goal() {
        let (service, user_id) = setup().await;
        let Ok(before) = service.get(user_id).await else {
            panic!("get failed");
        };
        assert_eq!(before.daily_goal_ml, 2000);

        let req = UpdateProfileRequest {
            weight_kg: Some(70.0),
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1),
            ..UpdateProfileRequest::default()
        };
        let Ok(after) = service.update(user_id, req).await else {
            panic!("update failed");
        };
        assert_eq!(after.daily_goal_ml, 1820);

        let Ok(goal) = service.goals.today(user_id).await else {
            panic!("today failed");
        };
        assert_eq!(goal.target_ml, 1820);
    }

    #[tokio::test]
    async fn out_of_range_weight_is_rejected() {
        let (service, user_id) = setup().await;
        for weight in [0.5, 500.5] {
            let req = UpdateProfileRequest {
                weight_kg: Some(weight),
                ..UpdateProfileRequest::default()
            };
            let Err(err) = service.update(user_id, req).await else {
                panic!("weight {weight} accepted");
            };
            assert_eq!(err.field(), Some("weight_kg"));
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_updates_keep_each_field() {
        let (service, user_id) = setup().await;
        let weight = tokio::spawn({
            let service = service.clone();
            async move {
                let req = UpdateProfileRequest {
                    weight_kg: Some(70.0),
                    ..UpdateProfileRequest::default()
                };
                service.update(user_id, req).await
            }
        });
        let birth = tokio::spawn({
            let service = service.clone();
            async move {
                let req = UpdateProfileRequest {
                    birth_date: NaiveDate::from_ymd_opt(1990, 1, 1),
                    ..UpdateProfileRequest::default()
                };
                service.update(user_id, req).await
            }
        });
        let (Ok(Ok(_)), Ok(Ok(_))) = (weight.await, birth.await) else {
            panic!("update failed");
        };

        let Ok(user) = service.get(user_id).await else {
            panic!("get failed");
        };
        assert_eq!(user.weight_kg, Some(70.0));
        assert_eq!(user.birth_date, NaiveDate::from_ymd_opt(1990, 1, 1));
        assert_eq!(user.daily_goal_ml, 1820);
        assert_eq!(user.password_hash, "hash");
    }
}
