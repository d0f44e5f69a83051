//! Service layer: business logic orchestration.
//!
//! Services validate request DTOs, enforce ownership and plan limits, and
//! pass every goal-affecting mutation a [`GoalSync`](crate::persistence::GoalSync)
//! naming the days the store must rebuild in the same write.

pub mod activity_service;
pub mod auth_service;
pub mod beverage_service;
pub mod consumption_service;
pub mod container_service;
pub mod goal_service;
pub mod premium_service;
pub mod profile_service;
pub mod reminder_service;

pub use activity_service::ActivityService;
pub use auth_service::AuthService;
pub use beverage_service::BeverageService;
pub use consumption_service::ConsumptionService;
pub use container_service::ContainerService;
pub use goal_service::GoalService;
pub use premium_service::PremiumService;
pub use profile_service::ProfileService;
pub use reminder_service::ReminderService;

use chrono::{DateTime, Utc};

use crate::domain::{User, UserId};
use crate::error::ApiError;
use crate::persistence::Store;

/// Loads a user that must exist.
pub(crate) async fn load_user(store: &dyn Store, user_id: UserId) -> Result<User, ApiError> {
    store
        .user_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("user", user_id))
}

/// Rejects timestamps later than `now`.
pub(crate) fn ensure_not_future(
    field: &'static str,
    at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(), ApiError> {
    if at > now {
        return Err(ApiError::validation(field, "cannot be in the future"));
    }
    Ok(())
}
