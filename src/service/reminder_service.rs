//! Hydration reminders.
//!
//! Reminders are stored schedules only; delivery happens on the client.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use super::load_user;
use crate::api::dto::{CreateReminderRequest, UpdateReminderRequest};
use crate::domain::{Reminder, UsageLimits, UserId};
use crate::error::ApiError;
use crate::persistence::Store;

/// Reminder CRUD with free-plan quotas.
#[derive(Debug, Clone)]
pub struct ReminderService {
    store: Arc<dyn Store>,
}

impl ReminderService {
    /// Creates a new `ReminderService`.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// The caller's reminders ordered by time of day.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<Reminder>, ApiError> {
        Ok(self.store.reminders(user_id).await?)
    }

    /// Fetches one reminder.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if it does not exist for this user.
    pub async fn get(&self, user_id: UserId, id: Uuid) -> Result<Reminder, ApiError> {
        self.store
            .reminder(user_id, id)
            .await?
            .ok_or_else(|| ApiError::not_found("reminder", id))
    }

    /// Schedules a reminder.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for an invalid message and
    /// [`ApiError::UsageLimitReached`] when the plan quota is used up.
    pub async fn create(
        &self,
        user_id: UserId,
        req: CreateReminderRequest,
    ) -> Result<Reminder, ApiError> {
        req.validate()?;
        let user = load_user(self.store.as_ref(), user_id).await?;
        if let Some(limit) = UsageLimits::for_plan(user.is_premium).max_reminders {
            let count = self.store.reminders(user_id).await?.len();
            if count >= usize::try_from(limit).unwrap_or(usize::MAX) {
                return Err(ApiError::UsageLimitReached {
                    resource: "reminders",
                    limit,
                });
            }
        }

        let mut reminder = Reminder::new(
            user_id,
            req.time,
            req.message.trim().to_string(),
            req.recurrence,
        );
        reminder.is_active = req.is_active;
        self.store.save_reminder(&reminder).await?;

        tracing::info!(%user_id, reminder_id = %reminder.id, time = %reminder.time, "reminder created");
        Ok(reminder)
    }

    /// Edits a reminder.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown reminder and
    /// [`ApiError::Validation`] for an invalid message.
    pub async fn update(
        &self,
        user_id: UserId,
        id: Uuid,
        req: UpdateReminderRequest,
    ) -> Result<Reminder, ApiError> {
        req.validate()?;
        let mut reminder = self.get(user_id, id).await?;
        if let Some(time) = req.time {
            reminder.time = time;
        }
        if let Some(message) = req.message {
            reminder.message = message.trim().to_string();
        }
        if let Some(recurrence) = req.recurrence {
            reminder.recurrence = recurrence;
        }
        if let Some(is_active) = req.is_active {
            reminder.is_active = is_active;
        }
        reminder.updated_at = Utc::now();
        self.store.save_reminder(&reminder).await?;
        tracing::info!(%user_id, reminder_id = %id, "reminder updated");
        Ok(reminder)
    }

    /// Deletes a reminder.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if it does not exist for this user.
    pub async fn delete(&self, user_id: UserId, id: Uuid) -> Result<(), ApiError> {
        if !self.store.delete_reminder(user_id, id).await? {
            return Err(ApiError::not_found("reminder", id));
        }
        tracing::info!(%user_id, reminder_id = %id, "reminder deleted");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::NaiveTime;

    use super::*;
    use crate::domain::{Recurrence, User};
    use crate::persistence::MemoryStore;

    fn at(hour: u32, message: &str) -> CreateReminderRequest {
        let Some(time) = NaiveTime::from_hms_opt(hour, 0, 0) else {
            panic!("bad hour {hour}");
        };
        CreateReminderRequest {
            time,
            message: message.into(),
            recurrence: Recurrence::Daily,
            is_active: true,
        }
    }

    async fn setup() -> (ReminderService, UserId) {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let user = User::new("ana".into(), "ana@example.com".into(), "hash".into());
        let Ok(()) = store.insert_user(&user).await else {
            panic!("insert failed");
        };
        (ReminderService::new(store), user.id)
    }

    #[tokio::test]
    async fn listed_by_time_of_day() {
        let (service, user_id) = setup().await;
        for (hour, msg) in [(15, "afternoon"), (8, "morning"), (11, "late morning")] {
            assert!(service.create(user_id, at(hour, msg)).await.is_ok());
        }
        let Ok(reminders) = service.list(user_id).await else {
            panic!("list failed");
        };
        let messages: Vec<_> = reminders.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, ["morning", "late morning", "afternoon"]);

        assert!(matches!(
            service.create(user_id, at(20, "evening")).await,
            Err(ApiError::UsageLimitReached { resource: "reminders", limit: 3 })
        ));
    }

    #[tokio::test]
    async fn message_length_is_checked() {
        let (service, user_id) = setup().await;
        let Err(err) = service.create(user_id, at(9, "")).await else {
            panic!("empty message accepted");
        };
        assert_eq!(err.field(), Some("message"));
        let long = "x".repeat(256);
        assert!(service.create(user_id, at(9, &long)).await.is_err());
        assert!(service.create(user_id, at(9, &"x".repeat(255))).await.is_ok());
    }

    #[tokio::test]
    async fn update_toggles_and_reschedules() {
        let (service, user_id) = setup().await;
        let Ok(reminder) = service.create(user_id, at(9, "drink")).await else {
            panic!("create failed");
        };
        let changes = UpdateReminderRequest {
            time: NaiveTime::from_hms_opt(10, 30, 0),
            recurrence: Some(Recurrence::Weekdays),
            is_active: Some(false),
            ..UpdateReminderRequest::default()
        };
        let Ok(updated) = service.update(user_id, reminder.id, changes).await else {
            panic!("update failed");
        };
        assert!(!updated.is_active);
        assert_eq!(updated.recurrence, Recurrence::Weekdays);
        assert_eq!(updated.time, NaiveTime::from_hms_opt(10, 30, 0).unwrap_or_default());

        assert!(service.delete(user_id, reminder.id).await.is_ok());
        assert!(matches!(
            service.delete(user_id, reminder.id).await,
            Err(ApiError::NotFound { .. })
        ));
    }
}
