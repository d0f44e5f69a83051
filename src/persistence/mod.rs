//! Persistence layer: the [`Store`] trait and its implementations.
//!
//! [`MemoryStore`] keeps everything in process memory and backs tests and
//! persistence-disabled deployments. [`PostgresStore`] uses `sqlx::PgPool`.
//!
//! Writes that change a goal input take a [`GoalSync`] naming the days to
//! recompute. Implementations serialise writes per user, apply the change,
//! then rebuild those days' goal rows from the stored entries before
//! releasing the lock, so concurrent writers never overwrite each other's
//! totals.

pub mod memory;
pub mod models;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::beverage::BeverageSeed;
use crate::domain::{
    Activity, Beverage, Consumption, Container, DailyGoal, ProfileChanges, Reminder, User, UserId,
};
use crate::hydration::dates::{self, DateRange, TimeRange};

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Errors surfaced by a [`Store`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A unique column already holds this value.
    #[error("duplicate value for {field}")]
    Duplicate {
        /// Column / request field name (`"username"`, `"email"`).
        field: &'static str,
    },
    /// Any other database failure.
    #[error("database error: {0}")]
    Database(String),
}

/// Convenience alias for store results.
pub type StoreResult<T> = Result<T, StoreError>;

/// Days whose goal rows a write must rebuild, for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalSync {
    /// User whose goals change.
    pub user_id: UserId,
    /// Affected days, sorted and deduplicated.
    pub days: Vec<NaiveDate>,
    /// The current day; rebuilding it also refreshes the user's
    /// `daily_goal_ml`.
    pub today: NaiveDate,
}

impl GoalSync {
    /// A sync that rebuilds nothing.
    #[must_use]
    pub fn none(user_id: UserId) -> Self {
        Self::for_days(user_id, &[])
    }

    /// A sync rebuilding `days`, relative to the current UTC day.
    #[must_use]
    pub fn for_days(user_id: UserId, days: &[NaiveDate]) -> Self {
        Self::at(user_id, days, dates::today())
    }

    /// A sync rebuilding `days`, with `today` as the current day.
    #[must_use]
    pub fn at(user_id: UserId, days: &[NaiveDate], today: NaiveDate) -> Self {
        let mut days = days.to_vec();
        days.sort_unstable();
        days.dedup();
        Self {
            user_id,
            days,
            today,
        }
    }

    /// Whether there is anything to rebuild.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Storage for every entity the service owns.
///
/// Lookups of user-owned rows always take the owner so that one user can
/// never read or modify another user's data. `Ok(None)` / `Ok(false)` mean
/// "not found for this owner".
#[async_trait]
pub trait Store: Send + Sync + std::fmt::Debug {
    /// Checks that the backing storage is reachable.
    async fn ping(&self) -> StoreResult<()>;

    // ── Users ───────────────────────────────────────────────────────────

    /// Inserts a new user.
    async fn insert_user(&self, user: &User) -> StoreResult<()>;

    /// Overwrites the given profile fields and rebuilds `sync`'s days in
    /// the same write. Returns the stored user afterwards, `None` if absent.
    async fn update_profile(
        &self,
        user_id: UserId,
        changes: &ProfileChanges,
        sync: &GoalSync,
    ) -> StoreResult<Option<User>>;

    /// Replaces only the password hash. Returns `false` if the user is absent.
    async fn update_password(&self, user_id: UserId, password_hash: &str) -> StoreResult<bool>;

    /// Sets the premium flag. Returns `false` if the user is absent.
    ///
    /// Plan changes have no HTTP endpoint; operators call this directly.
    async fn set_premium(&self, user_id: UserId, is_premium: bool) -> StoreResult<bool>;

    /// Looks up a user by id.
    async fn user_by_id(&self, id: UserId) -> StoreResult<Option<User>>;

    /// Looks up a user by exact username.
    async fn user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// Looks up a user by email (case-insensitive).
    async fn user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    // ── Tokens ──────────────────────────────────────────────────────────

    /// Records a revoked token id until `expires_at`, purging entries that
    /// have already expired.
    async fn revoke_token(
        &self,
        jti: Uuid,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> StoreResult<()>;

    /// Returns `true` if the token id was revoked.
    async fn is_token_revoked(&self, jti: Uuid) -> StoreResult<bool>;

    // ── Activities ──────────────────────────────────────────────────────

    /// Fetches one activity.
    async fn activity(&self, user_id: UserId, id: Uuid) -> StoreResult<Option<Activity>>;

    /// Activities performed within `range`, oldest first.
    async fn activities_in(&self, user_id: UserId, range: TimeRange) -> StoreResult<Vec<Activity>>;

    /// Inserts or replaces an activity and applies `sync`.
    async fn save_activity(&self, activity: &Activity, sync: &GoalSync) -> StoreResult<()>;

    /// Deletes an activity and applies `sync`. Returns `false` if absent.
    async fn delete_activity(&self, user_id: UserId, id: Uuid, sync: &GoalSync)
    -> StoreResult<bool>;

    // ── Beverages ───────────────────────────────────────────────────────

    /// Catalog entries, optionally including inactive ones, by name.
    async fn beverages(&self, include_inactive: bool) -> StoreResult<Vec<Beverage>>;

    /// Fetches one catalog entry.
    async fn beverage(&self, id: Uuid) -> StoreResult<Option<Beverage>>;

    /// Inserts seeds whose slug is not yet present. Returns the number inserted.
    async fn seed_beverages(&self, seeds: &[BeverageSeed]) -> StoreResult<u64>;

    // ── Containers ──────────────────────────────────────────────────────

    /// A user's containers, favorites first.
    async fn containers(&self, user_id: UserId) -> StoreResult<Vec<Container>>;

    /// Fetches one container.
    async fn container(&self, user_id: UserId, id: Uuid) -> StoreResult<Option<Container>>;

    /// Inserts or replaces a container.
    async fn save_container(&self, container: &Container) -> StoreResult<()>;

    /// Deletes a container, detaching it from past consumptions.
    async fn delete_container(&self, user_id: UserId, id: Uuid) -> StoreResult<bool>;

    // ── Consumptions ────────────────────────────────────────────────────

    /// Fetches one consumption.
    async fn consumption(&self, user_id: UserId, id: Uuid) -> StoreResult<Option<Consumption>>;

    /// Consumptions within `range`, oldest first.
    async fn consumptions_in(
        &self,
        user_id: UserId,
        range: TimeRange,
    ) -> StoreResult<Vec<Consumption>>;

    /// Inserts or replaces a consumption and applies `sync`.
    async fn save_consumption(&self, consumption: &Consumption, sync: &GoalSync)
    -> StoreResult<()>;

    /// Deletes a consumption and applies `sync`. Returns `false` if absent.
    async fn delete_consumption(
        &self,
        user_id: UserId,
        id: Uuid,
        sync: &GoalSync,
    ) -> StoreResult<bool>;

    // ── Daily goals ─────────────────────────────────────────────────────

    /// Fetches the goal row for one day.
    async fn daily_goal(&self, user_id: UserId, date: NaiveDate) -> StoreResult<Option<DailyGoal>>;

    /// Goal rows inside `range`, oldest first.
    async fn daily_goals_in(&self, user_id: UserId, range: DateRange)
    -> StoreResult<Vec<DailyGoal>>;

    /// Rebuilds the goal rows for `sync`'s days from the stored entries and
    /// returns them in day order.
    async fn refresh_goals(&self, sync: &GoalSync) -> StoreResult<Vec<DailyGoal>>;

    // ── Reminders ───────────────────────────────────────────────────────

    /// A user's reminders ordered by time of day.
    async fn reminders(&self, user_id: UserId) -> StoreResult<Vec<Reminder>>;

    /// Fetches one reminder.
    async fn reminder(&self, user_id: UserId, id: Uuid) -> StoreResult<Option<Reminder>>;

    /// Inserts or replaces a reminder.
    async fn save_reminder(&self, reminder: &Reminder) -> StoreResult<()>;

    /// Deletes a reminder. Returns `false` if absent.
    async fn delete_reminder(&self, user_id: UserId, id: Uuid) -> StoreResult<bool>;
}
