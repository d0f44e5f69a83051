//! In-process store backed by hash maps.
//!
//! All tables sit behind a single [`tokio::sync::RwLock`]. A mutation and
//! the goal rows rebuilt for its [`GoalSync`] share one write guard, so the
//! rebuild always sees every earlier write and is never observed half-done.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{GoalSync, Store, StoreError, StoreResult};
use crate::domain::beverage::BeverageSeed;
use crate::domain::{
    Activity, Beverage, Consumption, Container, DailyGoal, ProfileChanges, Reminder, User, UserId,
};
use crate::hydration::dates::{self, DateRange, TimeRange};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, User>,
    revoked_tokens: HashMap<Uuid, DateTime<Utc>>,
    activities: HashMap<Uuid, Activity>,
    beverages: HashMap<Uuid, Beverage>,
    containers: HashMap<Uuid, Container>,
    consumptions: HashMap<Uuid, Consumption>,
    daily_goals: HashMap<(UserId, NaiveDate), DailyGoal>,
    reminders: HashMap<Uuid, Reminder>,
}

impl Tables {
    fn rebuild(&mut self, sync: &GoalSync) -> Vec<DailyGoal> {
        let Some(user) = self.users.get(&sync.user_id).cloned() else {
            return Vec::new();
        };
        let now = Utc::now();
        let mut rows = Vec::with_capacity(sync.days.len());
        for &day in &sync.days {
            let bounds = dates::day_bounds(day);
            let activities: Vec<Activity> = self
                .activities
                .values()
                .filter(|a| a.user_id == user.id && bounds.contains(a.performed_at))
                .cloned()
                .collect();
            let consumptions: Vec<Consumption> = self
                .consumptions
                .values()
                .filter(|c| c.user_id == user.id && bounds.contains(c.consumed_at))
                .cloned()
                .collect();

            let mut row = DailyGoal::compose(&user, day, &activities, &consumptions, now);
            if let Some(existing) = self.daily_goals.get(&(user.id, day)) {
                row.id = existing.id;
            }
            self.daily_goals.insert((user.id, day), row.clone());
            if day == sync.today
                && let Some(stored) = self.users.get_mut(&user.id)
            {
                stored.daily_goal_ml = row.target_ml;
            }
            rows.push(row);
        }
        rows
    }

    fn check_unique(&self, user: &User) -> StoreResult<()> {
        for other in self.users.values().filter(|u| u.id != user.id) {
            if other.username == user.username {
                return Err(StoreError::Duplicate { field: "username" });
            }
            if other.email.eq_ignore_ascii_case(&user.email) {
                return Err(StoreError::Duplicate { field: "email" });
            }
        }
        Ok(())
    }
}

/// Store that keeps all rows in memory. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with the given beverage catalog.
    #[must_use]
    pub fn with_beverages(seeds: &[BeverageSeed]) -> Self {
        let beverages = seeds
            .iter()
            .map(Beverage::from)
            .map(|b| (b.id, b))
            .collect();
        Self {
            tables: RwLock::new(Tables {
                beverages,
                ..Tables::default()
            }),
        }
    }

    /// Marks a beverage active or inactive.
    pub async fn set_beverage_active(&self, id: Uuid, is_active: bool) -> bool {
        let mut tables = self.tables.write().await;
        tables
            .beverages
            .get_mut(&id)
            .map(|b| b.is_active = is_active)
            .is_some()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.check_unique(user)?;
        tables.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        changes: &ProfileChanges,
        sync: &GoalSync,
    ) -> StoreResult<Option<User>> {
        let mut tables = self.tables.write().await;
        let Some(user) = tables.users.get_mut(&user_id) else {
            return Ok(None);
        };
        changes.apply_to(user, Utc::now());
        tables.rebuild(sync);
        Ok(tables.users.get(&user_id).cloned())
    }

    async fn update_password(&self, user_id: UserId, password_hash: &str) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .users
            .get_mut(&user_id)
            .map(|u| {
                u.password_hash = password_hash.to_string();
                u.updated_at = Utc::now();
            })
            .is_some())
    }

    async fn set_premium(&self, user_id: UserId, is_premium: bool) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .users
            .get_mut(&user_id)
            .map(|u| u.is_premium = is_premium)
            .is_some())
    }

    async fn user_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn revoke_token(
        &self,
        jti: Uuid,
        _user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let now = Utc::now();
        let mut tables = self.tables.write().await;
        tables.revoked_tokens.retain(|_, expires| *expires >= now);
        tables.revoked_tokens.insert(jti, expires_at);
        Ok(())
    }

    async fn is_token_revoked(&self, jti: Uuid) -> StoreResult<bool> {
        Ok(self.tables.read().await.revoked_tokens.contains_key(&jti))
    }

    async fn activity(&self, user_id: UserId, id: Uuid) -> StoreResult<Option<Activity>> {
        let tables = self.tables.read().await;
        Ok(tables
            .activities
            .get(&id)
            .filter(|a| a.user_id == user_id)
            .cloned())
    }

    async fn activities_in(&self, user_id: UserId, range: TimeRange) -> StoreResult<Vec<Activity>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Activity> = tables
            .activities
            .values()
            .filter(|a| a.user_id == user_id && range.contains(a.performed_at))
            .cloned()
            .collect();
        rows.sort_by_key(|a| a.performed_at);
        Ok(rows)
    }

    async fn save_activity(&self, activity: &Activity, sync: &GoalSync) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.activities.insert(activity.id, activity.clone());
        tables.rebuild(sync);
        Ok(())
    }

    async fn delete_activity(
        &self,
        user_id: UserId,
        id: Uuid,
        sync: &GoalSync,
    ) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let owned = tables
            .activities
            .get(&id)
            .is_some_and(|a| a.user_id == user_id);
        if !owned {
            return Ok(false);
        }
        tables.activities.remove(&id);
        tables.rebuild(sync);
        Ok(true)
    }

    async fn beverages(&self, include_inactive: bool) -> StoreResult<Vec<Beverage>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Beverage> = tables
            .beverages
            .values()
            .filter(|b| include_inactive || b.is_active)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn beverage(&self, id: Uuid) -> StoreResult<Option<Beverage>> {
        Ok(self.tables.read().await.beverages.get(&id).cloned())
    }

    async fn seed_beverages(&self, seeds: &[BeverageSeed]) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;
        let mut inserted = 0;
        for seed in seeds {
            if tables.beverages.values().any(|b| b.slug == seed.slug) {
                continue;
            }
            let beverage = Beverage::from(seed);
            tables.beverages.insert(beverage.id, beverage);
            inserted += 1;
        }
        Ok(inserted)
    }

    async fn containers(&self, user_id: UserId) -> StoreResult<Vec<Container>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Container> = tables
            .containers
            .values()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.is_favorite
                .cmp(&a.is_favorite)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(rows)
    }

    async fn container(&self, user_id: UserId, id: Uuid) -> StoreResult<Option<Container>> {
        let tables = self.tables.read().await;
        Ok(tables
            .containers
            .get(&id)
            .filter(|c| c.user_id == user_id)
            .cloned())
    }

    async fn save_container(&self, container: &Container) -> StoreResult<()> {
        self.tables
            .write()
            .await
            .containers
            .insert(container.id, container.clone());
        Ok(())
    }

    async fn delete_container(&self, user_id: UserId, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let owned = tables
            .containers
            .get(&id)
            .is_some_and(|c| c.user_id == user_id);
        if !owned {
            return Ok(false);
        }
        tables.containers.remove(&id);
        for consumption in tables.consumptions.values_mut() {
            if consumption.container_id == Some(id) {
                consumption.container_id = None;
            }
        }
        Ok(true)
    }

    async fn consumption(&self, user_id: UserId, id: Uuid) -> StoreResult<Option<Consumption>> {
        let tables = self.tables.read().await;
        Ok(tables
            .consumptions
            .get(&id)
            .filter(|c| c.user_id == user_id)
            .cloned())
    }

    async fn consumptions_in(
        &self,
        user_id: UserId,
        range: TimeRange,
    ) -> StoreResult<Vec<Consumption>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Consumption> = tables
            .consumptions
            .values()
            .filter(|c| c.user_id == user_id && range.contains(c.consumed_at))
            .cloned()
            .collect();
        rows.sort_by_key(|c| c.consumed_at);
        Ok(rows)
    }

    async fn save_consumption(
        &self,
        consumption: &Consumption,
        sync: &GoalSync,
    ) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .consumptions
            .insert(consumption.id, consumption.clone());
        tables.rebuild(sync);
        Ok(())
    }

    async fn delete_consumption(
        &self,
        user_id: UserId,
        id: Uuid,
        sync: &GoalSync,
    ) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let owned = tables
            .consumptions
            .get(&id)
            .is_some_and(|c| c.user_id == user_id);
        if !owned {
            return Ok(false);
        }
        tables.consumptions.remove(&id);
        tables.rebuild(sync);
        Ok(true)
    }

    async fn daily_goal(&self, user_id: UserId, date: NaiveDate) -> StoreResult<Option<DailyGoal>> {
        Ok(self
            .tables
            .read()
            .await
            .daily_goals
            .get(&(user_id, date))
            .cloned())
    }

    async fn daily_goals_in(
        &self,
        user_id: UserId,
        range: DateRange,
    ) -> StoreResult<Vec<DailyGoal>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<DailyGoal> = tables
            .daily_goals
            .values()
            .filter(|g| g.user_id == user_id && range.contains(g.date))
            .cloned()
            .collect();
        rows.sort_by_key(|g| g.date);
        Ok(rows)
    }

    async fn refresh_goals(&self, sync: &GoalSync) -> StoreResult<Vec<DailyGoal>> {
        Ok(self.tables.write().await.rebuild(sync))
    }

    async fn reminders(&self, user_id: UserId) -> StoreResult<Vec<Reminder>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Reminder> = tables
            .reminders
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.time);
        Ok(rows)
    }

    async fn reminder(&self, user_id: UserId, id: Uuid) -> StoreResult<Option<Reminder>> {
        let tables = self.tables.read().await;
        Ok(tables
            .reminders
            .get(&id)
            .filter(|r| r.user_id == user_id)
            .cloned())
    }

    async fn save_reminder(&self, reminder: &Reminder) -> StoreResult<()> {
        self.tables
            .write()
            .await
            .reminders
            .insert(reminder.id, reminder.clone());
        Ok(())
    }

    async fn delete_reminder(&self, user_id: UserId, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let owned = tables
            .reminders
            .get(&id)
            .is_some_and(|r| r.user_id == user_id);
        if owned {
            tables.reminders.remove(&id);
        }
        Ok(owned)
    }
}
