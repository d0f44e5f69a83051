//! PostgreSQL implementation of the [`Store`] trait.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::models::{
    ActivityRow, BeverageRow, ConsumptionRow, ContainerRow, DailyGoalRow, ReminderRow, UserRow,
};
use super::{GoalSync, Store, StoreError, StoreResult};
use crate::config::ServiceConfig;
use crate::domain::beverage::BeverageSeed;
use crate::domain::{
    Activity, Beverage, Consumption, Container, DailyGoal, ProfileChanges, Reminder, User, UserId,
};
use crate::hydration::dates::{self, DateRange, TimeRange};

const USER_COLUMNS: &str = "id, username, email, password_hash, display_name, weight_kg, \
     birth_date, activity_level, is_fragile, is_premium, daily_goal_ml, created_at, updated_at";

const ACTIVITY_COLUMNS: &str = "id, user_id, activity_type, duration_minutes, intensity, \
     performed_at, notes, sweat_loss_ml, created_at, updated_at";

const BEVERAGE_COLUMNS: &str =
    "id, slug, name, hydration_factor, is_water, is_alcoholic, is_premium, is_active";

const CONTAINER_COLUMNS: &str =
    "id, user_id, name, capacity_ml, is_favorite, color, icon, created_at, updated_at";

const CONSUMPTION_COLUMNS: &str = "id, user_id, beverage_id, container_id, volume_ml, \
     effective_ml, net_dehydration_ml, compensation_water_ml, consumed_at, created_at, updated_at";

const DAILY_GOAL_COLUMNS: &str = "id, user_id, goal_date, baseline_ml, sweat_loss_ml, \
     target_ml, consumed_ml, effective_ml, completed, updated_at";

const REMINDER_COLUMNS: &str =
    "id, user_id, remind_at, message, recurrence, is_active, created_at, updated_at";

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool sized from `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError::Database`] if the database is unreachable.
    pub async fn connect(config: &ServiceConfig) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await
            .map_err(map_err)?;
        Ok(Self::new(pool))
    }

    /// Applies pending migrations from `migrations/`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError::Database`] if a migration fails.
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))
    }
}

/// Maps an `sqlx` error, recognising unique violations on user identity.
fn map_err(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err
        && db.is_unique_violation()
    {
        match db.constraint() {
            Some(c) if c.contains("username") => {
                return StoreError::Duplicate { field: "username" };
            }
            Some(c) if c.contains("email") => return StoreError::Duplicate { field: "email" },
            _ => {}
        }
    }
    StoreError::Database(err.to_string())
}

/// Locks the user's row for the rest of the transaction.
///
/// Every goal-affecting write takes this lock before touching any other
/// row, which serialises them per user. `NO KEY UPDATE` does not block the
/// key-share locks taken by foreign key checks.
async fn lock_user(conn: &mut PgConnection, user_id: UserId) -> Result<Option<User>, sqlx::Error> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1 FOR NO KEY UPDATE");
    let row = sqlx::query_as::<_, UserRow>(&sql)
        .bind(user_id.as_uuid())
        .fetch_optional(conn)
        .await?;
    Ok(row.map(User::from))
}

/// Rebuilds the goal rows for `sync`'s days from the entries visible to
/// this transaction. The caller must hold [`lock_user`].
async fn rebuild_goals(
    conn: &mut PgConnection,
    sync: &GoalSync,
) -> Result<Vec<DailyGoal>, sqlx::Error> {
    if sync.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
    let Some(user) = sqlx::query_as::<_, UserRow>(&sql)
        .bind(sync.user_id.as_uuid())
        .fetch_optional(&mut *conn)
        .await?
        .map(User::from)
    else {
        return Ok(Vec::new());
    };

    let now = Utc::now();
    let mut rows = Vec::with_capacity(sync.days.len());
    for &day in &sync.days {
        let bounds = dates::day_bounds(day);
        let activities = select_activities(&mut *conn, user.id, bounds).await?;
        let consumptions = select_consumptions(&mut *conn, user.id, bounds).await?;
        let row = DailyGoal::compose(&user, day, &activities, &consumptions, now);
        let stored = upsert_daily_goal(&mut *conn, &row).await?;
        if day == sync.today {
            sqlx::query("UPDATE users SET daily_goal_ml = $2 WHERE id = $1")
                .bind(user.id.as_uuid())
                .bind(stored.target_ml)
                .execute(&mut *conn)
                .await?;
        }
        rows.push(stored);
    }
    Ok(rows)
}

async fn select_activities(
    conn: &mut PgConnection,
    user_id: UserId,
    range: TimeRange,
) -> Result<Vec<Activity>, sqlx::Error> {
    let sql = format!(
        "SELECT {ACTIVITY_COLUMNS} FROM activities \
         WHERE user_id = $1 AND performed_at >= $2 AND performed_at < $3 \
         ORDER BY performed_at ASC"
    );
    let rows = sqlx::query_as::<_, ActivityRow>(&sql)
        .bind(user_id.as_uuid())
        .bind(range.start)
        .bind(range.end)
        .fetch_all(conn)
        .await?;
    Ok(rows.into_iter().map(Activity::from).collect())
}

async fn select_consumptions(
    conn: &mut PgConnection,
    user_id: UserId,
    range: TimeRange,
) -> Result<Vec<Consumption>, sqlx::Error> {
    let sql = format!(
        "SELECT {CONSUMPTION_COLUMNS} FROM consumptions \
         WHERE user_id = $1 AND consumed_at >= $2 AND consumed_at < $3 \
         ORDER BY consumed_at ASC"
    );
    let rows = sqlx::query_as::<_, ConsumptionRow>(&sql)
        .bind(user_id.as_uuid())
        .bind(range.start)
        .bind(range.end)
        .fetch_all(conn)
        .await?;
    Ok(rows.into_iter().map(Consumption::from).collect())
}

/// Upserts a goal row, keeping the id of an existing row for the same day.
async fn upsert_daily_goal(
    conn: &mut PgConnection,
    goal: &DailyGoal,
) -> Result<DailyGoal, sqlx::Error> {
    let sql = format!(
        "INSERT INTO daily_goals (id, user_id, goal_date, baseline_ml, sweat_loss_ml, target_ml, \
         consumed_ml, effective_ml, completed, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
         ON CONFLICT (user_id, goal_date) DO UPDATE SET \
         baseline_ml = EXCLUDED.baseline_ml, sweat_loss_ml = EXCLUDED.sweat_loss_ml, \
         target_ml = EXCLUDED.target_ml, consumed_ml = EXCLUDED.consumed_ml, \
         effective_ml = EXCLUDED.effective_ml, completed = EXCLUDED.completed, \
         updated_at = EXCLUDED.updated_at \
         RETURNING {DAILY_GOAL_COLUMNS}"
    );
    let row = sqlx::query_as::<_, DailyGoalRow>(&sql)
        .bind(goal.id)
        .bind(goal.user_id.as_uuid())
        .bind(goal.date)
        .bind(goal.baseline_ml)
        .bind(goal.sweat_loss_ml)
        .bind(goal.target_ml)
        .bind(goal.consumed_ml)
        .bind(goal.effective_ml)
        .bind(goal.completed)
        .bind(goal.updated_at)
        .fetch_one(conn)
        .await?;
    Ok(DailyGoal::from(row))
}

impl PostgresStore {
    /// Opens a transaction holding the lock on `user_id`'s row.
    async fn begin_for_user(&self, user_id: UserId) -> StoreResult<Transaction<'static, Postgres>> {
        let mut tx = self.pool.begin().await.map_err(map_err)?;
        lock_user(&mut tx, user_id).await.map_err(map_err)?;
        Ok(tx)
    }

    async fn find_user(&self, clause: &str, value: &str) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {clause}");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(row.map(User::from))
    }

    async fn delete_owned(
        &self,
        table: &str,
        user_id: UserId,
        id: Uuid,
        sync: &GoalSync,
    ) -> StoreResult<bool> {
        let mut tx = self.begin_for_user(user_id).await?;
        let sql = format!("DELETE FROM {table} WHERE id = $1 AND user_id = $2");
        let deleted = sqlx::query(&sql)
            .bind(id)
            .bind(user_id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(map_err)?
            .rows_affected();
        if deleted == 0 {
            tx.rollback().await.map_err(map_err)?;
            return Ok(false);
        }
        rebuild_goals(&mut tx, sync).await.map_err(map_err)?;
        tx.commit().await.map_err(map_err)?;
        Ok(true)
    }
}

#[async_trait]
impl Store for PostgresStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(())
    }

    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO users (id, username, email, password_hash, display_name, weight_kg, \
             birth_date, activity_level, is_fragile, is_premium, daily_goal_ml, created_at, \
             updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
        )
        .bind(user.id.as_uuid())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.display_name)
        .bind(user.weight_kg)
        .bind(user.birth_date)
        .bind(user.activity_level.as_str())
        .bind(user.is_fragile)
        .bind(user.is_premium)
        .bind(user.daily_goal_ml)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_err)?;
        Ok(())
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        changes: &ProfileChanges,
        sync: &GoalSync,
    ) -> StoreResult<Option<User>> {
        let mut tx = self.begin_for_user(user_id).await?;
        let updated = sqlx::query(
            "UPDATE users SET \
             display_name = CASE WHEN $2 THEN $3 ELSE display_name END, \
             weight_kg = COALESCE($4, weight_kg), birth_date = COALESCE($5, birth_date), \
             activity_level = COALESCE($6, activity_level), \
             is_fragile = COALESCE($7, is_fragile), updated_at = $8 \
             WHERE id = $1",
        )
        .bind(user_id.as_uuid())
        .bind(changes.display_name.is_some())
        .bind(changes.display_name.clone().flatten())
        .bind(changes.weight_kg)
        .bind(changes.birth_date)
        .bind(changes.activity_level.map(|l| l.as_str()))
        .bind(changes.is_fragile)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(map_err)?
        .rows_affected();
        if updated == 0 {
            tx.rollback().await.map_err(map_err)?;
            return Ok(None);
        }
        rebuild_goals(&mut tx, sync).await.map_err(map_err)?;
        let user = lock_user(&mut tx, user_id).await.map_err(map_err)?;
        tx.commit().await.map_err(map_err)?;
        Ok(user)
    }

    async fn update_password(&self, user_id: UserId, password_hash: &str) -> StoreResult<bool> {
        let updated =
            sqlx::query("UPDATE users SET password_hash = $2, updated_at = $3 WHERE id = $1")
                .bind(user_id.as_uuid())
                .bind(password_hash)
                .bind(Utc::now())
                .execute(&self.pool)
                .await
                .map_err(map_err)?
                .rows_affected();
        Ok(updated > 0)
    }

    async fn set_premium(&self, user_id: UserId, is_premium: bool) -> StoreResult<bool> {
        let updated = sqlx::query("UPDATE users SET is_premium = $2 WHERE id = $1")
            .bind(user_id.as_uuid())
            .bind(is_premium)
            .execute(&self.pool)
            .await
            .map_err(map_err)?
            .rows_affected();
        Ok(updated > 0)
    }

    async fn user_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(row.map(User::from))
    }

    async fn user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        self.find_user("username = $1", username).await
    }

    async fn user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        self.find_user("lower(email) = lower($1)", email).await
    }

    async fn revoke_token(
        &self,
        jti: Uuid,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        sqlx::query("DELETE FROM revoked_tokens WHERE expires_at < now()")
            .execute(&self.pool)
            .await
            .map_err(map_err)?;
        sqlx::query(
            "INSERT INTO revoked_tokens (jti, user_id, expires_at) VALUES ($1, $2, $3) \
             ON CONFLICT (jti) DO NOTHING",
        )
        .bind(jti)
        .bind(user_id.as_uuid())
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(map_err)?;
        Ok(())
    }

    async fn is_token_revoked(&self, jti: Uuid) -> StoreResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM revoked_tokens WHERE jti = $1)")
            .bind(jti)
            .fetch_one(&self.pool)
            .await
            .map_err(map_err)
    }

    async fn activity(&self, user_id: UserId, id: Uuid) -> StoreResult<Option<Activity>> {
        let sql = format!("SELECT {ACTIVITY_COLUMNS} FROM activities WHERE id = $1 AND user_id = $2");
        let row = sqlx::query_as::<_, ActivityRow>(&sql)
            .bind(id)
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(row.map(Activity::from))
    }

    async fn activities_in(&self, user_id: UserId, range: TimeRange) -> StoreResult<Vec<Activity>> {
        let mut conn = self.pool.acquire().await.map_err(map_err)?;
        select_activities(&mut conn, user_id, range)
            .await
            .map_err(map_err)
    }

    async fn save_activity(&self, activity: &Activity, sync: &GoalSync) -> StoreResult<()> {
        let mut tx = self.begin_for_user(activity.user_id).await?;
        sqlx::query(
            "INSERT INTO activities (id, user_id, activity_type, duration_minutes, intensity, \
             performed_at, notes, sweat_loss_ml, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             ON CONFLICT (id) DO UPDATE SET activity_type = EXCLUDED.activity_type, \
             duration_minutes = EXCLUDED.duration_minutes, intensity = EXCLUDED.intensity, \
             performed_at = EXCLUDED.performed_at, notes = EXCLUDED.notes, \
             sweat_loss_ml = EXCLUDED.sweat_loss_ml, updated_at = EXCLUDED.updated_at",
        )
        .bind(activity.id)
        .bind(activity.user_id.as_uuid())
        .bind(activity.activity_type.as_str())
        .bind(activity.duration_minutes)
        .bind(activity.intensity.as_str())
        .bind(activity.performed_at)
        .bind(&activity.notes)
        .bind(activity.sweat_loss_ml)
        .bind(activity.created_at)
        .bind(activity.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_err)?;
        rebuild_goals(&mut tx, sync).await.map_err(map_err)?;
        tx.commit().await.map_err(map_err)?;
        Ok(())
    }

    async fn delete_activity(
        &self,
        user_id: UserId,
        id: Uuid,
        sync: &GoalSync,
    ) -> StoreResult<bool> {
        self.delete_owned("activities", user_id, id, sync).await
    }

    async fn beverages(&self, include_inactive: bool) -> StoreResult<Vec<Beverage>> {
        let sql = format!(
            "SELECT {BEVERAGE_COLUMNS} FROM beverages WHERE is_active OR $1 ORDER BY name ASC"
        );
        let rows = sqlx::query_as::<_, BeverageRow>(&sql)
            .bind(include_inactive)
            .fetch_all(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(rows.into_iter().map(Beverage::from).collect())
    }

    async fn beverage(&self, id: Uuid) -> StoreResult<Option<Beverage>> {
        let sql = format!("SELECT {BEVERAGE_COLUMNS} FROM beverages WHERE id = $1");
        let row = sqlx::query_as::<_, BeverageRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(row.map(Beverage::from))
    }

    async fn seed_beverages(&self, seeds: &[BeverageSeed]) -> StoreResult<u64> {
        let mut tx = self.pool.begin().await.map_err(map_err)?;
        let mut inserted = 0;
        for seed in seeds {
            let beverage = Beverage::from(seed);
            inserted += sqlx::query(
                "INSERT INTO beverages (id, slug, name, hydration_factor, is_water, \
                 is_alcoholic, is_premium, is_active) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
                 ON CONFLICT (slug) DO NOTHING",
            )
            .bind(beverage.id)
            .bind(&beverage.slug)
            .bind(&beverage.name)
            .bind(beverage.hydration_factor)
            .bind(beverage.is_water)
            .bind(beverage.is_alcoholic)
            .bind(beverage.is_premium)
            .bind(beverage.is_active)
            .execute(&mut *tx)
            .await
            .map_err(map_err)?
            .rows_affected();
        }
        tx.commit().await.map_err(map_err)?;
        Ok(inserted)
    }

    async fn containers(&self, user_id: UserId) -> StoreResult<Vec<Container>> {
        let sql = format!(
            "SELECT {CONTAINER_COLUMNS} FROM containers WHERE user_id = $1 \
             ORDER BY is_favorite DESC, name ASC"
        );
        let rows = sqlx::query_as::<_, ContainerRow>(&sql)
            .bind(user_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(rows.into_iter().map(Container::from).collect())
    }

    async fn container(&self, user_id: UserId, id: Uuid) -> StoreResult<Option<Container>> {
        let sql =
            format!("SELECT {CONTAINER_COLUMNS} FROM containers WHERE id = $1 AND user_id = $2");
        let row = sqlx::query_as::<_, ContainerRow>(&sql)
            .bind(id)
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(row.map(Container::from))
    }

    async fn save_container(&self, container: &Container) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO containers (id, user_id, name, capacity_ml, is_favorite, color, icon, \
             created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, \
             capacity_ml = EXCLUDED.capacity_ml, is_favorite = EXCLUDED.is_favorite, \
             color = EXCLUDED.color, icon = EXCLUDED.icon, updated_at = EXCLUDED.updated_at",
        )
        .bind(container.id)
        .bind(container.user_id.as_uuid())
        .bind(&container.name)
        .bind(container.capacity_ml)
        .bind(container.is_favorite)
        .bind(&container.color)
        .bind(&container.icon)
        .bind(container.created_at)
        .bind(container.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_err)?;
        Ok(())
    }

    async fn delete_container(&self, user_id: UserId, id: Uuid) -> StoreResult<bool> {
        // consumptions.container_id is ON DELETE SET NULL
        let deleted = sqlx::query("DELETE FROM containers WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(map_err)?
            .rows_affected();
        Ok(deleted > 0)
    }

    async fn consumption(&self, user_id: UserId, id: Uuid) -> StoreResult<Option<Consumption>> {
        let sql = format!(
            "SELECT {CONSUMPTION_COLUMNS} FROM consumptions WHERE id = $1 AND user_id = $2"
        );
        let row = sqlx::query_as::<_, ConsumptionRow>(&sql)
            .bind(id)
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(row.map(Consumption::from))
    }

    async fn consumptions_in(
        &self,
        user_id: UserId,
        range: TimeRange,
    ) -> StoreResult<Vec<Consumption>> {
        let mut conn = self.pool.acquire().await.map_err(map_err)?;
        select_consumptions(&mut conn, user_id, range)
            .await
            .map_err(map_err)
    }

    async fn save_consumption(
        &self,
        consumption: &Consumption,
        sync: &GoalSync,
    ) -> StoreResult<()> {
        let mut tx = self.begin_for_user(consumption.user_id).await?;
        sqlx::query(
            "INSERT INTO consumptions (id, user_id, beverage_id, container_id, volume_ml, \
             effective_ml, net_dehydration_ml, compensation_water_ml, consumed_at, created_at, \
             updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             ON CONFLICT (id) DO UPDATE SET beverage_id = EXCLUDED.beverage_id, \
             container_id = EXCLUDED.container_id, volume_ml = EXCLUDED.volume_ml, \
             effective_ml = EXCLUDED.effective_ml, \
             net_dehydration_ml = EXCLUDED.net_dehydration_ml, \
             compensation_water_ml = EXCLUDED.compensation_water_ml, \
             consumed_at = EXCLUDED.consumed_at, updated_at = EXCLUDED.updated_at",
        )
        .bind(consumption.id)
        .bind(consumption.user_id.as_uuid())
        .bind(consumption.beverage_id)
        .bind(consumption.container_id)
        .bind(consumption.volume_ml)
        .bind(consumption.effective_ml)
        .bind(consumption.net_dehydration_ml)
        .bind(consumption.compensation_water_ml)
        .bind(consumption.consumed_at)
        .bind(consumption.created_at)
        .bind(consumption.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_err)?;
        rebuild_goals(&mut tx, sync).await.map_err(map_err)?;
        tx.commit().await.map_err(map_err)?;
        Ok(())
    }

    async fn delete_consumption(
        &self,
        user_id: UserId,
        id: Uuid,
        sync: &GoalSync,
    ) -> StoreResult<bool> {
        self.delete_owned("consumptions", user_id, id, sync).await
    }

    async fn daily_goal(&self, user_id: UserId, date: NaiveDate) -> StoreResult<Option<DailyGoal>> {
        let sql = format!(
            "SELECT {DAILY_GOAL_COLUMNS} FROM daily_goals WHERE user_id = $1 AND goal_date = $2"
        );
        let row = sqlx::query_as::<_, DailyGoalRow>(&sql)
            .bind(user_id.as_uuid())
            .bind(date)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(row.map(DailyGoal::from))
    }

    async fn daily_goals_in(
        &self,
        user_id: UserId,
        range: DateRange,
    ) -> StoreResult<Vec<DailyGoal>> {
        let sql = format!(
            "SELECT {DAILY_GOAL_COLUMNS} FROM daily_goals \
             WHERE user_id = $1 AND goal_date BETWEEN $2 AND $3 ORDER BY goal_date ASC"
        );
        let rows = sqlx::query_as::<_, DailyGoalRow>(&sql)
            .bind(user_id.as_uuid())
            .bind(range.from)
            .bind(range.to)
            .fetch_all(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(rows.into_iter().map(DailyGoal::from).collect())
    }

    async fn refresh_goals(&self, sync: &GoalSync) -> StoreResult<Vec<DailyGoal>> {
        let mut tx = self.begin_for_user(sync.user_id).await?;
        let rows = rebuild_goals(&mut tx, sync).await.map_err(map_err)?;
        tx.commit().await.map_err(map_err)?;
        Ok(rows)
    }

    async fn reminders(&self, user_id: UserId) -> StoreResult<Vec<Reminder>> {
        let sql = format!(
            "SELECT {REMINDER_COLUMNS} FROM reminders WHERE user_id = $1 ORDER BY remind_at ASC"
        );
        let rows = sqlx::query_as::<_, ReminderRow>(&sql)
            .bind(user_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(rows.into_iter().map(Reminder::from).collect())
    }

    async fn reminder(&self, user_id: UserId, id: Uuid) -> StoreResult<Option<Reminder>> {
        let sql =
            format!("SELECT {REMINDER_COLUMNS} FROM reminders WHERE id = $1 AND user_id = $2");
        let row = sqlx::query_as::<_, ReminderRow>(&sql)
            .bind(id)
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(row.map(Reminder::from))
    }

    async fn save_reminder(&self, reminder: &Reminder) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO reminders (id, user_id, remind_at, message, recurrence, is_active, \
             created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (id) DO UPDATE SET remind_at = EXCLUDED.remind_at, \
             message = EXCLUDED.message, recurrence = EXCLUDED.recurrence, \
             is_active = EXCLUDED.is_active, updated_at = EXCLUDED.updated_at",
        )
        .bind(reminder.id)
        .bind(reminder.user_id.as_uuid())
        .bind(reminder.time)
        .bind(&reminder.message)
        .bind(reminder.recurrence.as_str())
        .bind(reminder.is_active)
        .bind(reminder.created_at)
        .bind(reminder.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_err)?;
        Ok(())
    }

    async fn delete_reminder(&self, user_id: UserId, id: Uuid) -> StoreResult<bool> {
        let deleted = sqlx::query("DELETE FROM reminders WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(map_err)?
            .rows_affected();
        Ok(deleted > 0)
    }
}
