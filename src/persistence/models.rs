//! Database row types and their conversion into domain entities.
//!
//! Enum columns are stored as text codes; unknown codes decode to the
//! domain's fallback variant rather than failing the query.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::{
    Activity, ActivityLevel, ActivityType, Beverage, Consumption, Container, DailyGoal, Intensity,
    Recurrence, Reminder, User, UserId,
};

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    /// Primary key.
    pub id: Uuid,
    /// Unique username.
    pub username: String,
    /// Unique lowercase email.
    pub email: String,
    /// Argon2 hash.
    pub password_hash: String,
    /// Display name.
    pub display_name: Option<String>,
    /// Weight in kilograms.
    pub weight_kg: Option<f64>,
    /// Date of birth.
    pub birth_date: Option<NaiveDate>,
    /// Activity level code.
    pub activity_level: String,
    /// Fragility flag.
    pub is_fragile: bool,
    /// Premium flag.
    pub is_premium: bool,
    /// Current daily goal.
    pub daily_goal_ml: i32,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update.
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::from_uuid(row.id),
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            display_name: row.display_name,
            weight_kg: row.weight_kg,
            birth_date: row.birth_date,
            activity_level: ActivityLevel::from_code_lenient(&row.activity_level),
            is_fragile: row.is_fragile,
            is_premium: row.is_premium,
            daily_goal_ml: row.daily_goal_ml,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A row from the `activities` table.
#[derive(Debug, Clone, FromRow)]
pub struct ActivityRow {
    /// Primary key.
    pub id: Uuid,
    /// Owner.
    pub user_id: Uuid,
    /// Activity type code.
    pub activity_type: String,
    /// Duration in minutes.
    pub duration_minutes: i32,
    /// Intensity code.
    pub intensity: String,
    /// When it happened.
    pub performed_at: DateTime<Utc>,
    /// Free-text note.
    pub notes: Option<String>,
    /// Stored sweat loss estimate.
    pub sweat_loss_ml: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update.
    pub updated_at: DateTime<Utc>,
}

impl From<ActivityRow> for Activity {
    fn from(row: ActivityRow) -> Self {
        Self {
            id: row.id,
            user_id: UserId::from_uuid(row.user_id),
            activity_type: ActivityType::from_code_lenient(&row.activity_type),
            duration_minutes: row.duration_minutes,
            intensity: Intensity::from_code_lenient(&row.intensity),
            performed_at: row.performed_at,
            notes: row.notes,
            sweat_loss_ml: row.sweat_loss_ml,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A row from the `beverages` table.
#[derive(Debug, Clone, FromRow)]
pub struct BeverageRow {
    /// Primary key.
    pub id: Uuid,
    /// Unique slug.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Hydration factor.
    pub hydration_factor: f64,
    /// Water flag.
    pub is_water: bool,
    /// Alcohol flag.
    pub is_alcoholic: bool,
    /// Premium flag.
    pub is_premium: bool,
    /// Active flag.
    pub is_active: bool,
}

impl From<BeverageRow> for Beverage {
    fn from(row: BeverageRow) -> Self {
        Self {
            id: row.id,
            slug: row.slug,
            name: row.name,
            hydration_factor: row.hydration_factor,
            is_water: row.is_water,
            is_alcoholic: row.is_alcoholic,
            is_premium: row.is_premium,
            is_active: row.is_active,
        }
    }
}

/// A row from the `containers` table.
#[derive(Debug, Clone, FromRow)]
pub struct ContainerRow {
    /// Primary key.
    pub id: Uuid,
    /// Owner.
    pub user_id: Uuid,
    /// Display name.
    pub name: String,
    /// Capacity in ml.
    pub capacity_ml: i32,
    /// Favorite flag.
    pub is_favorite: bool,
    /// Display color.
    pub color: Option<String>,
    /// Display icon.
    pub icon: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update.
    pub updated_at: DateTime<Utc>,
}

impl From<ContainerRow> for Container {
    fn from(row: ContainerRow) -> Self {
        Self {
            id: row.id,
            user_id: UserId::from_uuid(row.user_id),
            name: row.name,
            capacity_ml: row.capacity_ml,
            is_favorite: row.is_favorite,
            color: row.color,
            icon: row.icon,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A row from the `consumptions` table.
#[derive(Debug, Clone, FromRow)]
pub struct ConsumptionRow {
    /// Primary key.
    pub id: Uuid,
    /// Owner.
    pub user_id: Uuid,
    /// Beverage consumed.
    pub beverage_id: Uuid,
    /// Container used.
    pub container_id: Option<Uuid>,
    /// Raw volume.
    pub volume_ml: i32,
    /// Effective hydration.
    pub effective_ml: i32,
    /// Net dehydration (alcoholic only).
    pub net_dehydration_ml: Option<i32>,
    /// Compensating water (alcoholic only).
    pub compensation_water_ml: Option<i32>,
    /// When it was drunk.
    pub consumed_at: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update.
    pub updated_at: DateTime<Utc>,
}

impl From<ConsumptionRow> for Consumption {
    fn from(row: ConsumptionRow) -> Self {
        Self {
            id: row.id,
            user_id: UserId::from_uuid(row.user_id),
            beverage_id: row.beverage_id,
            container_id: row.container_id,
            volume_ml: row.volume_ml,
            effective_ml: row.effective_ml,
            net_dehydration_ml: row.net_dehydration_ml,
            compensation_water_ml: row.compensation_water_ml,
            consumed_at: row.consumed_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A row from the `daily_goals` table.
#[derive(Debug, Clone, FromRow)]
pub struct DailyGoalRow {
    /// Primary key.
    pub id: Uuid,
    /// Owner.
    pub user_id: Uuid,
    /// Calendar day.
    pub goal_date: NaiveDate,
    /// Baseline goal.
    pub baseline_ml: i32,
    /// Sweat loss total.
    pub sweat_loss_ml: i32,
    /// Adjusted target.
    pub target_ml: i32,
    /// Raw volume consumed.
    pub consumed_ml: i32,
    /// Effective volume consumed.
    pub effective_ml: i32,
    /// Completion flag.
    pub completed: bool,
    /// Last recomputation.
    pub updated_at: DateTime<Utc>,
}

impl From<DailyGoalRow> for DailyGoal {
    fn from(row: DailyGoalRow) -> Self {
        Self {
            id: row.id,
            user_id: UserId::from_uuid(row.user_id),
            date: row.goal_date,
            baseline_ml: row.baseline_ml,
            sweat_loss_ml: row.sweat_loss_ml,
            target_ml: row.target_ml,
            consumed_ml: row.consumed_ml,
            effective_ml: row.effective_ml,
            completed: row.completed,
            updated_at: row.updated_at,
        }
    }
}

/// A row from the `reminders` table.
#[derive(Debug, Clone, FromRow)]
pub struct ReminderRow {
    /// Primary key.
    pub id: Uuid,
    /// Owner.
    pub user_id: Uuid,
    /// Time of day.
    pub remind_at: NaiveTime,
    /// Notification text.
    pub message: String,
    /// Recurrence code.
    pub recurrence: String,
    /// Active flag.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update.
    pub updated_at: DateTime<Utc>,
}

impl From<ReminderRow> for Reminder {
    fn from(row: ReminderRow) -> Self {
        Self {
            id: row.id,
            user_id: UserId::from_uuid(row.user_id),
            time: row.remind_at,
            message: row.message,
            recurrence: Recurrence::from_code_lenient(&row.recurrence),
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
