//! Consumption DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{Consumption, DailyGoal};

/// Request body for `POST /consumptions`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateConsumptionRequest {
    /// Beverage consumed.
    pub beverage_id: Uuid,
    /// Container used, if any.
    #[serde(default)]
    pub container_id: Option<Uuid>,
    /// Volume in milliliters (1–5000); defaults to the container capacity.
    #[serde(default)]
    #[validate(range(min = 1, max = 5000, message = "must be between 1 and 5000"))]
    pub volume_ml: Option<i32>,
    /// When it was drunk; defaults to now. Must not be in the future.
    #[serde(default)]
    pub consumed_at: Option<DateTime<Utc>>,
}

/// Request body for `PATCH /consumptions/{id}`. Absent fields are unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateConsumptionRequest {
    /// New beverage.
    #[serde(default)]
    pub beverage_id: Option<Uuid>,
    /// New container.
    #[serde(default)]
    pub container_id: Option<Uuid>,
    /// New volume (1–5000).
    #[serde(default)]
    #[validate(range(min = 1, max = 5000, message = "must be between 1 and 5000"))]
    pub volume_ml: Option<i32>,
    /// New timestamp. Must not be in the future.
    #[serde(default)]
    pub consumed_at: Option<DateTime<Utc>>,
}

/// Response body for `GET /consumptions/today`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TodayConsumptionsResponse {
    /// Today's date (UTC).
    pub date: NaiveDate,
    /// Sum of raw volumes.
    pub total_volume_ml: i32,
    /// Sum of effective hydration.
    pub total_effective_ml: i32,
    /// Water recommended to offset today's alcoholic drinks.
    pub total_compensation_water_ml: i32,
    /// Today's goal record.
    pub goal: DailyGoal,
    /// Today's consumptions, oldest first.
    pub consumptions: Vec<Consumption>,
}
