//! A single logged drink.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Beverage, UserId};
use crate::hydration::effectiveness;

/// A drink a user logged, with its derived hydration values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Consumption {
    /// Row identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: UserId,
    /// Beverage consumed.
    pub beverage_id: Uuid,
    /// Container used. Cleared if the container is later deleted.
    pub container_id: Option<Uuid>,
    /// Raw volume in milliliters.
    pub volume_ml: i32,
    /// Volume scaled by the beverage's hydration factor.
    pub effective_ml: i32,
    /// Net dehydration for alcoholic drinks (never positive).
    pub net_dehydration_ml: Option<i32>,
    /// Water recommended to offset an alcoholic drink (never negative).
    pub compensation_water_ml: Option<i32>,
    /// When the drink was consumed.
    pub consumed_at: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Consumption {
    /// Creates a consumption and derives its hydration values from `beverage`.
    #[must_use]
    pub fn new(
        user_id: UserId,
        beverage: &Beverage,
        container_id: Option<Uuid>,
        volume_ml: i32,
        consumed_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        let mut consumption = Self {
            id: Uuid::new_v4(),
            user_id,
            beverage_id: beverage.id,
            container_id,
            volume_ml,
            effective_ml: 0,
            net_dehydration_ml: None,
            compensation_water_ml: None,
            consumed_at,
            created_at: now,
            updated_at: now,
        };
        consumption.apply_beverage(beverage);
        consumption
    }

    /// Re-derives the hydration values for `beverage` and the current volume.
    pub fn apply_beverage(&mut self, beverage: &Beverage) {
        let outcome = effectiveness::evaluate(self.volume_ml, beverage);
        self.beverage_id = beverage.id;
        self.effective_ml = outcome.effective_ml;
        self.net_dehydration_ml = outcome.alcohol.map(|a| a.net_dehydration_ml);
        self.compensation_water_ml = outcome.alcohol.map(|a| a.compensation_water_ml);
    }

    /// Calendar day (UTC) the drink counts towards.
    #[must_use]
    pub fn day(&self) -> NaiveDate {
        self.consumed_at.date_naive()
    }
}
