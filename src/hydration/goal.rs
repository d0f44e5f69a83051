//! Baseline daily hydration goal from weight, age and fragility.
//!
//! Age bands set a milliliters-per-kilogram rate; the product is scaled to
//! 80 % (the remainder is assumed to come from food) and bounded.

use chrono::NaiveDate;

use super::dates;
use crate::domain::User;

/// Goal used when weight or birth date is missing or invalid.
pub const FALLBACK_GOAL_ML: i32 = 2000;

/// Lowest goal ever returned.
pub const MIN_GOAL_ML: f64 = 500.0;

/// Highest goal ever returned.
pub const MAX_GOAL_ML: f64 = 10_000.0;

/// Share of total water need expected from drinks.
pub const BEVERAGE_SHARE: f64 = 0.80;

/// Milliliters of water per kilogram for the given age band.
#[must_use]
pub fn ml_per_kg(age_years: u32, weight_kg: f64, is_fragile: bool) -> f64 {
    match age_years {
        0..=13 => {
            if weight_kg <= 10.0 {
                100.0
            } else if weight_kg <= 20.0 {
                50.0
            } else {
                20.0
            }
        }
        14..=50 => 32.5,
        51..=65 => 27.5,
        _ if is_fragile => 20.0,
        _ => 25.0,
    }
}

/// Baseline goal in milliliters.
///
/// Returns [`FALLBACK_GOAL_ML`] when either input is missing or the weight
/// is not a positive finite number.
#[must_use]
pub fn calculate_goal(weight_kg: Option<f64>, age_years: Option<u32>, is_fragile: bool) -> i32 {
    let (Some(weight), Some(age)) = (weight_kg, age_years) else {
        return FALLBACK_GOAL_ML;
    };
    if !weight.is_finite() || weight <= 0.0 {
        return FALLBACK_GOAL_ML;
    }

    let raw = weight * ml_per_kg(age, weight, is_fragile);
    let scaled = (raw * BEVERAGE_SHARE).clamp(MIN_GOAL_ML, MAX_GOAL_ML);
    #[allow(clippy::cast_possible_truncation)]
    let goal = scaled.round() as i32;
    goal
}

/// Baseline goal for a user's profile as of `on`.
///
/// A birth date after `on` counts as invalid and yields the fallback.
#[must_use]
pub fn baseline_for(user: &User, on: NaiveDate) -> i32 {
    let age = user.birth_date.and_then(|b| dates::age_on(b, on));
    calculate_goal(user.weight_kg, age, user.is_fragile)
}
