//! Effective hydration of a consumed drink.
//!
//! `effective = round(volume × factor)`. For alcoholic beverages the part of
//! the volume that does not hydrate is reported as net dehydration (a
//! non-positive number) together with the same amount of water recommended
//! to compensate.

use crate::domain::Beverage;

/// Alcohol-specific figures for a single drink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlcoholAdjustment {
    /// Net dehydration in milliliters; always `<= 0`.
    pub net_dehydration_ml: i32,
    /// Pure water recommended to offset the drink; always `>= 0`.
    pub compensation_water_ml: i32,
}

/// Result of evaluating one drink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HydrationOutcome {
    /// Volume that counts towards the daily goal.
    pub effective_ml: i32,
    /// Present for alcoholic beverages only.
    pub alcohol: Option<AlcoholAdjustment>,
}

/// `round(volume × factor)`, never negative.
#[must_use]
pub fn effective_ml(volume_ml: i32, hydration_factor: f64) -> i32 {
    let factor = if hydration_factor.is_finite() {
        hydration_factor.max(0.0)
    } else {
        0.0
    };
    let value = (f64::from(volume_ml.max(0)) * factor).round();
    #[allow(clippy::cast_possible_truncation)]
    let value = value.clamp(0.0, f64::from(i32::MAX)) as i32;
    value
}

/// Evaluates a drink of `volume_ml` of `beverage`.
#[must_use]
pub fn evaluate(volume_ml: i32, beverage: &Beverage) -> HydrationOutcome {
    let effective = effective_ml(volume_ml, beverage.hydration_factor);
    let alcohol = beverage.is_alcoholic.then(|| {
        let lost = (volume_ml.max(0) - effective).max(0);
        AlcoholAdjustment {
            net_dehydration_ml: -lost,
            compensation_water_ml: lost,
        }
    });
    HydrationOutcome {
        effective_ml: effective,
        alcohol,
    }
}
