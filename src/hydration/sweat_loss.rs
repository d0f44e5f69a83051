//! Estimated sweat loss (PSE) for a logged activity.
//!
//! `PSE = duration × base_rate(type) × intensity_factor(intensity)`, rounded
//! to the nearest milliliter.

use crate::domain::{ActivityType, Intensity};

/// Base rate applied to activity codes the catalog does not know, in ml/min.
pub const FALLBACK_BASE_RATE: f64 = 13.3;

/// Intensity factor applied to intensity codes the catalog does not know.
pub const FALLBACK_INTENSITY_FACTOR: f64 = 1.0;

/// Sweat rate for an activity type, in ml/min.
#[must_use]
pub const fn base_rate(activity_type: ActivityType) -> f64 {
    match activity_type {
        ActivityType::Walking => 4.2,
        ActivityType::Yoga => 5.0,
        ActivityType::Strength => 8.3,
        ActivityType::Swimming | ActivityType::Dance => 10.0,
        ActivityType::Hiking => 11.7,
        ActivityType::Cycling | ActivityType::Tennis | ActivityType::Other => FALLBACK_BASE_RATE,
        ActivityType::Soccer | ActivityType::Basketball => 15.0,
        ActivityType::Running => 16.7,
        ActivityType::Hiit | ActivityType::HotYoga => 25.0,
    }
}

/// Multiplier for perceived effort.
#[must_use]
pub const fn intensity_factor(intensity: Intensity) -> f64 {
    match intensity {
        Intensity::Low => 0.8,
        Intensity::Medium => FALLBACK_INTENSITY_FACTOR,
        Intensity::High => 1.2,
    }
}

/// Base rate for a raw activity code, falling back to [`FALLBACK_BASE_RATE`].
#[must_use]
pub fn base_rate_for_code(code: &str) -> f64 {
    code.parse::<ActivityType>()
        .map_or(FALLBACK_BASE_RATE, base_rate)
}

/// Estimated sweat loss in milliliters.
///
/// Duration bounds are enforced by request validation, not here; any
/// duration yields a non-negative result.
#[must_use]
pub fn estimate_ml(duration_minutes: u32, activity_type: ActivityType, intensity: Intensity) -> i32 {
    compute(
        duration_minutes,
        base_rate(activity_type),
        intensity_factor(intensity),
    )
}

fn compute(duration_minutes: u32, rate: f64, factor: f64) -> i32 {
    let ml = (f64::from(duration_minutes) * rate * factor).round();
    #[allow(clippy::cast_possible_truncation)]
    let ml = ml.clamp(0.0, f64::from(i32::MAX)) as i32;
    ml
}
