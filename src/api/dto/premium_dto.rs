//! Premium plan DTOs.

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{PremiumFeature, UsageLimits};

/// One premium feature and whether the caller has it.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FeatureStatus {
    /// Feature identifier.
    pub feature: PremiumFeature,
    /// What it unlocks.
    pub description: String,
    /// `true` for premium accounts.
    pub unlocked: bool,
}

/// Response body for `GET /premium/features`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FeaturesResponse {
    /// Caller's plan.
    pub is_premium: bool,
    /// Feature catalog.
    pub features: Vec<FeatureStatus>,
}

/// Current resource counts.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct UsageCounts {
    /// Containers defined.
    pub containers: u32,
    /// Reminders defined.
    pub reminders: u32,
}

/// Response body for `GET /premium/limits`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LimitsResponse {
    /// Caller's plan.
    pub is_premium: bool,
    /// Plan quotas; `null` means unlimited.
    pub limits: UsageLimits,
    /// Current usage.
    pub usage: UsageCounts,
}

/// Response body for `GET /premium/stats`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HydrationStats {
    /// First day of the range.
    pub from: NaiveDate,
    /// Last day of the range.
    pub to: NaiveDate,
    /// Days with a goal record.
    pub days_tracked: u32,
    /// Days whose target was reached.
    pub days_completed: u32,
    /// `days_completed / days_tracked`, or 0 with no data.
    pub completion_rate: f64,
    /// Mean target over tracked days.
    pub average_target_ml: f64,
    /// Mean effective hydration over tracked days.
    pub average_effective_ml: f64,
    /// Total raw volume consumed.
    pub total_consumed_ml: i64,
    /// Total effective hydration.
    pub total_effective_ml: i64,
    /// Total estimated sweat loss.
    pub total_sweat_loss_ml: i64,
}
