//! Plan limits and premium feature catalog.

use serde::Serialize;
use utoipa::ToSchema;

/// A capability gated behind the premium plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PremiumFeature {
    /// Log premium-only beverages.
    PremiumBeverages,
    /// More containers than the free limit.
    UnlimitedContainers,
    /// More reminders than the free limit.
    UnlimitedReminders,
    /// Daily goal history older than the free window.
    FullHistory,
    /// Aggregated statistics over a date range.
    HydrationStats,
}

impl PremiumFeature {
    /// Every feature, in display order.
    pub const ALL: [Self; 5] = [
        Self::PremiumBeverages,
        Self::UnlimitedContainers,
        Self::UnlimitedReminders,
        Self::FullHistory,
        Self::HydrationStats,
    ];

    /// Returns the machine name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PremiumBeverages => "premium_beverages",
            Self::UnlimitedContainers => "unlimited_containers",
            Self::UnlimitedReminders => "unlimited_reminders",
            Self::FullHistory => "full_history",
            Self::HydrationStats => "hydration_stats",
        }
    }

    /// Returns a short description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::PremiumBeverages => "Log sports drinks, coconut water and other premium beverages",
            Self::UnlimitedContainers => "Define as many containers as you like",
            Self::UnlimitedReminders => "Schedule as many reminders as you like",
            Self::FullHistory => "Browse your complete daily goal history",
            Self::HydrationStats => "Averages and completion rates over any date range",
        }
    }
}

/// Quotas attached to a plan. `None` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct UsageLimits {
    /// Maximum number of containers.
    pub max_containers: Option<u32>,
    /// Maximum number of reminders.
    pub max_reminders: Option<u32>,
    /// How many days back daily goal history is visible.
    pub history_days: Option<u32>,
}

impl UsageLimits {
    /// Free plan quotas.
    pub const FREE: Self = Self {
        max_containers: Some(3),
        max_reminders: Some(3),
        history_days: Some(7),
    };

    /// Premium plan quotas.
    pub const PREMIUM: Self = Self {
        max_containers: None,
        max_reminders: None,
        history_days: None,
    };

    /// Returns the quotas for a plan.
    #[must_use]
    pub const fn for_plan(is_premium: bool) -> Self {
        if is_premium { Self::PREMIUM } else { Self::FREE }
    }
}
