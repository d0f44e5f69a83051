//! Domain layer: entity types owned by the service.
//!
//! Entities are plain data. Derived fields (sweat loss, effective hydration,
//! daily goal totals) are filled in by the [`crate::hydration`] engine and
//! never accepted from clients.

pub mod activity;
pub mod beverage;
pub mod consumption;
pub mod container;
pub mod daily_goal;
pub mod ids;
pub mod premium;
pub mod reminder;
pub mod user;

pub use activity::{Activity, ActivityType, Intensity};
pub use beverage::Beverage;
pub use consumption::Consumption;
pub use container::Container;
pub use daily_goal::DailyGoal;
pub use ids::UserId;
pub use premium::{PremiumFeature, UsageLimits};
pub use reminder::{Recurrence, Reminder};
pub use user::{ActivityLevel, ProfileChanges, User};
