//! Hydration formula engine.
//!
//! Stateless, deterministic functions over entity fields:
//!
//! - [`sweat_loss`]: estimated sweat loss for an activity.
//! - [`goal`]: baseline daily goal from the user's profile.
//! - [`effectiveness`]: effective hydration of a drink.
//! - [`dates`]: ages, day bounds and date ranges.
//!
//! Combining these into a persisted daily goal happens in
//! [`crate::service::GoalService`].

pub mod dates;
pub mod effectiveness;
pub mod goal;
pub mod sweat_loss;
