//! Data Transfer Objects for REST request/response serialization.
//!
//! Request bodies derive `validator::Validate`; the service layer runs the
//! checks so that rules hold for every caller, not just HTTP.

pub mod activity_dto;
pub mod auth_dto;
pub mod common_dto;
pub mod consumption_dto;
pub mod container_dto;
pub mod goal_dto;
pub mod premium_dto;
pub mod profile_dto;
pub mod reminder_dto;

pub use activity_dto::*;
pub use auth_dto::*;
pub use common_dto::*;
pub use consumption_dto::*;
pub use container_dto::*;
pub use goal_dto::*;
pub use premium_dto::*;
pub use profile_dto::*;
pub use reminder_dto::*;
