//! User-defined drinking vessels.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::UserId;

/// Largest container capacity accepted, in milliliters.
pub const MAX_CONTAINER_CAPACITY_ML: i32 = 5000;

/// A reusable vessel a user drinks from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Container {
    /// Row identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: UserId,
    /// Display name (e.g. "Blue bottle").
    pub name: String,
    /// Capacity in milliliters.
    pub capacity_ml: i32,
    /// Shown first in pickers.
    pub is_favorite: bool,
    /// Display color, free-form (usually a hex code).
    pub color: Option<String>,
    /// Display icon key.
    pub icon: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Container {
    /// Creates a new container.
    #[must_use]
    pub fn new(user_id: UserId, name: String, capacity_ml: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            name,
            capacity_ml,
            is_favorite: false,
            color: None,
            icon: None,
            created_at: now,
            updated_at: now,
        }
    }
}
