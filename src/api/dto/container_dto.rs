//! Container DTOs.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::common_dto::validate_not_blank;

/// Request body for `POST /containers`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateContainerRequest {
    /// Display name.
    #[validate(
        length(min = 1, max = 100, message = "must be between 1 and 100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
    /// Capacity in milliliters (1–5000).
    #[validate(range(min = 1, max = 5000, message = "must be between 1 and 5000"))]
    pub capacity_ml: i32,
    /// Show first in pickers.
    #[serde(default)]
    pub is_favorite: bool,
    /// Display color.
    #[serde(default)]
    #[validate(length(max = 16, message = "must be at most 16 characters"))]
    pub color: Option<String>,
    /// Display icon key.
    #[serde(default)]
    #[validate(length(max = 32, message = "must be at most 32 characters"))]
    pub icon: Option<String>,
}

/// Request body for `PATCH /containers/{id}`. Absent fields are unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateContainerRequest {
    /// New name.
    #[serde(default)]
    #[validate(
        length(min = 1, max = 100, message = "must be between 1 and 100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: Option<String>,
    /// New capacity (1–5000).
    #[serde(default)]
    #[validate(range(min = 1, max = 5000, message = "must be between 1 and 5000"))]
    pub capacity_ml: Option<i32>,
    /// New favorite flag.
    #[serde(default)]
    pub is_favorite: Option<bool>,
    /// New color.
    #[serde(default)]
    #[validate(length(max = 16, message = "must be at most 16 characters"))]
    pub color: Option<String>,
    /// New icon.
    #[serde(default)]
    #[validate(length(max = 32, message = "must be at most 32 characters"))]
    pub icon: Option<String>,
}
