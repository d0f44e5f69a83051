//! Registration, login and token DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::common_dto::validate_username;
use super::profile_dto::ProfileResponse;
use crate::domain::ActivityLevel;

/// Request body for `POST /auth/register`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Unique login name: 3–150 characters of letters, digits, `_`, `.`, `-`.
    #[validate(
        length(min = 3, max = 150, message = "must be between 3 and 150 characters"),
        custom(function = "validate_username")
    )]
    pub username: String,
    /// Unique email address.
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// Password, at least 8 characters.
    #[validate(length(min = 8, max = 128, message = "must be between 8 and 128 characters"))]
    pub password: String,
    /// Must equal `password`.
    pub password_confirm: String,
    /// Optional display name.
    #[serde(default)]
    #[validate(length(max = 150, message = "must be at most 150 characters"))]
    pub display_name: Option<String>,
    /// Body weight in kilograms (1–500).
    #[serde(default)]
    #[validate(range(min = 1.0, max = 500.0, message = "must be between 1 and 500 kg"))]
    pub weight_kg: Option<f64>,
    /// Date of birth, `YYYY-MM-DD`.
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    /// Self-reported activity level.
    #[serde(default)]
    pub activity_level: Option<ActivityLevel>,
    /// Frail or with cardiac insufficiency.
    #[serde(default)]
    pub is_fragile: bool,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Username or email.
    #[serde(alias = "username", alias = "email")]
    #[validate(length(min = 1, message = "is required"))]
    pub login: String,
    /// Password.
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RefreshRequest {
    /// A refresh token from a previous login or refresh.
    pub refresh_token: String,
}

/// Request body for `POST /auth/logout`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LogoutRequest {
    /// Refresh token to revoke alongside the current access token.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Request body for `POST /auth/change-password`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1, message = "is required"))]
    pub current_password: String,
    /// New password, at least 8 characters.
    #[validate(length(min = 8, max = 128, message = "must be between 8 and 128 characters"))]
    pub new_password: String,
    /// Must equal `new_password`.
    pub new_password_confirm: String,
}

/// Access and refresh tokens issued together.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TokenPair {
    /// Short-lived bearer token for API calls.
    pub access_token: String,
    /// Long-lived token for `POST /auth/refresh`.
    pub refresh_token: String,
    /// Always `"Bearer"`.
    pub token_type: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

/// Response body for register and login.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    /// The authenticated account.
    pub user: ProfileResponse,
    /// Issued tokens.
    pub tokens: TokenPair,
}

/// Query for `GET /auth/check-username`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UsernameQuery {
    /// Username to check.
    pub username: String,
}

/// Query for `GET /auth/check-email`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmailQuery {
    /// Email to check.
    pub email: String,
}

/// Result of an availability check.
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityResponse {
    /// The value that was checked.
    pub value: String,
    /// `true` if no account uses it.
    pub available: bool,
}
