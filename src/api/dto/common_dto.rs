//! Shared DTO types used across multiple endpoints.

use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::ValidationError;

/// Optional inclusive date range for list endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateRangeQuery {
    /// First day (inclusive), `YYYY-MM-DD`.
    #[serde(default)]
    pub from: Option<NaiveDate>,
    /// Last day (inclusive), `YYYY-MM-DD`.
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

/// Plain acknowledgement body.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable outcome.
    pub message: String,
}

impl MessageResponse {
    /// Wraps a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Allowed characters in usernames besides ASCII letters and digits.
const USERNAME_EXTRA_CHARS: [char; 3] = ['_', '.', '-'];

/// Usernames may contain ASCII letters, digits, `_`, `.` and `-`.
///
/// # Errors
///
/// Returns a [`ValidationError`] naming the rule that failed.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let valid = username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || USERNAME_EXTRA_CHARS.contains(&c));
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("username_chars").with_message(Cow::Borrowed(
            "may only contain letters, digits, '_', '.' and '-'",
        )))
    }
}

/// Rejects strings that are empty after trimming.
///
/// # Errors
///
/// Returns a [`ValidationError`] for blank input.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be blank")))
    } else {
        Ok(())
    }
}
