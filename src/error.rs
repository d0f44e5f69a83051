//! Service error types with HTTP status code mapping.
//!
//! [`ApiError`] is the central error type for request handling. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::AuthError;
use crate::hydration::dates::DateRangeError;
use crate::persistence::StoreError;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "duration_minutes: must be between 1 and 1440",
///     "field": "duration_minutes"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`ApiError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Request field that caused a validation error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category                 | HTTP Status                  |
/// |-----------|--------------------------|------------------------------|
/// | 1000–1999 | Validation               | 400 Bad Request              |
/// | 2000–2999 | Not Found / Conflict     | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Server                   | 500 Internal Server Error    |
/// | 4000–4999 | Authentication / Access  | 401 / 403                    |
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A request field failed validation.
    #[error("{field}: {message}")]
    Validation {
        /// Offending field name.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// Request could not be interpreted at all.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The referenced resource does not exist or belongs to someone else.
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Resource kind (e.g. `"activity"`).
        resource: &'static str,
        /// Identifier that was looked up.
        id: String,
    },

    /// The request conflicts with current state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),

    /// No credentials were supplied.
    #[error("authentication required")]
    Unauthenticated,

    /// Username/email and password did not match.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Token is malformed, expired, revoked or of the wrong kind.
    #[error("invalid or expired token")]
    InvalidToken,

    /// The caller's plan does not include this feature.
    #[error("premium plan required: {0}")]
    PremiumRequired(&'static str),

    /// The caller's plan quota for a resource is exhausted.
    #[error("{resource} limit of {limit} reached for the free plan")]
    UsageLimitReached {
        /// Resource kind (e.g. `"containers"`).
        resource: &'static str,
        /// Plan limit.
        limit: u32,
    },
}

impl ApiError {
    /// Shorthand for a [`ApiError::Validation`] error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`ApiError::NotFound`] error.
    #[must_use]
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation { .. } => 1001,
            Self::InvalidRequest(_) => 1002,
            Self::NotFound { .. } => 2001,
            Self::Conflict(_) => 2002,
            Self::Internal(_) => 3000,
            Self::Persistence(_) => 3001,
            Self::Unauthenticated => 4001,
            Self::InvalidCredentials => 4002,
            Self::InvalidToken => 4003,
            Self::PremiumRequired(_) => 4031,
            Self::UsageLimitReached { .. } => 4032,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Persistence(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unauthenticated | Self::InvalidCredentials | Self::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            Self::PremiumRequired(_) | Self::UsageLimitReached { .. } => StatusCode::FORBIDDEN,
        }
    }

    /// Returns the offending field for validation errors.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                field: self.field().map(str::to_string),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { field } => Self::validation(field, "already in use"),
            StoreError::Database(msg) => Self::Persistence(msg),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidToken | AuthError::WrongTokenKind => Self::InvalidToken,
            AuthError::Hashing(msg) | AuthError::Signing(msg) => Self::Internal(msg),
        }
    }
}

impl From<DateRangeError> for ApiError {
    fn from(err: DateRangeError) -> Self {
        let field = match err {
            DateRangeError::Inverted { .. } => "from",
            DateRangeError::TooLong { .. } => "to",
        };
        Self::validation(field, err.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        let Some((field, errs)) = fields.into_iter().next() else {
            return Self::InvalidRequest(errors.to_string());
        };
        let message = errs
            .first()
            .and_then(|e| e.message.as_ref().map(ToString::to_string))
            .unwrap_or_else(|| "is invalid".to_string());
        Self::validation(field.to_string(), message)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(range(min = 1, max = 1440, message = "must be between 1 and 1440"))]
        duration_minutes: i32,
    }

    #[test]
    fn status_codes_follow_ranges() {
        assert_eq!(
            ApiError::validation("weight_kg", "too heavy").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::not_found("activity", "x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ApiError::InvalidToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::PremiumRequired("hydration_stats").status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn validator_errors_name_the_field() {
        let Err(errors) = (Probe { duration_minutes: 0 }).validate() else {
            panic!("0 minutes must be rejected");
        };
        let err = ApiError::from(errors);
        assert_eq!(err.field(), Some("duration_minutes"));
        assert_eq!(err.to_string(), "duration_minutes: must be between 1 and 1440");
    }

    #[test]
    fn duplicate_store_error_becomes_field_error() {
        let err = ApiError::from(StoreError::Duplicate { field: "email" });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.field(), Some("email"));
    }
}
