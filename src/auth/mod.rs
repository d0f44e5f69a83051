//! Authentication primitives: password hashing, JWT issuing and the
//! request authentication middleware.

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, IssuedToken, TokenIssuer, TokenKind};
pub use middleware::{AuthUser, require_auth};

/// Errors raised by the authentication primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Token is malformed, expired or has a bad signature.
    #[error("invalid token")]
    InvalidToken,
    /// A refresh token was presented where an access token is required, or
    /// the other way round.
    #[error("wrong token kind")]
    WrongTokenKind,
    /// Password hashing failed or a stored hash is unreadable.
    #[error("password hashing failed: {0}")]
    Hashing(String),
    /// Token signing failed.
    #[error("token signing failed: {0}")]
    Signing(String),
}
