//! HS256 access and refresh tokens.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AuthError;
use crate::domain::UserId;

/// Purpose of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Authorises API requests.
    Access,
    /// Exchanged for a new token pair.
    Refresh,
}

/// JWT claims carried by both token kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id.
    pub sub: Uuid,
    /// Unique token id, used for revocation.
    pub jti: Uuid,
    /// Issued at (Unix seconds).
    pub iat: i64,
    /// Expiration (Unix seconds).
    pub exp: i64,
    /// Token purpose.
    pub kind: TokenKind,
}

impl Claims {
    /// The user this token belongs to.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        UserId::from_uuid(self.sub)
    }

    /// Expiration as a timestamp.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// A freshly signed token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Encoded JWT.
    pub token: String,
    /// Claims inside it.
    pub claims: Claims,
}

/// Signs and verifies tokens with a shared secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Creates an issuer for `secret` with the given lifetimes in seconds.
    #[must_use]
    pub fn new(secret: &[u8], access_ttl_secs: i64, refresh_ttl_secs: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            access_ttl: Duration::seconds(access_ttl_secs),
            refresh_ttl: Duration::seconds(refresh_ttl_secs),
        }
    }

    /// Access token lifetime in seconds.
    #[must_use]
    pub fn access_ttl_secs(&self) -> i64 {
        self.access_ttl.num_seconds()
    }

    /// Signs a new token of `kind` for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Signing`] if encoding fails.
    pub fn issue(&self, user_id: UserId, kind: TokenKind) -> Result<IssuedToken, AuthError> {
        let now = Utc::now();
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };
        let claims = Claims {
            sub: *user_id.as_uuid(),
            jti: Uuid::new_v4(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            kind,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))?;
        Ok(IssuedToken { token, claims })
    }

    /// Decodes `token` and checks that it is of the `expected` kind.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] for bad signatures, malformed or
    /// expired tokens, and [`AuthError::WrongTokenKind`] for a kind mismatch.
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|_| AuthError::InvalidToken)?;
        if data.claims.kind != expected {
            return Err(AuthError::WrongTokenKind);
        }
        Ok(data.claims)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(b"test-secret", 3600, 7200)
    }

    #[test]
    fn access_token_round_trip() {
        let issuer = issuer();
        let user = UserId::new();
        let Ok(issued) = issuer.issue(user, TokenKind::Access) else {
            panic!("signing failed");
        };
        let Ok(claims) = issuer.verify(&issued.token, TokenKind::Access) else {
            panic!("verification failed");
        };
        assert_eq!(claims.user_id(), user);
        assert_eq!(claims, issued.claims);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn refresh_token_is_not_an_access_token() {
        let issuer = issuer();
        let Ok(issued) = issuer.issue(UserId::new(), TokenKind::Refresh) else {
            panic!("signing failed");
        };
        assert_eq!(
            issuer.verify(&issued.token, TokenKind::Access),
            Err(AuthError::WrongTokenKind)
        );
    }

    #[test]
    fn other_secret_is_rejected() {
        let Ok(issued) = issuer().issue(UserId::new(), TokenKind::Access) else {
            panic!("signing failed");
        };
        let other = TokenIssuer::new(b"another-secret", 3600, 7200);
        assert_eq!(
            other.verify(&issued.token, TokenKind::Access),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn expired_token_is_rejected() {
        let issuer = TokenIssuer::new(b"test-secret", -10, 7200);
        let Ok(issued) = issuer.issue(UserId::new(), TokenKind::Access) else {
            panic!("signing failed");
        };
        assert_eq!(
            issuer.verify(&issued.token, TokenKind::Access),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(
            issuer().verify("not.a.jwt", TokenKind::Access),
            Err(AuthError::InvalidToken)
        );
    }
}
