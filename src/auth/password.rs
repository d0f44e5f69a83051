//! Argon2 password hashing.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use super::AuthError;

/// Hashes `password` into a PHC string with a fresh random salt.
///
/// # Errors
///
/// Returns [`AuthError::Hashing`] if Argon2 rejects the input.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Checks `password` against a stored PHC hash.
///
/// # Errors
///
/// Returns [`AuthError::Hashing`] if `hash` is not a valid PHC string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::Hashing(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let Ok(hash) = hash_password("correct horse") else {
            panic!("hashing failed");
        };
        assert!(hash.starts_with("$argon2"));
        assert_eq!(verify_password("correct horse", &hash), Ok(true));
        assert_eq!(verify_password("battery staple", &hash), Ok(false));
    }

    #[test]
    fn salts_differ() {
        let (Ok(a), Ok(b)) = (hash_password("same"), hash_password("same")) else {
            panic!("hashing failed");
        };
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_hash_is_an_error() {
        assert!(matches!(
            verify_password("x", "not-a-phc-string"),
            Err(AuthError::Hashing(_))
        ));
    }
}
