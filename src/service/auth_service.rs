//! Account registration, login and token lifecycle.

use std::sync::Arc;

use chrono::NaiveDate;
use validator::Validate;

use super::load_user;
use crate::api::dto::{ChangePasswordRequest, LoginRequest, RegisterRequest, TokenPair};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::{AuthUser, TokenIssuer, TokenKind};
use crate::domain::{User, UserId};
use crate::error::ApiError;
use crate::hydration::{dates, goal};
use crate::persistence::Store;

/// Oldest age accepted for a birth date.
pub const MAX_AGE_YEARS: u32 = 120;

/// Checks that a birth date is not in the future and implies a plausible age.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] on `birth_date`.
pub fn check_birth_date(birth_date: NaiveDate, today: NaiveDate) -> Result<(), ApiError> {
    match dates::age_on(birth_date, today) {
        None => Err(ApiError::validation("birth_date", "cannot be in the future")),
        Some(age) if age > MAX_AGE_YEARS => Err(ApiError::validation(
            "birth_date",
            "implies an age above 120 years",
        )),
        Some(_) => Ok(()),
    }
}

/// Authentication workflows.
#[derive(Debug, Clone)]
pub struct AuthService {
    store: Arc<dyn Store>,
    issuer: TokenIssuer,
}

impl AuthService {
    /// Creates a new `AuthService`.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, issuer: TokenIssuer) -> Self {
        Self { store, issuer }
    }

    /// Creates an account and signs the caller in.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for invalid fields, mismatched
    /// passwords or a username/email already in use.
    pub async fn register(&self, req: RegisterRequest) -> Result<(User, TokenPair), ApiError> {
        req.validate()?;
        if req.password != req.password_confirm {
            return Err(ApiError::validation("password_confirm", "passwords do not match"));
        }
        let today = dates::today();
        if let Some(birth_date) = req.birth_date {
            check_birth_date(birth_date, today)?;
        }
        if self.store.user_by_username(&req.username).await?.is_some() {
            return Err(ApiError::validation("username", "already in use"));
        }
        if self.store.user_by_email(&req.email).await?.is_some() {
            return Err(ApiError::validation("email", "already in use"));
        }

        let password_hash = hash_password(&req.password)?;
        let mut user = User::new(req.username, req.email, password_hash);
        user.display_name = req.display_name;
        user.weight_kg = req.weight_kg;
        user.birth_date = req.birth_date;
        user.activity_level = req.activity_level.unwrap_or_default();
        user.is_fragile = req.is_fragile;
        user.daily_goal_ml = goal::baseline_for(&user, today);

        self.store.insert_user(&user).await?;
        tracing::info!(user_id = %user.id, username = %user.username, "user registered");

        let tokens = self.issue_pair(user.id)?;
        Ok((user, tokens))
    }

    /// Signs in with a username or email and a password.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidCredentials`] if the account does not exist
    /// or the password is wrong.
    pub async fn login(&self, req: LoginRequest) -> Result<(User, TokenPair), ApiError> {
        req.validate()?;
        let login = req.login.trim();
        let user = match self.store.user_by_username(login).await? {
            Some(user) => Some(user),
            None if login.contains('@') => self.store.user_by_email(login).await?,
            None => None,
        };
        let Some(user) = user else {
            return Err(ApiError::InvalidCredentials);
        };
        if !verify_password(&req.password, &user.password_hash)? {
            tracing::warn!(user_id = %user.id, "failed login attempt");
            return Err(ApiError::InvalidCredentials);
        }
        tracing::info!(user_id = %user.id, "user logged in");
        let tokens = self.issue_pair(user.id)?;
        Ok((user, tokens))
    }

    /// Exchanges a refresh token for a new pair, revoking the old one.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidToken`] if the token is invalid, revoked,
    /// of the wrong kind, or its user no longer exists.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ApiError> {
        let claims = self.issuer.verify(refresh_token, TokenKind::Refresh)?;
        if self.store.is_token_revoked(claims.jti).await? {
            return Err(ApiError::InvalidToken);
        }
        let user_id = claims.user_id();
        if self.store.user_by_id(user_id).await?.is_none() {
            return Err(ApiError::InvalidToken);
        }
        self.store
            .revoke_token(claims.jti, user_id, claims.expires_at())
            .await?;
        self.issue_pair(user_id)
    }

    /// Revokes the caller's access token and, if given, their refresh token.
    ///
    /// A refresh token that is invalid or belongs to someone else is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    pub async fn logout(
        &self,
        caller: AuthUser,
        refresh_token: Option<&str>,
    ) -> Result<(), ApiError> {
        self.store
            .revoke_token(caller.token_id, caller.user_id, caller.expires_at)
            .await?;
        if let Some(token) = refresh_token
            && let Ok(claims) = self.issuer.verify(token, TokenKind::Refresh)
            && claims.user_id() == caller.user_id
        {
            self.store
                .revoke_token(claims.jti, caller.user_id, claims.expires_at())
                .await?;
        }
        tracing::info!(user_id = %caller.user_id, "user logged out");
        Ok(())
    }

    /// Changes the caller's password after checking the current one.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if the current password is wrong or
    /// the new passwords do not match.
    pub async fn change_password(
        &self,
        user_id: UserId,
        req: ChangePasswordRequest,
    ) -> Result<(), ApiError> {
        req.validate()?;
        if req.new_password != req.new_password_confirm {
            return Err(ApiError::validation(
                "new_password_confirm",
                "passwords do not match",
            ));
        }
        let user = load_user(self.store.as_ref(), user_id).await?;
        if !verify_password(&req.current_password, &user.password_hash)? {
            return Err(ApiError::validation("current_password", "is incorrect"));
        }
        let password_hash = hash_password(&req.new_password)?;
        if !self.store.update_password(user_id, &password_hash).await? {
            return Err(ApiError::not_found("user", user_id));
        }
        tracing::info!(%user_id, "password changed");
        Ok(())
    }

    /// Returns `true` if no account uses `username`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    pub async fn username_available(&self, username: &str) -> Result<bool, ApiError> {
        Ok(self.store.user_by_username(username.trim()).await?.is_none())
    }

    /// Returns `true` if no account uses `email` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    pub async fn email_available(&self, email: &str) -> Result<bool, ApiError> {
        Ok(self.store.user_by_email(email.trim()).await?.is_none())
    }

    /// Resolves an access token into the calling user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidToken`] for invalid, revoked or
    /// refresh-kind tokens and for deleted users.
    pub async fn authenticate(&self, token: &str) -> Result<AuthUser, ApiError> {
        let claims = self.issuer.verify(token, TokenKind::Access)?;
        if self.store.is_token_revoked(claims.jti).await? {
            return Err(ApiError::InvalidToken);
        }
        let user_id = claims.user_id();
        if self.store.user_by_id(user_id).await?.is_none() {
            return Err(ApiError::InvalidToken);
        }
        Ok(AuthUser {
            user_id,
            token_id: claims.jti,
            expires_at: claims.expires_at(),
        })
    }

    fn issue_pair(&self, user_id: UserId) -> Result<TokenPair, ApiError> {
        let access = self.issuer.issue(user_id, TokenKind::Access)?;
        let refresh = self.issuer.issue(user_id, TokenKind::Refresh)?;
        Ok(TokenPair {
            access_token: access.token,
            refresh_token: refresh.token,
            token_type: "Bearer".to_string(),
            expires_in: self.issuer.access_ttl_secs(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::persistence::MemoryStore;

    fn service() -> AuthService {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        AuthService::new(store, TokenIssuer::new(b"test-secret", 3600, 7200))
    }

    fn register_request(username: &str, email: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.into(),
            email: email.into(),
            password: "hunter2hunter2".into(),
            password_confirm: "hunter2hunter2".into(),
            display_name: None,
            weight_kg: Some(70.0),
            birth_date: NaiveDate::from_ymd_opt(1990, 6, 15),
            activity_level: None,
            is_fragile: false,
        }
    }

    #[tokio::test]
    async fn register_sets_baseline_goal() {
        let service = service();
        let Ok((user, tokens)) = service.register(register_request("ana", "Ana@Example.com")).await
        else {
            panic!("registration failed");
        };
        assert_eq!(user.email, "ana@example.com");
        assert_eq!(user.daily_goal_ml, 1820);
        assert_eq!(tokens.token_type, "Bearer");
        assert!(service.authenticate(&tokens.access_token).await.is_ok());
    }

    #[tokio::test]
    async fn duplicate_username_and_email_name_the_field() {
        let service = service();
        let Ok(_) = service.register(register_request("ana", "ana@example.com")).await else {
            panic!("registration failed");
        };
        let Err(err) = service.register(register_request("ana", "other@example.com")).await else {
            panic!("duplicate username accepted");
        };
        assert_eq!(err.field(), Some("username"));
        let Err(err) = service.register(register_request("bob", "ANA@example.com")).await else {
            panic!("duplicate email accepted");
        };
        assert_eq!(err.field(), Some("email"));
    }

    #[tokio::test]
    async fn register_rejects_bad_input() {
        let service = service();

        let mut req = register_request("ana", "ana@example.com");
        req.password_confirm = "different-password".into();
        let Err(err) = service.register(req).await else {
            panic!("mismatch accepted");
        };
        assert_eq!(err.field(), Some("password_confirm"));

        let mut req = register_request("ana", "ana@example.com");
        req.birth_date = Some(dates::today() + Duration::days(1));
        let Err(err) = service.register(req).await else {
            panic!("future birth date accepted");
        };
        assert_eq!(err.field(), Some("birth_date"));

        let mut req = register_request("ana", "ana@example.com");
        req.weight_kg = Some(501.0);
        let Err(err) = service.register(req).await else {
            panic!("weight accepted");
        };
        assert_eq!(err.field(), Some("weight_kg"));

        let req = register_request("a b", "ana@example.com");
        let Err(err) = service.register(req).await else {
            panic!("bad username accepted");
        };
        assert_eq!(err.field(), Some("username"));
    }

    #[test]
    fn birth_date_limits() {
        let today = dates::today();
        assert!(check_birth_date(today, today).is_ok());
        assert!(check_birth_date(today + Duration::days(1), today).is_err());
        assert!(check_birth_date(today - Duration::days(365 * 125), today).is_err());
    }

    #[tokio::test]
    async fn login_by_username_or_email() {
        let service = service();
        let Ok(_) = service.register(register_request("ana", "ana@example.com")).await else {
            panic!("registration failed");
        };
        let by_name = LoginRequest {
            login: "ana".into(),
            password: "hunter2hunter2".into(),
        };
        let by_email = LoginRequest {
            login: "ANA@example.com".into(),
            password: "hunter2hunter2".into(),
        };
        let wrong = LoginRequest {
            login: "ana".into(),
            password: "nope-nope".into(),
        };
        assert!(service.login(by_name).await.is_ok());
        assert!(service.login(by_email).await.is_ok());
        assert!(matches!(
            service.login(wrong).await,
            Err(ApiError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn refresh_rotates_and_logout_revokes() {
        let service = service();
        let Ok((_, tokens)) = service.register(register_request("ana", "ana@example.com")).await
        else {
            panic!("registration failed");
        };

        let Ok(rotated) = service.refresh(&tokens.refresh_token).await else {
            panic!("refresh failed");
        };
        assert!(matches!(
            service.refresh(&tokens.refresh_token).await,
            Err(ApiError::InvalidToken)
        ));
        assert!(matches!(
            service.authenticate(&rotated.refresh_token).await,
            Err(ApiError::InvalidToken)
        ));

        let Ok(caller) = service.authenticate(&rotated.access_token).await else {
            panic!("access token rejected");
        };
        let Ok(()) = service
            .logout(caller, Some(&rotated.refresh_token))
            .await
        else {
            panic!("logout failed");
        };
        assert!(service.authenticate(&rotated.access_token).await.is_err());
        assert!(service.refresh(&rotated.refresh_token).await.is_err());
    }

    #[tokio::test]
    async fn change_password_checks_current() {
        let service = service();
        let Ok((user, _)) = service.register(register_request("ana", "ana@example.com")).await
        else {
            panic!("registration failed");
        };
        let wrong = ChangePasswordRequest {
            current_password: "not-it".into(),
            new_password: "brand-new-pass".into(),
            new_password_confirm: "brand-new-pass".into(),
        };
        let Err(err) = service.change_password(user.id, wrong).await else {
            panic!("wrong current password accepted");
        };
        assert_eq!(err.field(), Some("current_password"));

        let ok = ChangePasswordRequest {
            current_password: "hunter2hunter2".into(),
            new_password: "brand-new-pass".into(),
            new_password_confirm: "brand-new-pass".into(),
        };
        assert!(service.change_password(user.id, ok).await.is_ok());
        let login = LoginRequest {
            login: "ana".into(),
            password: "brand-new-pass".into(),
        };
        assert!(service.login(login).await.is_ok());
    }

    #[tokio::test]
    async fn availability_checks() {
        let service = service();
        let Ok(_) = service.register(register_request("ana", "ana@example.com")).await else {
            panic!("registration failed");
        };
        assert_eq!(service.username_available("ana").await.ok(), Some(false));
        assert_eq!(service.username_available("bob").await.ok(), Some(true));
        assert_eq!(service.email_available("ANA@EXAMPLE.COM").await.ok(), Some(false));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn password_change_and_profile_edits_do_not_undo_each_other() {
        use crate::api::dto::UpdateProfileRequest;
        use crate::service::{GoalService, ProfileService};

        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let auth = AuthService::new(
            Arc::clone(&store),
            TokenIssuer::new(b"test-secret", 3600, 7200),
        );
        let profiles = ProfileService::new(
            Arc::clone(&store),
            Arc::new(GoalService::new(Arc::clone(&store))),
        );
        let Ok((user, _)) = auth.register(register_request("ana", "ana@example.com")).await else {
            panic!("registration failed");
        };

        let password = tokio::spawn({
            let auth = auth.clone();
            async move {
                let req = ChangePasswordRequest {
                    current_password: "hunter2hunter2".into(),
                    new_password: "brand-new-pass".into(),
                    new_password_confirm: "brand-new-pass".into(),
                };
                auth.change_password(user.id, req).await
            }
        });
        let mut edits = Vec::new();
        for w in 0..20 {
            let profiles = profiles.clone();
            edits.push(tokio::spawn(async move {
                let req = UpdateProfileRequest {
                    weight_kg: Some(60.0 + f64::from(w)),
                    ..UpdateProfileRequest::default()
                };
                profiles.update(user.id, req).await
            }));
        }
        let Ok(Ok(())) = password.await else {
            panic!("password change failed");
        };
        for edit in edits {
            let Ok(Ok(_)) = edit.await else {
                panic!("profile update failed");
            };
        }

        let Ok(Some(stored)) = store.user_by_id(user.id).await else {
            panic!("user missing");
        };
        let Some(weight) = stored.weight_kg else {
            panic!("weight lost");
        };
        assert!((60.0..80.0).contains(&weight));
        assert_eq!(stored.daily_goal_ml, goal::baseline_for(&stored, dates::today()));
        let login = LoginRequest {
            login: "ana".into(),
            password: "brand-new-pass".into(),
        };
        assert!(auth.login(login).await.is_ok());
    }
}
