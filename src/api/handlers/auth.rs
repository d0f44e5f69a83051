//! Account handlers: register, login, refresh, logout, password change and
//! availability checks.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    AuthResponse, AvailabilityResponse, ChangePasswordRequest, EmailQuery, LoginRequest,
    LogoutRequest, MessageResponse, ProfileResponse, RefreshRequest, RegisterRequest, TokenPair,
    UsernameQuery,
};
use crate::api::extract::{ApiJson, ApiQuery, from_json_slice};
use crate::app_state::AppState;
use crate::auth::AuthUser;
use crate::error::{ApiError, ErrorResponse};

/// `POST /auth/register` — Create an account.
///
/// # Errors
///
/// Returns [`ApiError`] on invalid fields or a username/email in use.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Auth",
    summary = "Register",
    description = "Creates an account, computes its initial daily goal and returns a token pair.",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid field or duplicate username/email", body = ErrorResponse),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (user, tokens) = state.auth_service.register(req).await?;
    let body = AuthResponse {
        user: ProfileResponse::from(&user),
        tokens,
    };
    Ok((StatusCode::CREATED, Json(body)))
}

/// `POST /auth/login` — Sign in with username or email.
///
/// # Errors
///
/// Returns [`ApiError::InvalidCredentials`] on a bad login.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Auth",
    summary = "Log in",
    description = "Accepts a username or email in `login` together with the password.",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (user, tokens) = state.auth_service.login(req).await?;
    Ok(Json(AuthResponse {
        user: ProfileResponse::from(&user),
        tokens,
    }))
}

/// `POST /auth/refresh` — Exchange a refresh token for a new pair.
///
/// # Errors
///
/// Returns [`ApiError::InvalidToken`] for invalid or revoked tokens.
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    tag = "Auth",
    summary = "Refresh tokens",
    description = "Rotates the refresh token: the presented one is revoked and a new pair is issued.",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New token pair", body = TokenPair),
        (status = 401, description = "Invalid or revoked refresh token", body = ErrorResponse),
    )
)]
pub async fn refresh(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RefreshRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let tokens = state.auth_service.refresh(&req.refresh_token).await?;
    Ok(Json(tokens))
}

/// `POST /auth/logout` — Revoke the current tokens.
///
/// # Errors
///
/// Returns [`ApiError`] on persistence failure.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "Auth",
    summary = "Log out",
    description = "Revokes the access token used for this call and, if given, the refresh token.",
    request_body = LogoutRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    caller: AuthUser,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let req: LogoutRequest = if body.iter().all(u8::is_ascii_whitespace) {
        LogoutRequest::default()
    } else {
        from_json_slice(&body)?
    };
    state
        .auth_service
        .logout(caller, req.refresh_token.as_deref())
        .await?;
    Ok(Json(MessageResponse::new("logged out")))
}

/// `POST /auth/change-password` — Change the caller's password.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] if the current password is wrong.
#[utoipa::path(
    post,
    path = "/api/v1/auth/change-password",
    tag = "Auth",
    summary = "Change password",
    request_body = ChangePasswordRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Wrong current password or mismatch", body = ErrorResponse),
    )
)]
pub async fn change_password(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiJson(req): ApiJson<ChangePasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .auth_service
        .change_password(caller.user_id, req)
        .await?;
    Ok(Json(MessageResponse::new("password changed")))
}

/// `GET /auth/check-username` — Is a username free?
///
/// # Errors
///
/// Returns [`ApiError`] on persistence failure.
#[utoipa::path(
    get,
    path = "/api/v1/auth/check-username",
    tag = "Auth",
    summary = "Check username availability",
    params(UsernameQuery),
    responses(
        (status = 200, description = "Availability", body = AvailabilityResponse),
    )
)]
pub async fn check_username(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<UsernameQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let available = state.auth_service.username_available(&query.username).await?;
    Ok(Json(AvailabilityResponse {
        value: query.username,
        available,
    }))
}

/// `GET /auth/check-email` — Is an email free?
///
/// # Errors
///
/// Returns [`ApiError`] on persistence failure.
#[utoipa::path(
    get,
    path = "/api/v1/auth/check-email",
    tag = "Auth",
    summary = "Check email availability",
    params(EmailQuery),
    responses(
        (status = 200, description = "Availability", body = AvailabilityResponse),
    )
)]
pub async fn check_email(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<EmailQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let available = state.auth_service.email_available(&query.email).await?;
    Ok(Json(AvailabilityResponse {
        value: query.email,
        available,
    }))
}

/// Auth routes reachable without a token.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/check-username", get(check_username))
        .route("/auth/check-email", get(check_email))
}

/// Auth routes that need the caller's access token.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/logout", post(logout))
        .route("/auth/change-password", post(change_password))
}
