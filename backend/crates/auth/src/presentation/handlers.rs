//! HTTP Handlers

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use kernel::response::ApiResponse;
use platform::bearer::extract_bearer_token;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token::SessionTokenIssuer;
use crate::application::{
    GetProfileUseCase, RefreshInput, RefreshUseCase, ResetPasswordUseCase, SignInInput,
    SignInUseCase, SignOutInput, SignOutUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::repository::{IdentityProvider, ProfileRepository, RefreshTokenRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AuthResponse, LoginRequest, LogoutRequest, RefreshRequest, RegisterRequest,
    ResetPasswordRequest, UserDto,
};
use crate::presentation::middleware::{AuthGate, AuthenticatedUser};

pub const LOGOUT_MESSAGE: &str = "Logout realizado com sucesso";
pub const RESET_PASSWORD_MESSAGE: &str =
    "Se o email existir, você receberá instruções para redefinir sua senha";

/// Shared state for auth handlers
pub struct AuthAppState<U, R>
where
    U: IdentityProvider + ProfileRepository + Send + Sync + 'static,
    R: RefreshTokenRepository + Send + Sync + 'static,
{
    pub upstream: Arc<U>,
    pub refresh_tokens: Arc<R>,
    pub sessions: Arc<SessionTokenIssuer>,
    pub config: Arc<AuthConfig>,
}

impl<U, R> AuthAppState<U, R>
where
    U: IdentityProvider + ProfileRepository + Send + Sync + 'static,
    R: RefreshTokenRepository + Send + Sync + 'static,
{
    /// Build the state, rejecting an unusable signing configuration
    pub fn new(upstream: Arc<U>, refresh_tokens: Arc<R>, config: AuthConfig) -> AuthResult<Self> {
        let sessions = Arc::new(SessionTokenIssuer::new(&config)?);
        Ok(Self {
            upstream,
            refresh_tokens,
            sessions,
            config: Arc::new(config),
        })
    }

    /// Gate verifying tokens minted by this state
    pub fn gate(&self) -> AuthGate {
        AuthGate::new(self.sessions.clone())
    }
}

impl<U, R> Clone for AuthAppState<U, R>
where
    U: IdentityProvider + ProfileRepository + Send + Sync + 'static,
    R: RefreshTokenRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            upstream: self.upstream.clone(),
            refresh_tokens: self.refresh_tokens.clone(),
            sessions: self.sessions.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Login
// ============================================================================

/// POST /auth/login
pub async fn login<U, R>(
    State(state): State<AuthAppState<U, R>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<ApiResponse<AuthResponse>>
where
    U: IdentityProvider + ProfileRepository + Send + Sync + 'static,
    R: RefreshTokenRepository + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(|e| AuthError::Validation(e.body_text()))?;

    let use_case = SignInUseCase::new(
        state.upstream.clone(),
        state.upstream.clone(),
        state.refresh_tokens.clone(),
        state.sessions.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(ApiResponse::data(output.into()))
}

// ============================================================================
// Register
// ============================================================================

/// POST /auth/register
pub async fn register<U, R>(
    State(state): State<AuthAppState<U, R>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    U: IdentityProvider + ProfileRepository + Send + Sync + 'static,
    R: RefreshTokenRepository + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(|e| AuthError::Validation(e.body_text()))?;

    let use_case = SignUpUseCase::new(
        state.upstream.clone(),
        state.upstream.clone(),
        state.refresh_tokens.clone(),
        state.sessions.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignUpInput {
            email: req.email,
            password: req.password,
            full_name: req.full_name,
            terms_accepted: req.terms_accepted,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::<AuthResponse>::data(output.into()),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /auth/logout
///
/// Always succeeds. The body and the bearer token are both optional.
pub async fn logout<U, R>(
    State(state): State<AuthAppState<U, R>>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResponse<()>
where
    U: IdentityProvider + ProfileRepository + Send + Sync + 'static,
    R: RefreshTokenRepository + Send + Sync + 'static,
{
    let refresh_token = serde_json::from_slice::<LogoutRequest>(&body)
        .unwrap_or_default()
        .refresh_token;

    let session_user = extract_bearer_token(&headers)
        .ok()
        .and_then(|token| state.sessions.verify(token).ok());

    SignOutUseCase::new(state.refresh_tokens.clone())
        .execute(SignOutInput {
            refresh_token,
            session_user,
        })
        .await;

    ApiResponse::message(LOGOUT_MESSAGE)
}

// ============================================================================
// Refresh
// ============================================================================

/// POST /auth/refresh (behind the gate)
pub async fn refresh<U, R>(
    State(state): State<AuthAppState<U, R>>,
    user: AuthenticatedUser,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> AuthResult<ApiResponse<AuthResponse>>
where
    U: IdentityProvider + ProfileRepository + Send + Sync + 'static,
    R: RefreshTokenRepository + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(|_| AuthError::RefreshRequestInvalid)?;

    let use_case = RefreshUseCase::new(
        state.upstream.clone(),
        state.refresh_tokens.clone(),
        state.sessions.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(RefreshInput {
            user_id: user.user_id,
            refresh_token: req.refresh_token,
        })
        .await?;

    Ok(ApiResponse::data(output.into()))
}

// ============================================================================
// Reset Password
// ============================================================================

/// POST /auth/reset-password
pub async fn reset_password<U, R>(
    State(state): State<AuthAppState<U, R>>,
    payload: Result<Json<ResetPasswordRequest>, JsonRejection>,
) -> AuthResult<ApiResponse<()>>
where
    U: IdentityProvider + ProfileRepository + Send + Sync + 'static,
    R: RefreshTokenRepository + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(|_| AuthError::InvalidEmail)?;

    ResetPasswordUseCase::new(state.upstream.clone())
        .execute(req.email)
        .await?;

    Ok(ApiResponse::message(RESET_PASSWORD_MESSAGE))
}

// ============================================================================
// Profile
// ============================================================================

/// GET /profile (behind the gate)
pub async fn get_profile<U, R>(
    State(state): State<AuthAppState<U, R>>,
    user: AuthenticatedUser,
) -> AuthResult<ApiResponse<UserDto>>
where
    U: IdentityProvider + ProfileRepository + Send + Sync + 'static,
    R: RefreshTokenRepository + Send + Sync + 'static,
{
    let profile = GetProfileUseCase::new(state.upstream.clone())
        .execute(&user.user_id)
        .await?;

    Ok(ApiResponse::data(profile.into()))
}
