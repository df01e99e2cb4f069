//! Refresh Use Case
//!
//! Rotates a refresh token: the presented token is consumed and a new
//! session token and refresh token are issued.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::application::issue_tokens::{AuthOutput, issue_tokens};
use crate::application::session_token::SessionTokenIssuer;
use crate::domain::entity::refresh_token::RefreshTokenRecord;
use crate::domain::repository::{ProfileRepository, RefreshTokenRepository};
use crate::error::{AuthError, AuthResult};

/// Shortest refresh token worth looking up
pub const MIN_REFRESH_TOKEN_LENGTH: usize = 10;

/// Refresh input
pub struct RefreshInput {
    /// Subject of the session presenting the token
    pub user_id: UserId,
    pub refresh_token: String,
}

/// Refresh use case
pub struct RefreshUseCase<P, R>
where
    P: ProfileRepository,
    R: RefreshTokenRepository,
{
    profiles: Arc<P>,
    refresh_repo: Arc<R>,
    sessions: Arc<SessionTokenIssuer>,
    config: Arc<AuthConfig>,
}

impl<P, R> RefreshUseCase<P, R>
where
    P: ProfileRepository,
    R: RefreshTokenRepository,
{
    pub fn new(
        profiles: Arc<P>,
        refresh_repo: Arc<R>,
        sessions: Arc<SessionTokenIssuer>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            profiles,
            refresh_repo,
            sessions,
            config,
        }
    }

    pub async fn execute(&self, input: RefreshInput) -> AuthResult<AuthOutput> {
        if input.refresh_token.len() < MIN_REFRESH_TOKEN_LENGTH {
            return Err(AuthError::InvalidRefreshToken);
        }

        // Consumed even when it turns out to belong to someone else
        let digest = RefreshTokenRecord::digest_of(&input.refresh_token);
        let record = self
            .refresh_repo
            .consume(&digest)
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;

        if !record.is_valid_for(&input.user_id) {
            tracing::warn!(
                user_id = %input.user_id,
                owner = %record.user_id,
                expired = record.is_expired(),
                "Refresh token rejected"
            );
            return Err(AuthError::InvalidRefreshToken);
        }

        let profile = self
            .profiles
            .find_by_id(&input.user_id)
            .await
            .map_err(AuthError::into_profile_lookup)?
            .ok_or(AuthError::ProfileNotFound)?;

        let tokens =
            issue_tokens(&self.sessions, &self.refresh_repo, &self.config, &input.user_id).await?;

        tracing::info!(user_id = %input.user_id, "Session refreshed");

        Ok(AuthOutput { profile, tokens })
    }
}
