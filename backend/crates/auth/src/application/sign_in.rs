//! Sign In Use Case
//!
//! Exchanges credentials upstream, resolves the profile and issues tokens.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::issue_tokens::{AuthOutput, issue_tokens};
use crate::application::session_token::SessionTokenIssuer;
use crate::domain::repository::{IdentityProvider, ProfileRepository, RefreshTokenRepository};
use crate::domain::value_object::{email::Email, password::Password};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in use case
pub struct SignInUseCase<I, P, R>
where
    I: IdentityProvider,
    P: ProfileRepository,
    R: RefreshTokenRepository,
{
    identity: Arc<I>,
    profiles: Arc<P>,
    refresh_repo: Arc<R>,
    sessions: Arc<SessionTokenIssuer>,
    config: Arc<AuthConfig>,
}

impl<I, P, R> SignInUseCase<I, P, R>
where
    I: IdentityProvider,
    P: ProfileRepository,
    R: RefreshTokenRepository,
{
    pub fn new(
        identity: Arc<I>,
        profiles: Arc<P>,
        refresh_repo: Arc<R>,
        sessions: Arc<SessionTokenIssuer>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            identity,
            profiles,
            refresh_repo,
            sessions,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<AuthOutput> {
        let email = Email::new(input.email)?;
        let password = Password::for_sign_in(input.password)?;

        let user_id = self.identity.exchange_credentials(&email, &password).await?;

        let profile = self
            .profiles
            .find_by_id(&user_id)
            .await
            .map_err(AuthError::into_profile_lookup)?
            .ok_or(AuthError::ProfileNotFound)?;

        let tokens =
            issue_tokens(&self.sessions, &self.refresh_repo, &self.config, &user_id).await?;

        tracing::info!(user_id = %user_id, "User signed in");

        Ok(AuthOutput { profile, tokens })
    }
}
