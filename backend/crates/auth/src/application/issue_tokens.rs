//! Token pair minting shared by sign-in, sign-up and refresh

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::application::session_token::SessionTokenIssuer;
use crate::domain::entity::{profile::Profile, refresh_token::RefreshTokenRecord};
use crate::domain::repository::RefreshTokenRepository;
use crate::error::AuthResult;

/// Session token + refresh token handed to the client
#[derive(Debug, Clone)]
pub struct AuthTokens {
    pub token: String,
    pub refresh_token: String,
}

/// Result of every flow that logs a user in
#[derive(Debug, Clone)]
pub struct AuthOutput {
    pub profile: Profile,
    pub tokens: AuthTokens,
}

/// Mint a session token and store a fresh refresh token for `user_id`
pub(crate) async fn issue_tokens<R>(
    sessions: &SessionTokenIssuer,
    refresh_repo: &Arc<R>,
    config: &AuthConfig,
    user_id: &UserId,
) -> AuthResult<AuthTokens>
where
    R: RefreshTokenRepository,
{
    let token = sessions.issue(user_id)?;

    let (refresh_token, record) = RefreshTokenRecord::issue(*user_id, config.refresh_ttl_chrono()?)?;
    refresh_repo.store(record).await?;

    Ok(AuthTokens {
        token,
        refresh_token,
    })
}
