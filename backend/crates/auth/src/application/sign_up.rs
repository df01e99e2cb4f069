//! Sign Up Use Case
//!
//! Creates the upstream account and logs the new user in.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::application::issue_tokens::{AuthOutput, issue_tokens};
use crate::application::session_token::SessionTokenIssuer;
use crate::domain::entity::profile::Profile;
use crate::domain::repository::{
    IdentityProvider, ProfileRepository, RefreshTokenRepository, Registration,
};
use crate::domain::value_object::{email::Email, full_name::FullName, password::Password};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub terms_accepted: bool,
}

/// Sign up use case
pub struct SignUpUseCase<I, P, R>
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

impl<I, P, R> SignUpUseCase<I, P, R>
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

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<AuthOutput> {
        if !input.terms_accepted {
            return Err(AuthError::TermsNotAccepted);
        }

        let registration = Registration {
            email: Email::new(input.email)?,
            password: Password::for_sign_up(input.password)?,
            full_name: FullName::new(input.full_name)?,
            terms_accepted_at: Utc::now(),
        };

        let user_id = self.identity.register(&registration).await?;

        // The profile row is created upstream by a trigger and may lag behind
        let profile = match self.profiles.find_by_id(&user_id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                tracing::info!(user_id = %user_id, "Profile not yet available, using signup data");
                Profile::fallback(user_id, &registration.email, &registration.full_name)
            }
            Err(e) => return Err(e.into_profile_lookup()),
        };

        let tokens =
            issue_tokens(&self.sessions, &self.refresh_repo, &self.config, &user_id).await?;

        tracing::info!(
            user_id = %user_id,
            email_domain = %registration.email.domain(),
            "User signed up"
        );

        Ok(AuthOutput { profile, tokens })
    }
}
