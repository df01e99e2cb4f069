//! Upstream Auth Bridge
//!
//! Talks to the platform's auth endpoints (`/auth/v1/*`) and the `profiles`
//! table through the shared [`UpstreamClient`].

use chrono::SecondsFormat;
use kernel::id::UserId;
use platform::query::QueryParams;
use platform::upstream::{UpstreamClient, UpstreamError, UpstreamRequest, UpstreamTransport};
use serde::{Deserialize, Serialize};

use crate::domain::entity::profile::Profile;
use crate::domain::repository::{IdentityProvider, ProfileRepository, Registration};
use crate::domain::value_object::{email::Email, password::Password};
use crate::error::{AuthError, AuthResult};

const TOKEN_PATH: &str = "/auth/v1/token";
const SIGNUP_PATH: &str = "/auth/v1/signup";
const RECOVER_PATH: &str = "/auth/v1/recover";
const PROFILES_PATH: &str = "/rest/v1/profiles";

// ============================================================================
// Wire types
// ============================================================================

#[derive(Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignupBody<'a> {
    email: &'a str,
    password: &'a str,
    data: SignupMetadata<'a>,
}

#[derive(Serialize)]
struct SignupMetadata<'a> {
    full_name: &'a str,
    terms_accepted: bool,
    terms_accepted_at: String,
}

#[derive(Serialize)]
struct RecoverBody<'a> {
    email: &'a str,
}

#[derive(Deserialize)]
struct UpstreamUser {
    id: UserId,
}

#[derive(Deserialize)]
struct SessionResponse {
    user: UpstreamUser,
}

/// Signup answers with a session when email confirmation is off, and with
/// the bare user object otherwise
#[derive(Deserialize)]
#[serde(untagged)]
enum SignupResponse {
    Session { user: UpstreamUser },
    User(UpstreamUser),
}

impl SignupResponse {
    fn user_id(self) -> UserId {
        match self {
            SignupResponse::Session { user } | SignupResponse::User(user) => user.id,
        }
    }
}

// ============================================================================
// Repository
// ============================================================================

/// Identity provider and profile repository backed by the upstream platform
pub struct UpstreamAuthRepository<T> {
    client: UpstreamClient<T>,
}

impl<T> Clone for UpstreamAuthRepository<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<T> UpstreamAuthRepository<T>
where
    T: UpstreamTransport + Sync,
{
    pub fn new(client: UpstreamClient<T>) -> Self {
        Self { client }
    }
}

impl<T> IdentityProvider for UpstreamAuthRepository<T>
where
    T: UpstreamTransport + Sync,
{
    async fn exchange_credentials(&self, email: &Email, password: &Password) -> AuthResult<UserId> {
        let request = UpstreamRequest::post(TOKEN_PATH)
            .with_query(QueryParams::new().push("grant_type", "password"))
            .with_json(&CredentialsBody {
                email: email.as_str(),
                password: password.expose(),
            })
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to encode credentials");
                AuthError::InvalidCredentials
            })?;

        match self.client.fetch::<SessionResponse>(request).await {
            Ok(session) => Ok(session.user.id),
            Err(e) => {
                tracing::warn!(status = ?e.status(), error = %e, "Upstream credential exchange failed");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    async fn register(&self, registration: &Registration) -> AuthResult<UserId> {
        let request = UpstreamRequest::post(SIGNUP_PATH).with_json(&SignupBody {
            email: registration.email.as_str(),
            password: registration.password.expose(),
            data: SignupMetadata {
                full_name: registration.full_name.as_str(),
                terms_accepted: true,
                terms_accepted_at: registration
                    .terms_accepted_at
                    .to_rfc3339_opts(SecondsFormat::Secs, true),
            },
        })?;

        match self.client.fetch::<SignupResponse>(request).await {
            Ok(response) => Ok(response.user_id()),
            Err(UpstreamError::Status { status, body }) => {
                tracing::warn!(status, body = %body, "Upstream signup rejected");
                Err(AuthError::RegistrationRejected(body))
            }
            Err(e) => Err(AuthError::Upstream(e)),
        }
    }

    async fn request_password_reset(&self, email: &Email) -> AuthResult<()> {
        let request =
            UpstreamRequest::post(RECOVER_PATH).with_json(&RecoverBody { email: email.as_str() })?;
        self.client.execute(request).await?;
        Ok(())
    }
}

impl<T> ProfileRepository for UpstreamAuthRepository<T>
where
    T: UpstreamTransport + Sync,
{
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<Profile>> {
        let request = UpstreamRequest::get(PROFILES_PATH)
            .with_query(QueryParams::new().eq("id", user_id));

        let rows: Vec<Profile> = self.client.fetch(request).await?;
        Ok(rows.into_iter().next())
    }
}
