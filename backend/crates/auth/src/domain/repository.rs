//! Repository Traits
//!
//! Interfaces for the upstream platform and token storage.
//! Implementations are in the infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::entity::{profile::Profile, refresh_token::RefreshTokenRecord};
use crate::domain::value_object::{email::Email, full_name::FullName, password::Password};
use crate::error::AuthResult;

/// Signup payload forwarded to the identity provider
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: Email,
    pub password: Password,
    pub full_name: FullName,
    pub terms_accepted_at: DateTime<Utc>,
}

/// Upstream identity provider (credential exchange)
#[trait_variant::make(IdentityProvider: Send)]
pub trait LocalIdentityProvider {
    /// Exchange email + password for the upstream user id.
    /// Every failure is `AuthError::InvalidCredentials`.
    async fn exchange_credentials(&self, email: &Email, password: &Password) -> AuthResult<UserId>;

    /// Create an upstream account.
    /// A refusal is `AuthError::RegistrationRejected` with the upstream body.
    async fn register(&self, registration: &Registration) -> AuthResult<UserId>;

    /// Ask the provider to send a password reset email
    async fn request_password_reset(&self, email: &Email) -> AuthResult<()>;
}

/// Upstream profile table
#[trait_variant::make(ProfileRepository: Send)]
pub trait LocalProfileRepository {
    /// `Ok(None)` when no row exists; `Err(AuthError::Upstream)` when the
    /// lookup itself failed
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<Profile>>;
}

/// Server-side refresh token storage
#[trait_variant::make(RefreshTokenRepository: Send)]
pub trait LocalRefreshTokenRepository {
    /// Store a newly issued token
    async fn store(&self, record: RefreshTokenRecord) -> AuthResult<()>;

    /// Remove and return the record for `digest`, if any
    async fn consume(&self, digest: &[u8; 32]) -> AuthResult<Option<RefreshTokenRecord>>;

    /// Revoke every token of a user
    async fn revoke_all_for(&self, user_id: &UserId) -> AuthResult<u64>;

    /// Drop expired records
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
