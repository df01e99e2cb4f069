//! Sign Out Use Case
//!
//! Session tokens are stateless and simply expire. Signing out revokes
//! refresh tokens: the one presented, and every token of the caller when the
//! request carries a valid session.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::refresh_token::RefreshTokenRecord;
use crate::domain::repository::RefreshTokenRepository;

/// Sign out input
#[derive(Debug, Default)]
pub struct SignOutInput {
    pub refresh_token: Option<String>,
    pub session_user: Option<UserId>,
}

/// Sign out use case
pub struct SignOutUseCase<R>
where
    R: RefreshTokenRepository,
{
    refresh_repo: Arc<R>,
}

impl<R> SignOutUseCase<R>
where
    R: RefreshTokenRepository,
{
    pub fn new(refresh_repo: Arc<R>) -> Self {
        Self { refresh_repo }
    }

    /// Never fails: revocation errors are logged and the client is told
    /// it signed out regardless
    pub async fn execute(&self, input: SignOutInput) {
        if let Some(raw) = input.refresh_token.as_deref().filter(|t| !t.is_empty()) {
            let digest = RefreshTokenRecord::digest_of(raw);
            if let Err(e) = self.refresh_repo.consume(&digest).await {
                tracing::warn!(error = %e, "Failed to revoke refresh token");
            }
        }

        if let Some(user_id) = input.session_user {
            match self.refresh_repo.revoke_all_for(&user_id).await {
                Ok(revoked) => {
                    tracing::info!(user_id = %user_id, revoked, "User signed out");
                }
                Err(e) => {
                    tracing::warn!(user_id = %user_id, error = %e, "Failed to revoke user refresh tokens");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryRefreshTokenRepository;
    use chrono::Duration;

    #[tokio::test]
    async fn test_presented_token_is_revoked() {
        let repo = Arc::new(InMemoryRefreshTokenRepository::new());
        let user = UserId::new();
        let (raw, record) = RefreshTokenRecord::issue(user, Duration::days(1)).unwrap();
        repo.store(record).await.unwrap();
        let (_, other) = RefreshTokenRecord::issue(user, Duration::days(1)).unwrap();
        repo.store(other).await.unwrap();

        SignOutUseCase::new(repo.clone())
            .execute(SignOutInput {
                refresh_token: Some(raw.clone()),
                session_user: None,
            })
            .await;

        let digest = RefreshTokenRecord::digest_of(&raw);
        assert!(repo.consume(&digest).await.unwrap().is_none());
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_session_user_revokes_everything() {
        let repo = Arc::new(InMemoryRefreshTokenRepository::new());
        let user = UserId::new();
        let stranger = UserId::new();
        for owner in [user, user, stranger] {
            let (_, record) = RefreshTokenRecord::issue(owner, Duration::days(1)).unwrap();
            repo.store(record).await.unwrap();
        }

        SignOutUseCase::new(repo.clone())
            .execute(SignOutInput {
                refresh_token: None,
                session_user: Some(user),
            })
            .await;

        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_nothing_to_revoke() {
        let repo = Arc::new(InMemoryRefreshTokenRepository::new());
        SignOutUseCase::new(repo.clone())
            .execute(SignOutInput::default())
            .await;
        assert_eq!(repo.len().await, 0);
    }
}
