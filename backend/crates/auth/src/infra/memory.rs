//! In-memory refresh token store
//!
//! Process-local: tokens do not survive a restart and are not shared between
//! replicas. Clients holding a lost token simply log in again.

use std::collections::HashMap;

use chrono::Utc;
use kernel::id::UserId;
use tokio::sync::RwLock;

use crate::domain::entity::refresh_token::RefreshTokenRecord;
use crate::domain::repository::RefreshTokenRepository;
use crate::error::AuthResult;

/// Refresh tokens keyed by SHA-256 digest
#[derive(Debug, Default)]
pub struct InMemoryRefreshTokenRepository {
    records: RwLock<HashMap<[u8; 32], RefreshTokenRecord>>,
}

impl InMemoryRefreshTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, expired ones included
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn store(&self, record: RefreshTokenRecord) -> AuthResult<()> {
        self.records.write().await.insert(record.digest, record);
        Ok(())
    }

    async fn consume(&self, digest: &[u8; 32]) -> AuthResult<Option<RefreshTokenRecord>> {
        Ok(self.records.write().await.remove(digest))
    }

    async fn revoke_all_for(&self, user_id: &UserId) -> AuthResult<u64> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| record.user_id != *user_id);
        Ok((before - records.len()) as u64)
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now = Utc::now();
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| !record.is_expired_at(now));
        let deleted = (before - records.len()) as u64;

        if deleted > 0 {
            tracing::info!(refresh_tokens_deleted = deleted, "Cleaned up expired refresh tokens");
        }

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_consume_is_single_use() {
        let repo = InMemoryRefreshTokenRepository::new();
        let (raw, record) = RefreshTokenRecord::issue(UserId::new(), Duration::days(1)).unwrap();
        repo.store(record.clone()).await.unwrap();

        let digest = RefreshTokenRecord::digest_of(&raw);
        assert_eq!(repo.consume(&digest).await.unwrap(), Some(record));
        assert_eq!(repo.consume(&digest).await.unwrap(), None);
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_revoke_all_for_user() {
        let repo = InMemoryRefreshTokenRepository::new();
        let user = UserId::new();
        for owner in [user, user, UserId::new()] {
            let (_, record) = RefreshTokenRecord::issue(owner, Duration::days(1)).unwrap();
            repo.store(record).await.unwrap();
        }

        assert_eq!(repo.revoke_all_for(&user).await.unwrap(), 2);
        assert_eq!(repo.revoke_all_for(&user).await.unwrap(), 0);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_cleanup_expired() {
        let repo = InMemoryRefreshTokenRepository::new();
        let user = UserId::new();
        let (_, live) = RefreshTokenRecord::issue(user, Duration::days(1)).unwrap();
        let (_, dead) = RefreshTokenRecord::issue(user, Duration::seconds(-10)).unwrap();
        repo.store(live).await.unwrap();
        repo.store(dead).await.unwrap();

        assert_eq!(repo.cleanup_expired().await.unwrap(), 1);
        assert_eq!(repo.len().await, 1);
    }
}
