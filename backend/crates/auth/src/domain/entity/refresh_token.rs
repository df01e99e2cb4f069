//! Refresh Token Entity
//!
//! The raw token is handed to the client once. Only its SHA-256 digest is
//! kept server-side, bound to the subject and an expiry.

use chrono::{DateTime, Duration, Utc};
use kernel::id::UserId;
use platform::crypto;

use crate::error::{AuthError, AuthResult};

/// Random bytes per refresh token (hex-encoded to 64 chars)
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Server-side refresh token record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTokenRecord {
    pub digest: [u8; 32],
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    /// Mint a new token for `user_id`.
    ///
    /// ## Returns
    /// * `Ok((String, RefreshTokenRecord))` - raw token for the client, record to store
    /// * `Err(AuthError::Internal)` - expiry not representable
    pub fn issue(user_id: UserId, ttl: Duration) -> AuthResult<(String, Self)> {
        let expires_at = Utc::now()
            .checked_add_signed(ttl)
            .ok_or_else(|| AuthError::Internal("Refresh token expiry out of range".into()))?;

        let raw = crypto::random_hex(REFRESH_TOKEN_BYTES);
        let record = Self {
            digest: Self::digest_of(&raw),
            user_id,
            expires_at,
        };
        Ok((raw, record))
    }

    /// Lookup key for a raw token
    pub fn digest_of(raw: &str) -> [u8; 32] {
        crypto::sha256(raw.as_bytes())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Usable by `user_id` right now
    pub fn is_valid_for(&self, user_id: &UserId) -> bool {
        self.user_id == *user_id && !self.is_expired()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_shape() {
        let user = UserId::new();
        let (raw, record) = RefreshTokenRecord::issue(user, Duration::days(30)).unwrap();
        assert_eq!(raw.len(), REFRESH_TOKEN_BYTES * 2);
        assert!(raw.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(record.digest, RefreshTokenRecord::digest_of(&raw));
        assert!(record.is_valid_for(&user));
    }

    #[test]
    fn test_unrepresentable_expiry_is_an_error() {
        let result = RefreshTokenRecord::issue(UserId::new(), Duration::MAX);
        assert!(matches!(result, Err(AuthError::Internal(_))));
    }

    #[test]
    fn test_tokens_are_distinct() {
        let user = UserId::new();
        let (a, _) = RefreshTokenRecord::issue(user, Duration::days(1)).unwrap();
        let (b, _) = RefreshTokenRecord::issue(user, Duration::days(1)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_subject_binding_and_expiry() {
        let user = UserId::new();
        let (_, record) = RefreshTokenRecord::issue(user, Duration::days(1)).unwrap();
        assert!(!record.is_valid_for(&UserId::new()));

        let (_, expired) = RefreshTokenRecord::issue(user, Duration::seconds(-1)).unwrap();
        assert!(expired.is_expired());
        assert!(!expired.is_valid_for(&user));
    }
}
