//! Session Token Issuer
//!
//! Mints and verifies the gateway's own HS256 session tokens. Tokens are
//! self-contained: verification is a local signature and expiry check with
//! no revocation list.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::error::{AuthError, AuthResult};

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (upstream user id)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
    /// Unique token id
    pub jti: String,
}

/// Issues and verifies session tokens with the process-wide key
pub struct SessionTokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: chrono::Duration,
}

impl SessionTokenIssuer {
    pub fn new(config: &AuthConfig) -> AuthResult<Self> {
        config.validate()?;

        let ttl = chrono::Duration::from_std(config.session_ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid session TTL: {e}")))?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let secret = config.jwt_secret.as_bytes();
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        })
    }

    pub fn ttl(&self) -> chrono::Duration {
        self.ttl
    }

    /// Sign a new token for `user_id`
    pub fn issue(&self, user_id: &UserId) -> AuthResult<String> {
        self.issue_at(user_id, Utc::now())
    }

    pub(crate) fn issue_at(&self, user_id: &UserId, now: DateTime<Utc>) -> AuthResult<String> {
        let claims = SessionClaims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: now
                .checked_add_signed(self.ttl)
                .ok_or_else(|| AuthError::Internal("Session token expiry out of range".into()))?
                .timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Session token signing failed: {e}")))
    }

    /// Verify signature and expiry, returning the subject.
    ///
    /// ## Returns
    /// * `Ok(UserId)` - subject of a valid token
    /// * `Err(AuthError::InvalidToken)` - bad signature, malformed, expired,
    ///   or a subject that is not a UUID
    pub fn verify(&self, token: &str) -> AuthResult<UserId> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Session token rejected");
                AuthError::InvalidToken
            })?;

        data.claims.sub.parse().map_err(|_| AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn issuer(secret: &str) -> SessionTokenIssuer {
        SessionTokenIssuer::new(&AuthConfig::new(secret)).unwrap()
    }

    #[test]
    fn test_round_trip_subject() {
        let issuer = issuer("test-secret");
        let user = UserId::new();
        let token = issuer.issue(&user).unwrap();
        assert_eq!(issuer.verify(&token).unwrap(), user);
    }

    #[test]
    fn test_tokens_for_same_subject_differ() {
        let issuer = issuer("test-secret");
        let user = UserId::new();
        let now = Utc::now();
        let a = issuer.issue_at(&user, now).unwrap();
        let b = issuer.issue_at(&user, now).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let issuer = issuer("test-secret");
        let user = UserId::new();
        let issued = Utc::now() - issuer.ttl() - chrono::Duration::seconds(5);
        let token = issuer.issue_at(&user, issued).unwrap();
        assert!(matches!(issuer.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_other_key_is_rejected() {
        let token = issuer("key-a").issue(&UserId::new()).unwrap();
        assert!(matches!(
            issuer("key-b").verify(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_garbage_is_rejected() {
        let issuer = issuer("test-secret");
        for token in ["", "abc", "a.b.c"] {
            assert!(matches!(issuer.verify(token), Err(AuthError::InvalidToken)));
        }

        let mut token = issuer.issue(&UserId::new()).unwrap();
        token.push('x');
        assert!(matches!(issuer.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_non_uuid_subject_is_rejected() {
        let issuer = issuer("test-secret");
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: "not-a-uuid".into(),
            iat: now,
            exp: now + 3600,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        assert!(matches!(issuer.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        assert!(SessionTokenIssuer::new(&AuthConfig::new("")).is_err());
    }

    #[test]
    fn test_custom_ttl() {
        let config = AuthConfig::new("s").with_session_ttl(Duration::from_secs(60));
        let issuer = SessionTokenIssuer::new(&config).unwrap();
        assert_eq!(issuer.ttl(), chrono::Duration::seconds(60));
    }

    #[test]
    fn test_overlong_ttl_is_rejected() {
        let config = AuthConfig::new("s").with_session_ttl(Duration::from_secs(u64::MAX));
        assert!(matches!(
            SessionTokenIssuer::new(&config),
            Err(AuthError::Internal(_))
        ));
    }

    #[test]
    fn test_expiry_overflow_is_an_error() {
        let issuer = issuer("test-secret");
        let result = issuer.issue_at(&UserId::new(), DateTime::<Utc>::MAX_UTC);
        assert!(matches!(result, Err(AuthError::Internal(_))));
    }
}
