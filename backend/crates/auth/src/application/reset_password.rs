//! Reset Password Use Case
//!
//! Answers identically whether or not the address exists, and whether or
//! not the upstream call succeeded.

use std::sync::Arc;

use crate::domain::repository::IdentityProvider;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Reset password use case
pub struct ResetPasswordUseCase<I>
where
    I: IdentityProvider,
{
    identity: Arc<I>,
}

impl<I> ResetPasswordUseCase<I>
where
    I: IdentityProvider,
{
    pub fn new(identity: Arc<I>) -> Self {
        Self { identity }
    }

    /// Fails only on a malformed email
    pub async fn execute(&self, email: String) -> AuthResult<()> {
        let email = Email::new(email).map_err(|_| AuthError::InvalidEmail)?;

        if let Err(e) = self.identity.request_password_reset(&email).await {
            tracing::warn!(error = %e, "Password reset request failed upstream");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeUpstream;

    #[tokio::test]
    async fn test_upstream_failure_is_swallowed() {
        let upstream = Arc::new(FakeUpstream::new());
        upstream.fail_resets();

        let result = ResetPasswordUseCase::new(upstream.clone())
            .execute("ghost@example.com".into())
            .await;
        assert!(result.is_ok());
        assert_eq!(upstream.reset_requests(), vec!["ghost@example.com"]);
    }

    #[tokio::test]
    async fn test_invalid_email() {
        let upstream = Arc::new(FakeUpstream::new());
        let err = ResetPasswordUseCase::new(upstream.clone())
            .execute("nope".into())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidEmail));
        assert!(upstream.reset_requests().is_empty());
    }
}
