//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! The `Display` text of each variant is the user-facing message placed in
//! the `error` field of the response envelope. Internal details live in the
//! variant payloads and only reach the logs.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::bearer::BearerError;
use platform::upstream::UpstreamError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed inbound request body
    #[error("Dados inválidos: {0}")]
    Validation(String),

    /// Password reset request without a usable email
    #[error("Email inválido")]
    InvalidEmail,

    /// Registration without accepting the terms of use
    #[error("É necessário aceitar os termos de uso")]
    TermsNotAccepted,

    /// Upstream rejected the credentials, or could not be asked
    #[error("Email ou senha incorretos")]
    InvalidCredentials,

    /// Upstream refused the signup; carries the raw upstream body
    #[error("Erro ao criar conta: {0}")]
    RegistrationRejected(String),

    /// No `Authorization` header
    #[error("Token de autorização necessário")]
    MissingToken,

    /// `Authorization` header not of the form `Bearer <token>`
    #[error("Formato de token inválido")]
    MalformedToken,

    /// Bad signature, malformed or expired session token
    #[error("Token inválido")]
    InvalidToken,

    /// Refresh request body missing or not JSON
    #[error("Token de refresh inválido")]
    RefreshRequestInvalid,

    /// Refresh token unknown, already used, expired or not owned by the caller
    #[error("Token de refresh inválido")]
    InvalidRefreshToken,

    /// Protected handler reached without an authenticated context
    #[error("Usuário não autenticado")]
    Unauthenticated,

    /// No profile row for the user
    #[error("Perfil não encontrado")]
    ProfileNotFound,

    /// Profile lookup failed while building an auth response
    #[error("Erro ao buscar perfil do usuário")]
    ProfileLookup(#[source] UpstreamError),

    /// Profile lookup failed on the profile endpoint
    #[error("Erro ao buscar perfil")]
    ProfileFetch(#[source] UpstreamError),

    /// Any other upstream failure
    #[error("Erro interno do servidor")]
    Upstream(#[from] UpstreamError),

    /// Token signing, configuration and other server-side failures
    #[error("Erro interno do servidor")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_)
            | AuthError::InvalidEmail
            | AuthError::TermsNotAccepted
            | AuthError::RegistrationRejected(_)
            | AuthError::RefreshRequestInvalid => ErrorKind::BadRequest,
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::MalformedToken
            | AuthError::InvalidToken
            | AuthError::InvalidRefreshToken
            | AuthError::Unauthenticated => ErrorKind::Unauthorized,
            AuthError::ProfileNotFound => ErrorKind::NotFound,
            AuthError::ProfileLookup(_)
            | AuthError::ProfileFetch(_)
            | AuthError::Upstream(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Re-label an upstream failure of a profile lookup made while
    /// building an auth response
    pub fn into_profile_lookup(self) -> Self {
        match self {
            AuthError::Upstream(e) => AuthError::ProfileLookup(e),
            other => other,
        }
    }

    /// Re-label an upstream failure of a profile lookup made by the
    /// profile endpoint
    pub fn into_profile_fetch(self) -> Self {
        match self {
            AuthError::Upstream(e) => AuthError::ProfileFetch(e),
            other => other,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::ProfileLookup(e) | AuthError::ProfileFetch(e) => {
                tracing::error!(error = %e, "Profile lookup failed");
            }
            AuthError::Upstream(e) => {
                tracing::error!(error = %e, "Upstream call failed");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidRefreshToken => {
                tracing::warn!("Invalid refresh token presented");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<BearerError> for AuthError {
    fn from(err: BearerError) -> Self {
        match err {
            BearerError::MissingHeader => AuthError::MissingToken,
            BearerError::Malformed => AuthError::MalformedToken,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Email ou senha incorretos"
        );
        assert_eq!(
            AuthError::RegistrationRejected("User already registered".into()).to_string(),
            "Erro ao criar conta: User already registered"
        );
    }

    #[test]
    fn test_internal_details_are_not_rendered() {
        let err = AuthError::Internal("jwt key rejected".into());
        assert_eq!(err.to_app_error().message(), "Erro interno do servidor");

        let err = AuthError::ProfileLookup(UpstreamError::Timeout);
        assert_eq!(err.kind(), ErrorKind::InternalServerError);
        assert_eq!(
            err.to_app_error().message(),
            "Erro ao buscar perfil do usuário"
        );
    }

    #[test]
    fn test_bearer_errors_are_unauthorized() {
        let missing = AuthError::from(BearerError::MissingHeader);
        let malformed = AuthError::from(BearerError::Malformed);
        assert!(matches!(missing, AuthError::MissingToken));
        assert!(matches!(malformed, AuthError::MalformedToken));
        assert_eq!(missing.kind(), ErrorKind::Unauthorized);
        assert_eq!(malformed.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn test_profile_relabeling() {
        let err = AuthError::Upstream(UpstreamError::Timeout).into_profile_lookup();
        assert!(matches!(err, AuthError::ProfileLookup(_)));

        let err = AuthError::Upstream(UpstreamError::Timeout).into_profile_fetch();
        assert_eq!(err.to_string(), "Erro ao buscar perfil");

        let err = AuthError::ProfileNotFound.into_profile_lookup();
        assert!(matches!(err, AuthError::ProfileNotFound));
    }

    #[test]
    fn test_kinds() {
        assert_eq!(AuthError::TermsNotAccepted.kind(), ErrorKind::BadRequest);
        assert_eq!(AuthError::ProfileNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(AuthError::InvalidToken.kind(), ErrorKind::Unauthorized);
    }
}
