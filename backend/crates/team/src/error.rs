//! Team Error Types
//!
//! Team-specific error variants integrated with `kernel::error::AppError`.
//! Each upstream query has its own variant so the response names the step
//! that failed.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::upstream::UpstreamError;
use thiserror::Error;

/// Team-specific result type alias
pub type TeamResult<T> = Result<T, TeamError>;

/// Team-specific error variants
#[derive(Debug, Error)]
pub enum TeamError {
    #[error("ID da equipe é obrigatório")]
    MissingTeamId,

    #[error("ID da equipe inválido")]
    InvalidTeamId,

    #[error("Erro ao verificar associação à equipe")]
    MembershipCheck(#[source] UpstreamError),

    #[error("Sem permissão para acessar esta equipe")]
    NotMember,

    #[error("Erro ao buscar proprietário da equipe")]
    OwnerLookup(#[source] UpstreamError),

    #[error("Proprietário da equipe não encontrado")]
    OwnerNotFound,

    #[error("Erro ao buscar saldo de tokens")]
    BalanceLookup(#[source] UpstreamError),
}

impl TeamError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            TeamError::MissingTeamId | TeamError::InvalidTeamId => ErrorKind::BadRequest,
            TeamError::NotMember => ErrorKind::Forbidden,
            TeamError::OwnerNotFound => ErrorKind::NotFound,
            TeamError::MembershipCheck(_)
            | TeamError::OwnerLookup(_)
            | TeamError::BalanceLookup(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            TeamError::MembershipCheck(e) | TeamError::OwnerLookup(e) | TeamError::BalanceLookup(e) => {
                tracing::error!(error = %e, step = %self, "Team query failed");
            }
            TeamError::NotMember => {
                tracing::warn!("Team access denied");
            }
            _ => {
                tracing::debug!(error = %self, "Team error");
            }
        }
    }
}

impl IntoResponse for TeamError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
