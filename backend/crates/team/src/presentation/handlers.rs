//! HTTP Handlers

use auth::AuthenticatedUser;
use axum::extract::{Path, State};
use kernel::response::ApiResponse;
use std::sync::Arc;

use crate::application::GetTokenBalanceUseCase;
use crate::domain::repository::TeamRepository;
use crate::error::TeamResult;
use crate::presentation::dto::TokenBalanceResponse;

/// Shared state for team handlers
pub struct TeamAppState<T>
where
    T: TeamRepository + Send + Sync + 'static,
{
    pub repo: Arc<T>,
}

impl<T> Clone for TeamAppState<T>
where
    T: TeamRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

/// GET /teams/{id}/tokens (behind the gate)
pub async fn get_token_balance<T>(
    State(state): State<TeamAppState<T>>,
    user: AuthenticatedUser,
    Path(team_id): Path<String>,
) -> TeamResult<ApiResponse<TokenBalanceResponse>>
where
    T: TeamRepository + Send + Sync + 'static,
{
    let balance = GetTokenBalanceUseCase::new(state.repo.clone())
        .execute(&team_id, &user.user_id)
        .await?;

    Ok(ApiResponse::data(balance.into()))
}
