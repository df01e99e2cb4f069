//! Get Token Balance Use Case
//!
//! Membership check → owner lookup → owner balance. Each step runs only if
//! the previous one succeeded.

use std::sync::Arc;

use kernel::id::{TeamId, UserId};

use crate::domain::repository::TeamRepository;
use crate::domain::token_balance::TokenBalance;
use crate::error::{TeamError, TeamResult};

/// Get token balance use case
pub struct GetTokenBalanceUseCase<T>
where
    T: TeamRepository,
{
    repo: Arc<T>,
}

impl<T> GetTokenBalanceUseCase<T>
where
    T: TeamRepository,
{
    pub fn new(repo: Arc<T>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, team_id: &str, user_id: &UserId) -> TeamResult<TokenBalance> {
        let team_id = parse_team_id(team_id)?;

        if !self.repo.is_member(&team_id, user_id).await? {
            tracing::warn!(team_id = %team_id, user_id = %user_id, "Non-member asked for team balance");
            return Err(TeamError::NotMember);
        }

        let owner = self
            .repo
            .find_owner(&team_id)
            .await?
            .ok_or(TeamError::OwnerNotFound)?;

        let balance = self
            .repo
            .find_token_balance(&owner)
            .await?
            .unwrap_or_default();

        tracing::debug!(team_id = %team_id, tokens = balance.tokens, "Team balance resolved");

        Ok(balance)
    }
}

fn parse_team_id(raw: &str) -> TeamResult<TeamId> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(TeamError::MissingTeamId);
    }
    raw.parse().map_err(|_| TeamError::InvalidTeamId)
}
