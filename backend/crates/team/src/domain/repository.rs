//! Repository Traits

use kernel::id::{TeamId, UserId};

use crate::domain::token_balance::TokenBalance;
use crate::error::TeamResult;

/// Team membership and balance queries.
///
/// Each method fails with the error variant naming its own step.
#[trait_variant::make(TeamRepository: Send)]
pub trait LocalTeamRepository {
    /// Whether `user_id` is a member of `team_id`
    async fn is_member(&self, team_id: &TeamId, user_id: &UserId) -> TeamResult<bool>;

    /// Owner of the team, if any
    async fn find_owner(&self, team_id: &TeamId) -> TeamResult<Option<UserId>>;

    /// Balance row of a user, if any
    async fn find_token_balance(&self, user_id: &UserId) -> TeamResult<Option<TokenBalance>>;
}
