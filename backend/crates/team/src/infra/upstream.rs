//! Upstream team queries over the platform REST API

use kernel::id::{TeamId, UserId};
use platform::query::QueryParams;
use platform::upstream::{UpstreamClient, UpstreamRequest, UpstreamTransport};
use serde::Deserialize;

use crate::domain::repository::TeamRepository;
use crate::domain::token_balance::TokenBalance;
use crate::error::{TeamError, TeamResult};

const TEAM_MEMBERS_PATH: &str = "/rest/v1/team_members";
const USER_TOKENS_PATH: &str = "/rest/v1/user_tokens";

/// Role of the member whose balance backs the team
const OWNER_ROLE: &str = "owner";

#[derive(Deserialize)]
struct MemberRow {}

#[derive(Deserialize)]
struct OwnerRow {
    user_id: UserId,
}

#[derive(Deserialize)]
struct BalanceRow {
    #[serde(default)]
    tokens: Option<f64>,
}

/// Team repository backed by the upstream platform
pub struct UpstreamTeamRepository<T> {
    client: UpstreamClient<T>,
}

impl<T> Clone for UpstreamTeamRepository<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<T> UpstreamTeamRepository<T>
where
    T: UpstreamTransport + Sync,
{
    pub fn new(client: UpstreamClient<T>) -> Self {
        Self { client }
    }
}

impl<T> TeamRepository for UpstreamTeamRepository<T>
where
    T: UpstreamTransport + Sync,
{
    async fn is_member(&self, team_id: &TeamId, user_id: &UserId) -> TeamResult<bool> {
        let request = UpstreamRequest::get(TEAM_MEMBERS_PATH).with_query(
            QueryParams::new()
                .select("id")
                .eq("team_id", team_id)
                .eq("user_id", user_id),
        );

        let rows: Vec<MemberRow> = self
            .client
            .fetch(request)
            .await
            .map_err(TeamError::MembershipCheck)?;
        Ok(!rows.is_empty())
    }

    async fn find_owner(&self, team_id: &TeamId) -> TeamResult<Option<UserId>> {
        let request = UpstreamRequest::get(TEAM_MEMBERS_PATH).with_query(
            QueryParams::new()
                .select("user_id")
                .eq("team_id", team_id)
                .eq("role", OWNER_ROLE),
        );

        let rows: Vec<OwnerRow> = self
            .client
            .fetch(request)
            .await
            .map_err(TeamError::OwnerLookup)?;
        Ok(rows.into_iter().next().map(|row| row.user_id))
    }

    async fn find_token_balance(&self, user_id: &UserId) -> TeamResult<Option<TokenBalance>> {
        let request = UpstreamRequest::get(USER_TOKENS_PATH)
            .with_query(QueryParams::new().select("tokens").eq("user_id", user_id));

        let rows: Vec<BalanceRow> = self
            .client
            .fetch(request)
            .await
            .map_err(TeamError::BalanceLookup)?;
        Ok(rows
            .into_iter()
            .next()
            .map(|row| TokenBalance::from_upstream(row.tokens)))
    }
}
