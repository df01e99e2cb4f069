//! API DTOs

use serde::Serialize;

use crate::domain::token_balance::TokenBalance;

/// `GET /teams/{id}/tokens` payload
#[derive(Debug, Clone, Serialize)]
pub struct TokenBalanceResponse {
    pub tokens: i64,
}

impl From<TokenBalance> for TokenBalanceResponse {
    fn from(balance: TokenBalance) -> Self {
        Self {
            tokens: balance.tokens,
        }
    }
}
