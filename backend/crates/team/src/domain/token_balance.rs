//! Token Balance Entity

use serde::Serialize;

/// Token balance of a team, i.e. of its owner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TokenBalance {
    pub tokens: i64,
}

impl TokenBalance {
    pub fn new(tokens: i64) -> Self {
        Self { tokens }
    }

    /// Upstream stores a numeric column; fractions are truncated and
    /// a null value counts as empty
    pub fn from_upstream(tokens: Option<f64>) -> Self {
        Self::new(tokens.map(|t| t as i64).unwrap_or_default())
    }
}
