//! Ordered query-string builder
//!
//! The upstream REST API (PostgREST) expresses filters as query parameters
//! such as `team_id=eq.<id>`. Parameters are kept in insertion order so that a
//! request with several filters always renders the same URL.

use std::fmt;

/// Ordered list of query parameters.
///
/// ```rust
/// use platform::query::QueryParams;
///
/// let query = QueryParams::new()
///     .select("id")
///     .eq("team_id", "t1")
///     .eq("user_id", "u1");
/// assert_eq!(query.to_string(), "?select=id&team_id=eq.t1&user_id=eq.u1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw `key=value` pair
    pub fn push(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// PostgREST equality filter: `column=eq.value`
    pub fn eq(self, column: &str, value: impl fmt::Display) -> Self {
        self.push(column, format!("eq.{value}"))
    }

    /// PostgREST column projection: `select=a,b`
    pub fn select(self, columns: &str) -> Self {
        self.push("select", columns)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

/// Renders `?k1=v1&k2=v2`, or nothing when empty. Keys and values are
/// percent-encoded.
impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(
                f,
                "{sep}{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )?;
        }
        Ok(())
    }
}
