//! Profile Entity
//!
//! Read-only view of a row in the upstream `profiles` table, keyed by the
//! upstream auth user id. The gateway never mutates profiles.

use kernel::id::UserId;
use serde::{Deserialize, Deserializer};

use crate::domain::value_object::{email::Email, full_name::FullName};

/// User profile as stored upstream
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Profile {
    pub id: UserId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_admin: bool,
}

/// Nullable columns read as their default value
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Profile {
    /// Profile synthesized right after signup, when the upstream trigger
    /// has not created the row yet
    pub fn fallback(id: UserId, email: &Email, full_name: &FullName) -> Self {
        Self {
            id,
            email: email.as_str().to_owned(),
            name: full_name.as_str().to_owned(),
            is_admin: false,
        }
    }
}
