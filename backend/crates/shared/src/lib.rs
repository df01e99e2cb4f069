//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of the gateway's vocabulary:
//! - Common error types and result aliases
//! - The `{data, error, message}` response envelope
//! - Common primitive value objects (ID types)
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod response;
