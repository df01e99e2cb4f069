//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Upstream platform configuration and REST client
//! - Ordered query-string building (PostgREST filters)
//! - `Authorization: Bearer` header parsing
//! - Cryptographic utilities (SHA-256, random tokens)

pub mod bearer;
pub mod config;
pub mod crypto;
pub mod query;
pub mod upstream;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;
