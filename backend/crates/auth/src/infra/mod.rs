//! Infrastructure Layer
//!
//! Upstream platform bridge and refresh token storage.

pub mod memory;
pub mod upstream;

pub use memory::InMemoryRefreshTokenRepository;
pub use upstream::UpstreamAuthRepository;
