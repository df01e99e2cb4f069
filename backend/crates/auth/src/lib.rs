//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and the session token issuer
//! - `infra/` - Upstream platform bridge, in-memory refresh token store
//! - `presentation/` - HTTP handlers, DTOs, gate middleware, router
//!
//! ## Features
//! - Login / register / password reset delegated to the upstream identity provider
//! - Locally issued HS256 session tokens
//! - Single-use refresh tokens with rotation
//! - Profile lookup from the upstream `profiles` table
//!
//! ## Security Model
//! - Passwords are forwarded upstream once and never stored
//! - Session tokens are verified locally (signature + expiry, zero leeway)
//! - Refresh tokens are stored as SHA-256 digests, bound to their subject

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod test_support;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::session_token::SessionTokenIssuer;
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryRefreshTokenRepository, UpstreamAuthRepository};
pub use presentation::middleware::{AuthGate, AuthenticatedUser, require_auth};
pub use presentation::router::{auth_router, profile_router};
pub use presentation::AuthAppState;
