//! Team Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Token balance entity, repository trait
//! - `application/` - Token balance use case
//! - `infra/` - Upstream `team_members` / `user_tokens` queries
//! - `presentation/` - HTTP handler, DTOs, router
//!
//! Only the team token balance is served. The balance shown to any member
//! is the balance of the team owner.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{TeamError, TeamResult};
pub use infra::UpstreamTeamRepository;
pub use presentation::router::team_router;
