//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{profile::Profile, refresh_token::RefreshTokenRecord};
pub use repository::{IdentityProvider, ProfileRepository, RefreshTokenRepository};
