//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::TeamAppState;
pub use router::team_router;
