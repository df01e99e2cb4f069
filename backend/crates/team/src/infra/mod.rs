//! Infrastructure Layer

pub mod upstream;

pub use upstream::UpstreamTeamRepository;
