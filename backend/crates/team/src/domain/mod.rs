//! Domain Layer

pub mod repository;
pub mod token_balance;

pub use repository::TeamRepository;
pub use token_balance::TokenBalance;
