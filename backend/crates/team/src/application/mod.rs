//! Application Layer

pub mod get_token_balance;

pub use get_token_balance::GetTokenBalanceUseCase;
