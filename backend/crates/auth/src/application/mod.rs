//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod get_profile;
pub mod issue_tokens;
pub mod refresh;
pub mod reset_password;
pub mod session_token;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

// Re-exports
pub use config::AuthConfig;
pub use get_profile::GetProfileUseCase;
pub use issue_tokens::{AuthOutput, AuthTokens};
pub use refresh::{RefreshInput, RefreshUseCase};
pub use reset_password::ResetPasswordUseCase;
pub use session_token::SessionTokenIssuer;
pub use sign_in::{SignInInput, SignInUseCase};
pub use sign_out::{SignOutInput, SignOutUseCase};
pub use sign_up::{SignUpInput, SignUpUseCase};
