//! Password Value Object
//!
//! Passwords are never stored or hashed here: they are forwarded once to the
//! upstream identity provider. This type only enforces input rules and keeps
//! the plaintext out of `Debug` output.

use crate::error::{AuthError, AuthResult};
use std::fmt;

/// Minimum password length at signup
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Plaintext password in transit to the upstream provider
#[derive(Clone)]
pub struct Password(String);

impl Password {
    /// Password for sign-in: must not be empty
    pub fn for_sign_in(raw: impl Into<String>) -> AuthResult<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(AuthError::Validation("senha é obrigatória".into()));
        }
        Ok(Self(raw))
    }

    /// Password for sign-up: at least [`PASSWORD_MIN_LENGTH`] characters
    pub fn for_sign_up(raw: impl Into<String>) -> AuthResult<Self> {
        let raw = raw.into();
        if raw.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(AuthError::Validation(format!(
                "senha deve ter pelo menos {PASSWORD_MIN_LENGTH} caracteres"
            )));
        }
        Ok(Self(raw))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_rules() {
        assert!(Password::for_sign_in("x").is_ok());
        assert!(Password::for_sign_in("").is_err());
    }

    #[test]
    fn test_sign_up_rules() {
        assert!(Password::for_sign_up("123456").is_ok());
        assert!(Password::for_sign_up("12345").is_err());
        // Counted in characters, not bytes
        assert!(Password::for_sign_up("ããããã").is_err());
    }

    #[test]
    fn test_debug_redacts() {
        let password = Password::for_sign_in("hunter22").unwrap();
        assert!(!format!("{password:?}").contains("hunter22"));
        assert_eq!(password.expose(), "hunter22");
    }
}
