//! Full Name Value Object

use crate::error::{AuthError, AuthResult};

/// Maximum full name length (in characters)
const FULL_NAME_MAX_LENGTH: usize = 200;

/// Display name given at signup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName(String);

impl FullName {
    pub fn new(name: impl Into<String>) -> AuthResult<Self> {
        let name = name.into().trim().to_string();

        if name.is_empty() {
            return Err(AuthError::Validation("nome completo é obrigatório".into()));
        }

        if name.chars().count() > FULL_NAME_MAX_LENGTH {
            return Err(AuthError::Validation(format!(
                "nome completo deve ter no máximo {FULL_NAME_MAX_LENGTH} caracteres"
            )));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
