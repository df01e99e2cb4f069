//! API DTOs (Data Transfer Objects)

use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::application::issue_tokens::AuthOutput;
use crate::domain::entity::profile::Profile;

// ============================================================================
// Requests
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Register request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    #[serde(default)]
    pub terms_accepted: bool,
}

/// Refresh request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Logout request (body is optional)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Reset password request
#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
}

// ============================================================================
// Responses
// ============================================================================

/// Public user representation
#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub is_admin: bool,
}

impl From<Profile> for UserDto {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            email: profile.email,
            name: profile.name,
            is_admin: profile.is_admin,
        }
    }
}

/// Payload of login, register and refresh
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserDto,
    pub token: String,
    pub refresh_token: String,
}

impl From<AuthOutput> for AuthResponse {
    fn from(output: AuthOutput) -> Self {
        Self {
            user: output.profile.into(),
            token: output.tokens.token,
            refresh_token: output.tokens.refresh_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::issue_tokens::AuthTokens;

    #[test]
    fn test_auth_response_shape() {
        let id = UserId::new();
        let response = AuthResponse::from(AuthOutput {
            profile: Profile {
                id,
                email: "a@b.co".into(),
                name: "Ana".into(),
                is_admin: true,
            },
            tokens: AuthTokens {
                token: "jwt".into(),
                refresh_token: "rt".into(),
            },
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "user": { "id": id.to_string(), "email": "a@b.co", "name": "Ana", "is_admin": true },
                "token": "jwt",
                "refreshToken": "rt"
            })
        );
    }

    #[test]
    fn test_register_request_camel_case() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"email":"a@b.co","password":"secret1","fullName":"Ana","termsAccepted":true}"#,
        )
        .unwrap();
        assert_eq!(req.full_name, "Ana");
        assert!(req.terms_accepted);
    }
}
