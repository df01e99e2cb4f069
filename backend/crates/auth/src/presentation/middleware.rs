//! Auth Middleware
//!
//! Authentication gate for protected routes. The check is local: the bearer
//! token is verified against the session signing key, no upstream call.

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum::http::{HeaderMap, Request};
use axum::middleware::Next;
use axum::response::Response;
use kernel::id::UserId;
use platform::bearer::extract_bearer_token;
use std::sync::Arc;

use crate::application::session_token::SessionTokenIssuer;
use crate::error::{AuthError, AuthResult};

/// Middleware state
#[derive(Clone)]
pub struct AuthGate {
    sessions: Arc<SessionTokenIssuer>,
}

impl AuthGate {
    pub fn new(sessions: Arc<SessionTokenIssuer>) -> Self {
        Self { sessions }
    }

    /// Missing header, malformed header, then token verification
    pub fn authenticate(&self, headers: &HeaderMap) -> AuthResult<AuthenticatedUser> {
        let token = extract_bearer_token(headers)?;
        let user_id = self.sessions.verify(token)?;
        Ok(AuthenticatedUser { user_id })
    }
}

/// Caller identity attached to the request by [`require_auth`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that requires a valid session token
pub async fn require_auth(
    State(gate): State<AuthGate>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let user = gate.authenticate(req.headers())?;

    tracing::debug!(user_id = %user.user_id, "Request authenticated");
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or(AuthError::Unauthenticated)
    }
}
