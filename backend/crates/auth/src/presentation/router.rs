//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::domain::repository::{IdentityProvider, ProfileRepository, RefreshTokenRepository};
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_auth;

/// Routes nested under `/auth`
pub fn auth_router<U, R>(state: AuthAppState<U, R>) -> Router
where
    U: IdentityProvider + ProfileRepository + Send + Sync + 'static,
    R: RefreshTokenRepository + Send + Sync + 'static,
{
    let protected = Router::new()
        .route("/refresh", post(handlers::refresh::<U, R>))
        .route_layer(middleware::from_fn_with_state(state.gate(), require_auth));

    Router::new()
        .route("/login", post(handlers::login::<U, R>))
        .route("/register", post(handlers::register::<U, R>))
        .route("/logout", post(handlers::logout::<U, R>))
        .route("/reset-password", post(handlers::reset_password::<U, R>))
        .merge(protected)
        .with_state(state)
}

/// Routes nested under `/profile`
pub fn profile_router<U, R>(state: AuthAppState<U, R>) -> Router
where
    U: IdentityProvider + ProfileRepository + Send + Sync + 'static,
    R: RefreshTokenRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(handlers::get_profile::<U, R>))
        .route_layer(middleware::from_fn_with_state(state.gate(), require_auth))
        .with_state(state)
}
