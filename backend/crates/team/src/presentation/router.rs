//! Team Router

use auth::{AuthGate, require_auth};
use axum::{Router, middleware, routing::get};
use std::sync::Arc;

use crate::domain::repository::TeamRepository;
use crate::presentation::handlers::{self, TeamAppState};

/// Routes nested under `/teams`, all behind the authentication gate
pub fn team_router<T>(repo: T, gate: AuthGate) -> Router
where
    T: TeamRepository + Send + Sync + 'static,
{
    let state = TeamAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route("/{id}/tokens", get(handlers::get_token_balance::<T>))
        .route("/{id}/token-balance", get(handlers::get_token_balance::<T>))
        .route_layer(middleware::from_fn_with_state(gate, require_auth))
        .with_state(state)
}
