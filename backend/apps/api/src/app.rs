//! Router assembly

use auth::domain::repository::{IdentityProvider, ProfileRepository, RefreshTokenRepository};
use auth::{AuthAppState, auth_router, profile_router};
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use kernel::response::ApiResponse;
use serde::Serialize;
use team::domain::repository::TeamRepository;
use team::team_router;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

/// GET /health
pub async fn health() -> ApiResponse<HealthStatus> {
    ApiResponse::data(HealthStatus { status: "ok" })
}

/// All gateway routes, without the outer layers
pub fn router<U, R, T>(auth_state: AuthAppState<U, R>, teams: T) -> Router
where
    U: IdentityProvider + ProfileRepository + Send + Sync + 'static,
    R: RefreshTokenRepository + Send + Sync + 'static,
    T: TeamRepository + Send + Sync + 'static,
{
    let gate = auth_state.gate();

    Router::new()
        .route("/health", get(health))
        .nest("/auth", auth_router(auth_state.clone()))
        .nest("/profile", profile_router(auth_state))
        .nest("/teams", team_router(teams, gate))
}

/// CORS for the configured frontend origins
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}
