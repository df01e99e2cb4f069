//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod app;
mod config;

use anyhow::Context;
use auth::domain::repository::RefreshTokenRepository;
use auth::{AuthAppState, InMemoryRefreshTokenRepository, UpstreamAuthRepository};
use platform::upstream::{HttpTransport, UpstreamClient};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use team::UpstreamTeamRepository;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

/// How often expired refresh tokens are dropped
const REFRESH_CLEANUP_INTERVAL: Duration = Duration::from_secs(3600);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,team=info,platform=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!(upstream = ?config.upstream, "Configuration loaded");

    // Upstream client shared by every bridge
    let transport =
        HttpTransport::new(config.upstream.clone()).context("failed to build upstream HTTP client")?;
    let client = UpstreamClient::new(transport);

    let refresh_tokens = Arc::new(InMemoryRefreshTokenRepository::new());
    let auth_state = AuthAppState::new(
        Arc::new(UpstreamAuthRepository::new(client.clone())),
        refresh_tokens.clone(),
        config.auth.clone(),
    )
    .map_err(|e| anyhow::anyhow!("invalid auth configuration: {e:?}"))?;

    spawn_refresh_cleanup(refresh_tokens, REFRESH_CLEANUP_INTERVAL);

    // Build router
    let app = app::router(auth_state, UpstreamTeamRepository::new(client))
        .layer(TraceLayer::new_for_http())
        .layer(app::cors_layer(&config.frontend_origins));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Periodically drop expired refresh tokens.
/// Errors here should not stop the server.
fn spawn_refresh_cleanup(repo: Arc<InMemoryRefreshTokenRepository>, period: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            if let Err(e) = repo.cleanup_expired().await {
                tracing::warn!(error = %e, "Refresh token cleanup failed, continuing anyway");
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
