//! # SnapToSell API Server
//!
//! This is the HTTP API server for SnapToSell, turning product images and
//! text prompts into AI-generated marketing copy via Gemini.
//!
//! ## Architecture
//!
//! The server is built with Axum and provides:
//! - Content generation endpoints (website, social, video, image analysis)
//! - A process-wide expiring cache in front of the Gemini backend
//! - A sliding-window rate limiter guarding outbound Gemini calls
//! - API key authentication and per-key generation history
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p snaptosell-api
//! ```

use snaptosell_api::app::{build_router, spawn_cache_sweeper, AppState};
use snaptosell_api::config::Config;
use snaptosell_gemini::client::GeminiClient;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snaptosell_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "SnapToSell API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!(
        model = %config.gemini.model,
        rate_limit = config.limits.requests_per_minute,
        "Configuration loaded"
    );

    // Build the generation backend and shared state
    let generator = Arc::new(GeminiClient::new(config.gemini.clone())?);
    let sweep_interval = Duration::from_secs(config.limits.cache_sweep_interval_secs);
    let state = AppState::new(config, generator);

    // Start the periodic cache sweep
    spawn_cache_sweeper(state.cache.clone(), sweep_interval);

    // Build and serve the application
    let app = build_router(state.clone());
    let addr = state.config.bind_address();

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Resolves when ctrl-c is received
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}
