/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use snaptosell_api::{app::{AppState, build_router}, config::Config};
/// use snaptosell_gemini::client::{GeminiClient, GeminiConfig};
/// use std::sync::Arc;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let generator = Arc::new(GeminiClient::new(config.gemini.clone())?);
/// let state = AppState::new(config, generator);
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```
use crate::{config::Config, middleware::security::SecurityHeadersLayer};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use snaptosell_gemini::generator::ContentGenerator;
use snaptosell_shared::cache::ExpiringCache;
use snaptosell_shared::models::generated::HistoryStore;
use snaptosell_shared::rate_limit::RateLimiter;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Every field is an `Arc`, so clones are cheap and all handlers observe
/// the same process-wide cache, limiter, and history.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<Config>,

    /// Generated-content cache
    pub cache: Arc<ExpiringCache<String>>,

    /// Sliding-window limiter for outbound Gemini calls
    pub limiter: Arc<RateLimiter>,

    /// In-memory generation history
    pub history: Arc<HistoryStore>,

    /// Content generation backend
    pub generator: Arc<dyn ContentGenerator>,
}

impl AppState {
    /// Creates new application state
    ///
    /// The limiter threshold comes from `config.limits.requests_per_minute`.
    pub fn new(config: Config, generator: Arc<dyn ContentGenerator>) -> Self {
        let limiter = RateLimiter::per_minute(config.limits.requests_per_minute);

        Self {
            config: Arc::new(config),
            cache: Arc::new(ExpiringCache::new()),
            limiter: Arc::new(limiter),
            history: Arc::new(HistoryStore::new()),
            generator,
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                        # Health check (public)
/// └── /api/                          # API key required
///     ├── /ai/
///     │   ├── POST /generate-website
///     │   ├── POST /generate-social
///     │   ├── POST /generate-video
///     │   └── POST /analyze-image
///     └── /history                   # GET list, POST save
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Security headers
/// 4. API key authentication (on `/api` only)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Generation endpoints
    let ai_routes = Router::new()
        .route(
            "/generate-website",
            post(routes::ai::generate_website::generate_website),
        )
        .route(
            "/generate-social",
            post(routes::ai::generate_social::generate_social),
        )
        .route(
            "/generate-video",
            post(routes::ai::generate_video::generate_video),
        )
        .route(
            "/analyze-image",
            post(routes::ai::analyze_image::analyze_image),
        );

    // All /api routes require an API key
    let api_routes = Router::new()
        .nest("/ai", ai_routes)
        .route(
            "/history",
            get(routes::history::list_history).post(routes::history::save_history),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::auth::api_key_auth,
        ));

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        // Production mode: configure allowed origins
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .max_age(std::time::Duration::from_secs(3600))
    };

    // Combine all routes with middleware stack
    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

/// Spawns the periodic cache sweep task
///
/// Evicts expired entries proactively so abandoned cache keys don't
/// accumulate between reads. Runs until the process exits.
pub fn spawn_cache_sweeper(
    cache: Arc<ExpiringCache<String>>,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick fires immediately; nothing can have expired yet
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let removed = cache.sweep();
            if removed > 0 {
                tracing::debug!(removed, "Swept expired cache entries");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiConfig, ApiKeyEntry, AuthConfig, LimitsConfig};
    use snaptosell_gemini::client::GeminiConfig;
    use snaptosell_gemini::mock::MockGenerator;

    fn test_config() -> Config {
        Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
                production: false,
            },
            gemini: GeminiConfig {
                api_key: "test".to_string(),
                model: "gemini-2.0-flash".to_string(),
                base_url: "http://localhost:9999".to_string(),
                timeout_secs: 5,
            },
            auth: AuthConfig {
                api_keys: vec![ApiKeyEntry {
                    name: "test".to_string(),
                    secret: "secret".to_string(),
                }],
            },
            limits: LimitsConfig {
                requests_per_minute: 30,
                cache_sweep_interval_secs: 900,
            },
        }
    }

    #[test]
    fn test_app_state_wires_limiter_from_config() {
        let mut config = test_config();
        config.limits.requests_per_minute = 7;

        let state = AppState::new(config, Arc::new(MockGenerator::new()));
        assert_eq!(state.limiter.limit(), 7);
        assert!(state.cache.is_empty());
    }

    #[tokio::test]
    async fn test_build_router_accepts_state() {
        let state = AppState::new(test_config(), Arc::new(MockGenerator::new()));
        let _app = build_router(state);
    }
}
