/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - In-memory application setup with the mock generation backend
/// - API key fixtures
/// - Request helpers

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use snaptosell_api::app::{build_router, AppState};
use snaptosell_api::config::{ApiConfig, ApiKeyEntry, AuthConfig, Config, LimitsConfig};
use snaptosell_gemini::client::GeminiConfig;
use snaptosell_gemini::mock::MockGenerator;
use std::sync::Arc;
use tower::Service as _;

/// Secret for the primary test API key (name: `acme`)
pub const PRIMARY_KEY: &str = "sk-test-acme";

/// Secret for the secondary test API key (name: `globex`)
pub const SECONDARY_KEY: &str = "sk-test-globex";

/// Copy returned by the mock backend
pub const MOCK_COPY: &str = "A fine walnut desk organizer for the modern desk.";

/// Test context containing the app and its shared state
pub struct TestContext {
    pub app: Router,
    pub state: AppState,
    pub generator: Arc<MockGenerator>,
}

impl TestContext {
    /// Creates a context with the default rate limit (30/min)
    pub fn new() -> Self {
        Self::build(30, Arc::new(MockGenerator::with_response(MOCK_COPY)))
    }

    /// Creates a context with a custom outbound rate limit
    pub fn with_rate_limit(requests_per_minute: u32) -> Self {
        Self::build(
            requests_per_minute,
            Arc::new(MockGenerator::with_response(MOCK_COPY)),
        )
    }

    /// Creates a context whose generation backend always fails
    pub fn failing() -> Self {
        Self::build(30, Arc::new(MockGenerator::failing()))
    }

    fn build(requests_per_minute: u32, generator: Arc<MockGenerator>) -> Self {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
                production: false,
            },
            gemini: GeminiConfig {
                api_key: "unused-in-tests".to_string(),
                model: "gemini-2.0-flash".to_string(),
                base_url: "http://localhost:9".to_string(),
                timeout_secs: 1,
            },
            auth: AuthConfig {
                api_keys: vec![
                    ApiKeyEntry {
                        name: "acme".to_string(),
                        secret: PRIMARY_KEY.to_string(),
                    },
                    ApiKeyEntry {
                        name: "globex".to_string(),
                        secret: SECONDARY_KEY.to_string(),
                    },
                ],
            },
            limits: LimitsConfig {
                requests_per_minute,
                cache_sweep_interval_secs: 900,
            },
        };

        let state = AppState::new(config, generator.clone());
        let app = build_router(state.clone());

        TestContext {
            app,
            state,
            generator,
        }
    }

    /// Returns the authorization header value for the primary key
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", PRIMARY_KEY)
    }
}

/// Sends a POST with a JSON body, returning status and parsed response body
pub async fn post_json(
    ctx: &TestContext,
    uri: &str,
    auth: Option<&str>,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");

    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }

    let request = builder.body(Body::from(body.to_string())).unwrap();
    send(ctx, request).await
}

/// Sends a GET, returning status and parsed response body
pub async fn get_json(
    ctx: &TestContext,
    uri: &str,
    auth: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method("GET").uri(uri);

    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }

    let request = builder.body(Body::empty()).unwrap();
    send(ctx, request).await
}

async fn send(ctx: &TestContext, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = ctx.app.clone().call(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, body)
}
