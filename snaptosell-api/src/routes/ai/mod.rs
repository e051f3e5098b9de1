/// AI generation endpoints
///
/// The four generation routes share one request/response shape and one
/// execution flow; only the forced content type, the cache TTL, and the
/// input rules differ per endpoint:
///
/// - `generate_website`: website descriptions, cached 24 hours
/// - `generate_social`: social posts with platform limits, cached 12 hours
/// - `generate_video`: video captions with platform formatting, cached 8 hours
/// - `analyze_image`: image-only analysis, cached 1 hour
///
/// # Execution Flow
///
/// ```text
/// validate request
///   ├─> cache lookup (scoped per API key)  ──hit──> {content, cached: true}
///   ├─> rate limiter (sliding window)      ──full─> 429 + Retry-After
///   ├─> generation backend (Gemini)
///   ├─> cache store (endpoint TTL)
///   └─> {content, cached: false}
/// ```
pub mod analyze_image;
pub mod generate_social;
pub mod generate_video;
pub mod generate_website;

use axum::Json;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::time::Duration;
use validator::Validate;

use snaptosell_shared::models::options::GenerationOptions;

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::auth::AuthContext;

/// Request body shared by the generation endpoints
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateRequest {
    /// Base64-encoded product image, optionally as a data URL
    pub image_base64: Option<String>,

    /// Text prompt, used when no image is supplied
    #[validate(length(min = 1, max = 4000))]
    pub text_prompt: Option<String>,

    /// Content-generation options
    pub options: GenerationOptions,

    /// Caller-chosen cache key; namespaced per API key before use
    #[validate(length(min = 1, max = 256))]
    pub cache_key: Option<String>,

    /// Source video URL (video endpoint only)
    #[validate(length(min = 1, max = 2048))]
    pub video_url: Option<String>,
}

/// Response for all generation endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The generated copy
    pub content: String,

    /// Whether the copy came from the cache
    pub cached: bool,
}

/// What the generation backend is asked to work from
#[derive(Debug, Clone)]
pub(crate) enum GenerationSource {
    /// Base64 product image
    Image(String),

    /// Text prompt (possibly enriched by the route)
    Text(String),
}

/// Picks the generation source for image-or-text endpoints
///
/// An image takes precedence over a text prompt, matching the endpoint
/// contract: "provide either image_base64 or text_prompt".
pub(crate) fn image_or_text_source(request: &GenerateRequest) -> ApiResult<GenerationSource> {
    if let Some(image) = &request.image_base64 {
        return Ok(GenerationSource::Image(image.clone()));
    }
    if let Some(prompt) = &request.text_prompt {
        return Ok(GenerationSource::Text(prompt.clone()));
    }
    Err(ApiError::BadRequest(
        "Must provide either image_base64 or text_prompt".to_string(),
    ))
}

/// Runs the shared generation flow: cache, limiter, backend, cache store
pub(crate) async fn run_generation(
    state: &AppState,
    auth: &AuthContext,
    client_cache_key: Option<&str>,
    source: GenerationSource,
    options: GenerationOptions,
    cache_ttl: Duration,
) -> ApiResult<Json<GenerateResponse>> {
    let cache_key = scoped_cache_key(&auth.key_name, client_cache_key, &source, &options);

    if let Some(content) = state.cache.get(&cache_key) {
        tracing::debug!(
            key_name = %auth.key_name,
            content_type = %options.content_type,
            "Serving generation result from cache"
        );
        return Ok(Json(GenerateResponse {
            content,
            cached: true,
        }));
    }

    // Guard the upstream call; the window is shared process-wide
    state.limiter.try_acquire()?;

    let result = match &source {
        GenerationSource::Image(image) => {
            state.generator.generate_from_image(image, &options).await
        }
        GenerationSource::Text(prompt) => {
            state.generator.generate_from_text(prompt, &options).await
        }
    };

    let content = result.map_err(|e| {
        tracing::error!(
            error = %e,
            key_name = %auth.key_name,
            content_type = %options.content_type,
            "Content generation failed"
        );
        ApiError::from(e)
    })?;

    state.cache.insert(cache_key, content.clone(), cache_ttl);

    tracing::info!(
        key_name = %auth.key_name,
        content_type = %options.content_type,
        chars = content.len(),
        "Generated content"
    );

    Ok(Json(GenerateResponse {
        content,
        cached: false,
    }))
}

/// Derives the effective cache key for a request
///
/// The key is a SHA-256 fingerprint over the API key name plus either the
/// caller-supplied cache key or the request content. Namespacing by key
/// name keeps one caller's cached copy invisible to every other caller.
fn scoped_cache_key(
    owner: &str,
    client_key: Option<&str>,
    source: &GenerationSource,
    options: &GenerationOptions,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(owner.as_bytes());
    hasher.update([0u8]);

    match client_key {
        Some(key) => {
            hasher.update(b"client:");
            hasher.update(key.as_bytes());
        }
        None => {
            hasher.update(b"request:");
            hasher.update(options.content_type.as_str().as_bytes());
            hasher.update([0u8]);
            if let Some(platform) = options.platform {
                hasher.update(platform.as_str().as_bytes());
            }
            hasher.update([0u8]);
            hasher.update(options.tone.as_str().as_bytes());
            hasher.update([0u8]);
            if let Some(max_length) = options.effective_max_length() {
                hasher.update(max_length.to_le_bytes());
            }
            hasher.update([0u8]);
            for keyword in &options.include_keywords {
                hasher.update(keyword.as_bytes());
                hasher.update([0u8]);
            }
            match source {
                GenerationSource::Image(image) => {
                    hasher.update(b"image:");
                    hasher.update(image.as_bytes());
                }
                GenerationSource::Text(prompt) => {
                    hasher.update(b"text:");
                    hasher.update(prompt.as_bytes());
                }
            }
        }
    }

    hex::encode(hasher.finalize())
}
