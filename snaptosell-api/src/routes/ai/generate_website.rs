/// Website description endpoint
///
/// Generates an e-commerce product description from a product image or a
/// text prompt.
///
/// # Endpoint
///
/// `POST /api/ai/generate-website`
///
/// # Authentication
///
/// Requires an API key (`X-Api-Key: <key>` or `Authorization: Bearer <key>`).
///
/// # Example Request
///
/// ```json
/// {
///   "text_prompt": "Handmade walnut desk organizer with three compartments",
///   "options": {
///     "content_type": "website",
///     "tone": "professional",
///     "max_length": 600
///   },
///   "cache_key": "desk-organizer-v1"
/// }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "content": "Keep your workspace elegant...",
///   "cached": false
/// }
/// ```
use axum::{extract::State, Extension, Json};
use std::time::Duration;
use validator::Validate;

use snaptosell_shared::models::options::ContentType;

use crate::app::AppState;
use crate::error::ApiResult;
use crate::middleware::auth::AuthContext;

use super::{image_or_text_source, run_generation, GenerateRequest, GenerateResponse};

/// Website descriptions change rarely; cache for 24 hours
const CACHE_TTL: Duration = Duration::from_secs(24 * 3600);

/// Website description endpoint handler
///
/// # Errors
///
/// - 400 Bad Request: neither image nor text prompt supplied
/// - 401 Unauthorized: missing or invalid API key
/// - 422 Unprocessable Entity: validation errors
/// - 429 Too Many Requests: outbound rate limit reached
/// - 500 Internal Server Error: generation backend failure
pub async fn generate_website(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<GenerateRequest>,
) -> ApiResult<Json<GenerateResponse>> {
    request.validate()?;

    let options = request
        .options
        .clone()
        .with_content_type(ContentType::Website);
    let source = image_or_text_source(&request)?;

    run_generation(
        &state,
        &auth,
        request.cache_key.as_deref(),
        source,
        options,
        CACHE_TTL,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_ttl_is_24_hours() {
        assert_eq!(CACHE_TTL, Duration::from_secs(86_400));
    }
}
