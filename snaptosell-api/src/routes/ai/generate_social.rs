/// Social media post endpoint
///
/// Generates a social post from a product image or a text prompt. When a
/// platform is selected, its character limit caps the requested length
/// (Instagram/TikTok 2200, Facebook 63206, Twitter 280).
///
/// # Endpoint
///
/// `POST /api/ai/generate-social`
///
/// # Authentication
///
/// Requires an API key (`X-Api-Key: <key>` or `Authorization: Bearer <key>`).
///
/// # Example Request
///
/// ```json
/// {
///   "image_base64": "data:image/jpeg;base64,...",
///   "options": {
///     "content_type": "social",
///     "platform": "instagram",
///     "tone": "enthusiastic",
///     "include_keywords": ["handmade", "walnut"]
///   }
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

/// Social copy goes stale faster than website copy; cache for 12 hours
const CACHE_TTL: Duration = Duration::from_secs(12 * 3600);

/// Social post endpoint handler
///
/// # Errors
///
/// - 400 Bad Request: neither image nor text prompt supplied
/// - 401 Unauthorized: missing or invalid API key
/// - 422 Unprocessable Entity: validation errors
/// - 429 Too Many Requests: outbound rate limit reached
/// - 500 Internal Server Error: generation backend failure
pub async fn generate_social(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<GenerateRequest>,
) -> ApiResult<Json<GenerateResponse>> {
    request.validate()?;

    let options = request
        .options
        .clone()
        .with_content_type(ContentType::Social);
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
