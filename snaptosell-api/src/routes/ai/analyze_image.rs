/// Product image analysis endpoint
///
/// Generates copy straight from a product image. Unlike the other
/// generation endpoints the image is mandatory and its base64 payload is
/// checked before anything is sent upstream.
///
/// # Endpoint
///
/// `POST /api/ai/analyze-image`
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
///     "content_type": "website",
///     "tone": "professional"
///   }
/// }
/// ```
use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use std::time::Duration;
use validator::Validate;

use snaptosell_shared::models::options::GenerationOptions;
use snaptosell_shared::prompt::is_valid_base64_image;

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::auth::AuthContext;

use super::{run_generation, GenerateResponse, GenerationSource};

/// Analysis results are the most ad-hoc of the four; cache for 1 hour
const CACHE_TTL: Duration = Duration::from_secs(3600);

/// Analyze image request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnalyzeImageRequest {
    /// Base64-encoded product image, optionally as a data URL
    #[validate(length(min = 1))]
    pub image_base64: String,

    /// Content-generation options, used as supplied
    pub options: GenerationOptions,

    /// Caller-chosen cache key; namespaced per API key before use
    #[validate(length(min = 1, max = 256))]
    pub cache_key: Option<String>,
}

/// Analyze image endpoint handler
///
/// # Errors
///
/// - 400 Bad Request: missing or malformed base64 image
/// - 401 Unauthorized: missing or invalid API key
/// - 422 Unprocessable Entity: validation errors
/// - 429 Too Many Requests: outbound rate limit reached
/// - 500 Internal Server Error: generation backend failure
pub async fn analyze_image(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<AnalyzeImageRequest>,
) -> ApiResult<Json<GenerateResponse>> {
    request.validate()?;

    if !is_valid_base64_image(&request.image_base64) {
        return Err(ApiError::BadRequest(
            "Invalid image format. Please provide a valid base64 encoded image".to_string(),
        ));
    }

    run_generation(
        &state,
        &auth,
        request.cache_key.as_deref(),
        GenerationSource::Image(request.image_base64.clone()),
        request.options.clone(),
        CACHE_TTL,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use snaptosell_shared::models::options::{ContentType, Tone};

    fn request(image: &str) -> AnalyzeImageRequest {
        AnalyzeImageRequest {
            image_base64: image.to_string(),
            options: GenerationOptions {
                content_type: ContentType::Website,
                platform: None,
                tone: Tone::Professional,
                max_length: None,
                include_keywords: Vec::new(),
            },
            cache_key: None,
        }
    }

    #[test]
    fn test_cache_ttl_is_1_hour() {
        assert_eq!(CACHE_TTL, Duration::from_secs(3600));
    }

    #[test]
    fn test_validation_rejects_empty_image() {
        assert!(request("").validate().is_err());
        assert!(request("QUJD").validate().is_ok());
    }

    #[test]
    fn test_deserializes_without_cache_key() {
        let req: AnalyzeImageRequest = serde_json::from_str(
            r#"{
                "image_base64": "QUJD",
                "options": {"content_type": "website", "tone": "formal"}
            }"#,
        )
        .unwrap();

        assert_eq!(req.cache_key, None);
        assert_eq!(req.options.tone, Tone::Formal);
    }
}
