/// Video caption endpoint
///
/// Generates a video title/description from a product image, a text prompt,
/// or a video URL. Platform selection adds formatting instructions to the
/// prompt (hashtags, emoji, call-to-action style) and caps the caption
/// length (Instagram/TikTok 2200, Facebook 8000, YouTube 5000; 500 when no
/// platform constraint applies).
///
/// # Endpoint
///
/// `POST /api/ai/generate-video`
///
/// # Authentication
///
/// Requires an API key (`X-Api-Key: <key>` or `Authorization: Bearer <key>`).
///
/// # Example Request
///
/// ```json
/// {
///   "text_prompt": "Unboxing our walnut desk organizer",
///   "video_url": "https://cdn.example.com/clips/organizer.mp4",
///   "options": {
///     "content_type": "video",
///     "platform": "tiktok",
///     "tone": "casual"
///   }
/// }
/// ```
use axum::{extract::State, Extension, Json};
use std::time::Duration;
use validator::Validate;

use snaptosell_shared::models::options::{ContentType, GenerationOptions};
use snaptosell_shared::prompt::video_format_instructions;

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::auth::AuthContext;

use super::{run_generation, GenerateRequest, GenerateResponse, GenerationSource};

/// Video captions track campaigns closely; cache for 8 hours
const CACHE_TTL: Duration = Duration::from_secs(8 * 3600);

/// Video caption endpoint handler
///
/// # Errors
///
/// - 400 Bad Request: no image, video URL, or text prompt supplied
/// - 401 Unauthorized: missing or invalid API key
/// - 422 Unprocessable Entity: validation errors
/// - 429 Too Many Requests: outbound rate limit reached
/// - 500 Internal Server Error: generation backend failure
pub async fn generate_video(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<GenerateRequest>,
) -> ApiResult<Json<GenerateResponse>> {
    request.validate()?;

    let options = request.options.clone().with_content_type(ContentType::Video);
    let source = video_source(&request, &options)?;

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

/// Builds the generation source for a video request
///
/// An image short-circuits: the backend analyzes it directly. Otherwise the
/// text prompt is enriched with the video URL and, when a platform is
/// selected, its formatting instructions.
fn video_source(
    request: &GenerateRequest,
    options: &GenerationOptions,
) -> ApiResult<GenerationSource> {
    if let Some(image) = &request.image_base64 {
        return Ok(GenerationSource::Image(image.clone()));
    }

    let mut prompt = request.text_prompt.clone().unwrap_or_default();

    if let Some(url) = &request.video_url {
        if !prompt.is_empty() {
            prompt.push_str("\n\n");
        }
        prompt.push_str(&format!("Video URL: {}", url));
        prompt.push_str("\nPlease create caption and description for this video.");
    }

    if let Some(instructions) = options.platform.and_then(video_format_instructions) {
        if !prompt.is_empty() {
            prompt.push_str("\n\n");
        }
        prompt.push_str(instructions);
    }

    if prompt.is_empty() {
        return Err(ApiError::BadRequest(
            "Must provide either an image, video, or text prompt".to_string(),
        ));
    }

    Ok(GenerationSource::Text(prompt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use snaptosell_shared::models::options::{Platform, Tone};

    fn options(platform: Option<Platform>) -> GenerationOptions {
        GenerationOptions {
            content_type: ContentType::Video,
            platform,
            tone: Tone::Casual,
            max_length: None,
            include_keywords: Vec::new(),
        }
    }

    fn request(
        image: Option<&str>,
        text: Option<&str>,
        video_url: Option<&str>,
    ) -> GenerateRequest {
        GenerateRequest {
            image_base64: image.map(str::to_string),
            text_prompt: text.map(str::to_string),
            options: options(None),
            cache_key: None,
            video_url: video_url.map(str::to_string),
        }
    }

    #[test]
    fn test_cache_ttl_is_8_hours() {
        assert_eq!(CACHE_TTL, Duration::from_secs(28_800));
    }

    #[test]
    fn test_image_short_circuits() {
        let req = request(Some("QUJD"), Some("text"), Some("https://v.example/1.mp4"));
        assert!(matches!(
            video_source(&req, &options(Some(Platform::Tiktok))).unwrap(),
            GenerationSource::Image(_)
        ));
    }

    #[test]
    fn test_video_url_appended_to_prompt() {
        let req = request(None, Some("Unboxing clip"), Some("https://v.example/1.mp4"));
        let GenerationSource::Text(prompt) = video_source(&req, &options(None)).unwrap() else {
            panic!("expected text source");
        };

        assert!(prompt.starts_with("Unboxing clip\n\nVideo URL: https://v.example/1.mp4"));
        assert!(prompt.contains("Please create caption and description for this video."));
    }

    #[test]
    fn test_video_url_alone_is_enough() {
        let req = request(None, None, Some("https://v.example/1.mp4"));
        let GenerationSource::Text(prompt) = video_source(&req, &options(None)).unwrap() else {
            panic!("expected text source");
        };

        assert!(prompt.starts_with("Video URL: https://v.example/1.mp4"));
    }

    #[test]
    fn test_platform_instructions_appended() {
        let req = request(None, Some("Unboxing clip"), None);
        let GenerationSource::Text(prompt) =
            video_source(&req, &options(Some(Platform::Youtube))).unwrap()
        else {
            panic!("expected text source");
        };

        assert!(prompt.contains("YouTube video description"));
    }

    #[test]
    fn test_platform_without_video_style_adds_nothing() {
        let req = request(None, Some("Unboxing clip"), None);
        let GenerationSource::Text(prompt) =
            video_source(&req, &options(Some(Platform::Twitter))).unwrap()
        else {
            panic!("expected text source");
        };

        assert_eq!(prompt, "Unboxing clip");
    }

    #[test]
    fn test_empty_request_rejected() {
        let req = request(None, None, None);
        assert!(matches!(
            video_source(&req, &options(None)),
            Err(ApiError::BadRequest(_))
        ));
    }
}
