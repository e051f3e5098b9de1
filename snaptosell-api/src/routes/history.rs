/// Content-generation history endpoints
///
/// Callers can save the copy they decided to keep and list what they have
/// saved. Records are scoped to the API key that created them and live in
/// process memory only.
///
/// # Endpoints
///
/// ```text
/// GET  /api/history   # list the caller's records, newest first
/// POST /api/history   # save a record
/// ```
use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use snaptosell_shared::models::generated::{CreateGeneratedContent, GeneratedContent};
use snaptosell_shared::models::options::GenerationOptions;

use crate::app::AppState;
use crate::error::ApiResult;
use crate::middleware::auth::AuthContext;

/// Save history request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveHistoryRequest {
    /// The generated copy to keep
    #[validate(length(min = 1))]
    pub content: String,

    /// Options the copy was generated with
    pub options: GenerationOptions,

    /// Source text prompt, for text-driven generations
    pub text_prompt: Option<String>,

    /// Source image (base64), for image-driven generations
    pub image_base64: Option<String>,

    /// Product the copy was generated for
    #[validate(length(max = 255))]
    pub product_name: Option<String>,
}

/// Save history response
#[derive(Debug, Serialize)]
pub struct SaveHistoryResponse {
    /// Whether the record was saved
    pub success: bool,

    /// ID of the new record
    pub content_history_id: Uuid,
}

/// History listing response
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    /// The caller's records, newest first
    pub content_history: Vec<GeneratedContent>,
}

/// List history endpoint handler
///
/// # Errors
///
/// - 401 Unauthorized: missing or invalid API key
pub async fn list_history(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<HistoryResponse>> {
    let content_history = state.history.list(&auth.key_name);

    tracing::debug!(
        key_name = %auth.key_name,
        records = content_history.len(),
        "Listed content history"
    );

    Ok(Json(HistoryResponse { content_history }))
}

/// Save history endpoint handler
///
/// # Errors
///
/// - 401 Unauthorized: missing or invalid API key
/// - 422 Unprocessable Entity: validation errors
pub async fn save_history(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<SaveHistoryRequest>,
) -> ApiResult<Json<SaveHistoryResponse>> {
    request.validate()?;

    let record = state.history.append(CreateGeneratedContent {
        owner: auth.key_name.clone(),
        product_name: request.product_name.clone(),
        content_type: request.options.content_type,
        platform: request.options.platform,
        tone: request.options.tone,
        content: request.content.clone(),
        prompt: request.text_prompt.clone(),
        image: request.image_base64.clone(),
        keywords: request.options.include_keywords.clone(),
    });

    tracing::info!(
        key_name = %auth.key_name,
        record_id = %record.id,
        content_type = %record.content_type,
        "Saved content history record"
    );

    Ok(Json(SaveHistoryResponse {
        success: true,
        content_history_id: record.id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use snaptosell_shared::models::options::{ContentType, Tone};

    #[test]
    fn test_save_request_validation() {
        let valid = SaveHistoryRequest {
            content: "Generated copy".to_string(),
            options: GenerationOptions {
                content_type: ContentType::Website,
                platform: None,
                tone: Tone::Professional,
                max_length: None,
                include_keywords: Vec::new(),
            },
            text_prompt: None,
            image_base64: None,
            product_name: Some("Desk Organizer".to_string()),
        };
        assert!(valid.validate().is_ok());

        let mut empty_content = valid.clone();
        empty_content.content = String::new();
        assert!(empty_content.validate().is_err());

        let mut long_name = valid;
        long_name.product_name = Some("n".repeat(256));
        assert!(long_name.validate().is_err());
    }

    #[test]
    fn test_save_response_serialization() {
        let response = SaveHistoryResponse {
            success: true,
            content_history_id: Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"success\":true"));
        assert!(json.contains("550e8400-e29b-41d4-a716-446655440000"));
    }
}
