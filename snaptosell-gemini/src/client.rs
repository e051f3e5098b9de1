/// REST client for the Gemini `generateContent` endpoint
///
/// Wraps the Google Generative Language HTTP API using [`reqwest`]. One
/// client serves the whole process; reqwest pools connections internally.
///
/// # Request Shape
///
/// Every call posts to
/// `{base_url}/v1beta/models/{model}:generateContent?key={api_key}` with:
/// - a single user turn whose parts are the prompt text and, for
///   image-driven requests, the inline image data
/// - four safety settings, all `BLOCK_MEDIUM_AND_ABOVE`
/// - a fixed generation config (temperature 0.7, topK 40, topP 0.95,
///   maxOutputTokens 1024)
///
/// # Example
///
/// ```no_run
/// use snaptosell_gemini::client::{GeminiClient, GeminiConfig};
/// use snaptosell_gemini::generator::ContentGenerator;
/// use snaptosell_shared::models::options::{ContentType, GenerationOptions, Tone};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GeminiClient::new(GeminiConfig::from_env()?)?;
///
/// let options = GenerationOptions {
///     content_type: ContentType::Website,
///     platform: None,
///     tone: Tone::Professional,
///     max_length: Some(500),
///     include_keywords: vec![],
/// };
///
/// let copy = client
///     .generate_from_text("Describe a walnut desk organizer.", &options)
///     .await?;
/// println!("{}", copy);
/// # Ok(())
/// # }
/// ```
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use snaptosell_shared::models::options::GenerationOptions;
use snaptosell_shared::prompt;

use crate::generator::{ContentGenerator, GeneratorError, GeneratorResult};

/// Default model identifier
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Mime type assumed for inline product images
const IMAGE_MIME_TYPE: &str = "image/jpeg";

/// Gemini client configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for the Generative Language API
    pub api_key: String,

    /// Model identifier (e.g. `gemini-2.0-flash`)
    pub model: String,

    /// API base URL (overridable for testing)
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GeminiConfig {
    /// Loads configuration from environment variables
    ///
    /// # Environment Variables
    ///
    /// - `GEMINI_API_KEY`: API key (required)
    /// - `GEMINI_MODEL`: model identifier (default: `gemini-2.0-flash`)
    /// - `GEMINI_BASE_URL`: API base URL (default: Google's endpoint)
    /// - `GEMINI_TIMEOUT_SECS`: request timeout (default: 30)
    ///
    /// # Errors
    ///
    /// Returns an error if `GEMINI_API_KEY` is missing or a numeric
    /// variable fails to parse.
    pub fn from_env() -> Result<Self, GeminiConfigError> {
        dotenvy::dotenv().ok();

        let api_key =
            env::var("GEMINI_API_KEY").map_err(|_| GeminiConfigError::MissingApiKey)?;

        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url =
            env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match env::var("GEMINI_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|_| GeminiConfigError::InvalidTimeout(raw))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(GeminiConfig {
            api_key,
            model,
            base_url,
            timeout_secs,
        })
    }
}

/// Gemini configuration errors
#[derive(Debug, thiserror::Error)]
pub enum GeminiConfigError {
    #[error("GEMINI_API_KEY environment variable is required")]
    MissingApiKey,

    #[error("GEMINI_TIMEOUT_SECS is not a valid number: {0}")]
    InvalidTimeout(String),
}

/// HTTP client for the Gemini generateContent API
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Creates a new client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: GeminiConfig) -> GeneratorResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(GeminiClient { http, config })
    }

    /// Endpoint URL for the configured model
    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    /// Posts a single user turn and extracts the generated text
    async fn generate(&self, parts: Vec<Part>) -> GeneratorResult<String> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts,
            }],
            safety_settings: safety_settings(),
            generation_config: GenerationConfig::default(),
        };

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::error!(status = status.as_u16(), "Gemini API returned an error");
            return Err(GeneratorError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        extract_text(parsed)
    }
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate_from_image(
        &self,
        image_base64: &str,
        options: &GenerationOptions,
    ) -> GeneratorResult<String> {
        let payload = prompt::strip_data_url(image_base64);
        if payload.is_empty() {
            return Err(GeneratorError::InvalidInput(
                "image payload is empty".to_string(),
            ));
        }

        let parts = vec![
            Part::text(prompt::image_prompt(options)),
            Part::inline_data(IMAGE_MIME_TYPE, payload),
        ];

        tracing::debug!(
            content_type = %options.content_type,
            "Sending image generation request to Gemini"
        );
        self.generate(parts).await
    }

    async fn generate_from_text(
        &self,
        user_prompt: &str,
        options: &GenerationOptions,
    ) -> GeneratorResult<String> {
        let parts = vec![Part::text(prompt::text_prompt(user_prompt, options))];

        tracing::debug!(
            content_type = %options.content_type,
            "Sending text generation request to Gemini"
        );
        self.generate(parts).await
    }
}

/// Builds the four standard safety settings
fn safety_settings() -> Vec<SafetySetting> {
    const CATEGORIES: [&str; 4] = [
        "HARM_CATEGORY_HARASSMENT",
        "HARM_CATEGORY_HATE_SPEECH",
        "HARM_CATEGORY_SEXUALLY_EXPLICIT",
        "HARM_CATEGORY_DANGEROUS_CONTENT",
    ];

    CATEGORIES
        .iter()
        .map(|category| SafetySetting {
            category,
            threshold: "BLOCK_MEDIUM_AND_ABOVE",
        })
        .collect()
}

/// Joins the text parts of the first candidate
fn extract_text(response: GenerateContentResponse) -> GeneratorResult<String> {
    let text: String = response
        .candidates
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(GeneratorError::EmptyResponse);
    }
    Ok(text)
}

// ---- wire types ----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    safety_settings: Vec<SafetySetting>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,

    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: String) -> Self {
        Part {
            text: Some(text),
            inline_data: None,
        }
    }

    fn inline_data(mime_type: &str, data: &str) -> Self {
        Part {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.to_string(),
                data: data.to_string(),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 1024,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}
