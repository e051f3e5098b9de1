/// Core ContentGenerator trait and types
///
/// This module defines the contract every generation backend implements.
/// The API server only talks to this trait, which keeps the HTTP surface
/// testable without network access (see [`crate::mock::MockGenerator`]).
///
/// # Generator Contract
///
/// All generators must:
/// 1. Implement the `ContentGenerator` trait (async)
/// 2. Produce copy from either a base64 product image or a text prompt,
///    shaped by [`GenerationOptions`]
/// 3. Map backend failures onto [`GeneratorError`]
///
/// # Example
///
/// ```no_run
/// use snaptosell_gemini::generator::{ContentGenerator, GeneratorResult};
/// use snaptosell_shared::models::options::GenerationOptions;
/// use async_trait::async_trait;
///
/// struct MyGenerator;
///
/// #[async_trait]
/// impl ContentGenerator for MyGenerator {
///     fn name(&self) -> &str {
///         "my_generator"
///     }
///
///     async fn generate_from_image(
///         &self,
///         _image_base64: &str,
///         _options: &GenerationOptions,
///     ) -> GeneratorResult<String> {
///         Ok("generated copy".to_string())
///     }
///
///     async fn generate_from_text(
///         &self,
///         prompt: &str,
///         _options: &GenerationOptions,
///     ) -> GeneratorResult<String> {
///         Ok(format!("copy for: {}", prompt))
///     }
/// }
/// ```
use async_trait::async_trait;
use snaptosell_shared::models::options::GenerationOptions;

/// Generator error types
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// The HTTP request itself failed (network, DNS, TLS)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code
    #[error("Generation API error ({status}): {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw response body for debugging
        body: String,
    },

    /// The backend answered but produced no usable text
    #[error("Generation response contained no content")]
    EmptyResponse,

    /// The request could not be built from the given input
    #[error("Invalid generation input: {0}")]
    InvalidInput(String),
}

/// Generator result type alias
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Core content generation trait
///
/// Mirrors the two entry points of the upstream model integration:
/// image-driven and text-driven generation. Implementations are expected
/// to build their prompts via [`snaptosell_shared::prompt`] so that option
/// handling stays identical across backends.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Returns the generator name
    ///
    /// Used for health reporting and logging.
    fn name(&self) -> &str;

    /// Generates copy from a base64-encoded product image
    ///
    /// The image may carry a `data:image/...` prefix; implementations strip
    /// it before transmission.
    async fn generate_from_image(
        &self,
        image_base64: &str,
        options: &GenerationOptions,
    ) -> GeneratorResult<String>;

    /// Generates copy from a text prompt
    ///
    /// The prompt is the caller's text (possibly enriched by the route,
    /// e.g. with video formatting instructions); option clauses are
    /// appended by the implementation.
    async fn generate_from_text(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> GeneratorResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GeneratorError::Api {
            status: 400,
            body: "bad request".to_string(),
        };
        assert_eq!(err.to_string(), "Generation API error (400): bad request");

        let err = GeneratorError::EmptyResponse;
        assert_eq!(err.to_string(), "Generation response contained no content");

        let err = GeneratorError::InvalidInput("empty image".to_string());
        assert_eq!(err.to_string(), "Invalid generation input: empty image");
    }
}
