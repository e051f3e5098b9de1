/// Mock generator for testing and demos
///
/// This generator returns deterministic copy without touching the network.
/// It's useful for:
/// - Integration-testing the API surface without a Gemini key
/// - Exercising cache behavior (the call counter shows whether a request
///   reached the backend)
/// - Simulating backend failures
///
/// # Example
///
/// ```
/// use snaptosell_gemini::mock::MockGenerator;
/// use snaptosell_gemini::generator::ContentGenerator;
/// use snaptosell_shared::models::options::{ContentType, GenerationOptions, Tone};
///
/// # async fn example() {
/// let generator = MockGenerator::with_response("A fine desk organizer.");
///
/// let options = GenerationOptions {
///     content_type: ContentType::Website,
///     platform: None,
///     tone: Tone::Professional,
///     max_length: None,
///     include_keywords: vec![],
/// };
///
/// let copy = generator.generate_from_text("prompt", &options).await.unwrap();
/// assert_eq!(copy, "A fine desk organizer.");
/// assert_eq!(generator.calls(), 1);
/// # }
/// ```
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use snaptosell_shared::models::options::GenerationOptions;

use crate::generator::{ContentGenerator, GeneratorError, GeneratorResult};

/// Deterministic generator with a call counter
pub struct MockGenerator {
    response: String,
    should_fail: bool,
    calls: AtomicUsize,
}

impl MockGenerator {
    /// Creates a mock that echoes a default canned response
    pub fn new() -> Self {
        Self::with_response("Mock generated marketing copy.")
    }

    /// Creates a mock that returns the given copy on every call
    pub fn with_response(response: impl Into<String>) -> Self {
        MockGenerator {
            response: response.into(),
            should_fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Creates a mock whose every call fails
    pub fn failing() -> Self {
        MockGenerator {
            response: String::new(),
            should_fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of generation calls that reached this backend
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn respond(&self) -> GeneratorResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.should_fail {
            return Err(GeneratorError::Api {
                status: 500,
                body: "mock backend failure".to_string(),
            });
        }
        Ok(self.response.clone())
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentGenerator for MockGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate_from_image(
        &self,
        image_base64: &str,
        _options: &GenerationOptions,
    ) -> GeneratorResult<String> {
        if image_base64.is_empty() {
            return Err(GeneratorError::InvalidInput(
                "image payload is empty".to_string(),
            ));
        }
        self.respond()
    }

    async fn generate_from_text(
        &self,
        prompt: &str,
        _options: &GenerationOptions,
    ) -> GeneratorResult<String> {
        if prompt.is_empty() {
            return Err(GeneratorError::InvalidInput("prompt is empty".to_string()));
        }
        self.respond()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snaptosell_shared::models::options::{ContentType, Tone};

    fn options() -> GenerationOptions {
        GenerationOptions {
            content_type: ContentType::Website,
            platform: None,
            tone: Tone::Professional,
            max_length: None,
            include_keywords: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_mock_returns_configured_response() {
        let generator = MockGenerator::with_response("canned");

        let copy = generator
            .generate_from_text("prompt", &options())
            .await
            .unwrap();
        assert_eq!(copy, "canned");
    }

    #[tokio::test]
    async fn test_mock_counts_calls() {
        let generator = MockGenerator::new();

        generator
            .generate_from_text("one", &options())
            .await
            .unwrap();
        generator
            .generate_from_image("QUJD", &options())
            .await
            .unwrap();

        assert_eq!(generator.calls(), 2);
    }

    #[tokio::test]
    async fn test_failing_mock() {
        let generator = MockGenerator::failing();

        let err = generator
            .generate_from_text("prompt", &options())
            .await
            .unwrap_err();
        assert!(matches!(err, GeneratorError::Api { status: 500, .. }));
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_inputs_rejected() {
        let generator = MockGenerator::new();

        assert!(matches!(
            generator.generate_from_text("", &options()).await,
            Err(GeneratorError::InvalidInput(_))
        ));
        assert!(matches!(
            generator.generate_from_image("", &options()).await,
            Err(GeneratorError::InvalidInput(_))
        ));
        assert_eq!(generator.calls(), 0);
    }
}
