/// Domain models for SnapToSell
///
/// This module contains the data structures shared by the API server and
/// the generation engine.
///
/// # Models
///
/// - `options`: content-generation options and platform constraints
/// - `generated`: saved generation records and their in-memory store
///
/// # Example
///
/// ```
/// use snaptosell_shared::models::options::{ContentType, GenerationOptions, Tone};
///
/// let options = GenerationOptions {
///     content_type: ContentType::Social,
///     platform: None,
///     tone: Tone::Casual,
///     max_length: Some(500),
///     include_keywords: vec!["summer".to_string()],
/// };
///
/// assert_eq!(options.effective_max_length(), Some(500));
/// ```
pub mod generated;
pub mod options;
