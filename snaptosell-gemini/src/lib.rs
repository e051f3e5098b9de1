//! # SnapToSell Generation Engine
//!
//! This crate provides the content-generation backends for SnapToSell:
//! the [`generator::ContentGenerator`] trait the API server programs
//! against, the Gemini REST client, and a deterministic mock for tests.
//!
//! ## Modules
//!
//! - `generator`: the `ContentGenerator` trait and error types
//! - `client`: reqwest-backed Gemini `generateContent` client
//! - `mock`: deterministic generator for tests and demos
//!
//! ## Example
//!
//! ```no_run
//! use snaptosell_gemini::{client::{GeminiClient, GeminiConfig}, generator::ContentGenerator};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new(GeminiConfig::from_env()?)?;
//! println!("Generator: {}", client.name());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod generator;
pub mod mock;

// Re-export main types
pub use client::{GeminiClient, GeminiConfig};
pub use generator::{ContentGenerator, GeneratorError, GeneratorResult};
pub use mock::MockGenerator;
