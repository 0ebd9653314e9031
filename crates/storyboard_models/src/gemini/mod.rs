//! Google Gemini API support.

mod client;

pub use client::GeminiClient;

/// Result type for Gemini-specific operations.
pub type GeminiResult<T> = std::result::Result<T, storyboard_error::GeminiError>;
