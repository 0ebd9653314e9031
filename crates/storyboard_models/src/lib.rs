//! Completion provider implementations for the Storyboard scene formatter.
//!
//! Currently provides a single driver for the Google Gemini API.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;

pub use gemini::GeminiClient;
