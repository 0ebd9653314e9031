//! Error types for the Storyboard scene formatter.
//!
//! This crate provides the foundation error types used throughout the Storyboard workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use storyboard_error::{StoryboardResult, InputError};
//!
//! fn check_script(script: &str) -> StoryboardResult<()> {
//!     if script.trim().is_empty() {
//!         Err(InputError::new("Script cannot be empty"))?
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_script("   ").is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod gemini;
mod input;
mod json;
mod scene;
mod server;

pub use config::ConfigError;
pub use error::{StoryboardError, StoryboardErrorKind, StoryboardResult};
pub use gemini::{GeminiError, GeminiErrorKind};
pub use input::InputError;
pub use json::JsonError;
pub use scene::{SceneError, SceneErrorKind};
pub use server::{ServerError, ServerErrorKind};
