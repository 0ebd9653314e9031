//! Scene decomposition engine for the Storyboard formatter.
//!
//! This crate holds the scene-count-guaranteeing request/retry protocol:
//! the prompt builder, the provider-side response schema, the structural
//! validator, and the retry orchestrator that ties them together around a
//! [`StoryboardDriver`](storyboard_interface::StoryboardDriver).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod formatter;
mod prompt;
mod schema;
mod validate;

pub use formatter::{FormatOptions, RetryState, SceneFormatter};
pub use prompt::build_prompt;
pub use schema::response_schema;
pub use validate::{AttemptResult, validate};
