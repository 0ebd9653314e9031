//! Trait definitions for the Storyboard scene formatter.
//!
//! This crate defines the seam between the retry orchestrator and concrete
//! completion providers.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::StoryboardDriver;
