//! Core data types for the Storyboard scene formatter.
//!
//! This crate provides the foundation data types used across the workspace:
//! validated script input, the ordered scene list with its wire codec, and
//! the generation request/response types exchanged with completion drivers.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod request;
mod scene;
mod script;
mod telemetry;

pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse};
pub use scene::{MAX_SCENES, MIN_SCENES, SceneList};
pub use script::ScriptText;
pub use telemetry::init_telemetry;
