//! HTTP boundary for the Storyboard scene formatter.
//!
//! Exposes the formatter over a small axum API for the browser client:
//! script in, scene-map JSON out. Configuration layers bundled defaults
//! under user files and `STORYBOARD_*` environment variables.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod routes;

pub use config::ServerConfig;
pub use routes::{ApiError, AppState, ErrorBody, FormatRequest, FormatResponse, router};
