//! Trait definitions for completion providers.

use async_trait::async_trait;
use storyboard_core::{GenerateRequest, GenerateResponse};
use storyboard_error::StoryboardResult;

/// Core trait that all completion providers must implement.
///
/// One call to [`generate`](StoryboardDriver::generate) performs exactly one
/// outbound request. Providers must not retry internally; all retry policy
/// lives in the scene formatter so the attempt budget is observable in one
/// place.
#[async_trait]
pub trait StoryboardDriver: Send + Sync {
    /// Generate model output for a single request.
    async fn generate(&self, req: &GenerateRequest) -> StoryboardResult<GenerateResponse>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Default model identifier (e.g., "gemini-2.5-flash").
    fn model_name(&self) -> &str;
}
