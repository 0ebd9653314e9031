//! Request and response types for completion drivers.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single-shot generation request.
///
/// Carries the fully built prompt plus generation parameters and an optional
/// structured-output schema forwarded to the provider. The schema is a hint
/// to bias generation toward compliance; callers validate the response
/// independently.
///
/// # Examples
///
/// ```
/// use storyboard_core::GenerateRequest;
///
/// let request = GenerateRequest::builder()
///     .prompt("Break this script into scenes.")
///     .temperature(0.3_f32)
///     .max_output_tokens(8192_u32)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.temperature, Some(0.3));
/// assert!(request.response_schema.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, Builder)]
#[builder(setter(into, strip_option), default)]
pub struct GenerateRequest {
    /// The instruction text sent to the model
    pub prompt: String,
    /// Model identifier to use (driver default when None)
    pub model: Option<String>,
    /// Sampling temperature (0.0 to 1.0)
    pub temperature: Option<f32>,
    /// Maximum number of tokens to generate
    pub max_output_tokens: Option<u32>,
    /// JSON schema constraining the response shape
    pub response_schema: Option<Value>,
}

impl GenerateRequest {
    /// Start building a request.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// The raw text returned by a completion driver.
///
/// # Examples
///
/// ```
/// use storyboard_core::GenerateResponse;
///
/// let response = GenerateResponse {
///     text: "{\"scene_1\":\"The sun rose\"}".to_string(),
/// };
/// assert!(response.text.contains("scene_1"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The generated text from the model
    pub text: String,
}
