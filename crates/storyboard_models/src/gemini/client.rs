//! Google Gemini API implementation.
//!
//! This module provides a thin client for the Google Gemini API. Each call to
//! [`StoryboardDriver::generate`] issues exactly one outbound request; the
//! scene formatter owns all retry policy, so a transient provider failure
//! here surfaces as an error rather than being retried internally.

use std::env;

use async_trait::async_trait;
use tracing::{debug, instrument};

use gemini_rust::{Gemini, client::Model};

use storyboard_core::{GenerateRequest, GenerateResponse};
use storyboard_error::{GeminiError, GeminiErrorKind, StoryboardResult};
use storyboard_interface::StoryboardDriver;

use super::GeminiResult;

/// Default model, matching the production configuration.
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Client for the Google Gemini API.
///
/// The API key is read from the `GEMINI_API_KEY` environment variable at
/// construction but checked per request, so a server can start without a
/// credential and surface the failure on the requests that need one - with
/// no network cost.
///
/// # Examples
///
/// ```no_run
/// use storyboard_models::GeminiClient;
/// use storyboard_core::GenerateRequest;
/// use storyboard_interface::StoryboardDriver;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GeminiClient::new();
///
/// let request = GenerateRequest::builder()
///     .prompt("Break this script into scenes.")
///     .build()?;
/// let response = client.generate(&request).await?;
/// # Ok(())
/// # }
/// ```
pub struct GeminiClient {
    /// API key for creating model clients, when configured
    api_key: Option<String>,
    /// Default model name when the request does not specify one
    model_name: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model_name", &self.model_name)
            .field("has_credential", &self.api_key.is_some())
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a new Gemini client with the default model.
    #[instrument(name = "gemini_client_new")]
    pub fn new() -> Self {
        Self::with_default_model(DEFAULT_MODEL)
    }

    /// Create a new Gemini client with a specific default model.
    #[instrument(name = "gemini_client_with_default_model")]
    pub fn with_default_model(model_name: &str) -> Self {
        Self {
            api_key: env::var("GEMINI_API_KEY").ok(),
            model_name: model_name.to_string(),
        }
    }

    /// Whether a `GEMINI_API_KEY` credential is configured.
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Convert a model name string to a gemini-rust Model enum variant.
    ///
    /// Maps common model name strings to their corresponding Model enum
    /// variants. Uses Model::Custom for unrecognized model names,
    /// automatically adding the "models/" prefix required by the Gemini API.
    fn model_name_to_enum(name: &str) -> Model {
        match name {
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-flash-lite" => Model::Gemini25FlashLite,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            other => {
                if other.starts_with("models/") {
                    Model::Custom(other.to_string())
                } else {
                    Model::Custom(format!("models/{}", other))
                }
            }
        }
    }

    /// Internal generate method that returns Gemini-specific errors.
    async fn generate_internal(&self, req: &GenerateRequest) -> GeminiResult<GenerateResponse> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| GeminiError::new(GeminiErrorKind::MissingApiKey))?;

        let model_name = req.model.as_deref().unwrap_or(&self.model_name);
        let model_enum = Self::model_name_to_enum(model_name);

        let client = Gemini::with_model(api_key, model_enum)
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))?;

        let mut builder = client.generate_content().with_user_message(&req.prompt);

        if let Some(temperature) = req.temperature {
            builder = builder.with_temperature(temperature);
        }

        if let Some(max_tokens) = req.max_output_tokens {
            builder = builder.with_max_output_tokens(max_tokens as i32);
        }

        // Structured output: bias generation toward the scene map shape.
        // Compliance is not guaranteed; callers validate independently.
        if let Some(schema) = &req.response_schema {
            builder = builder
                .with_response_mime_type("application/json")
                .with_response_schema(schema.clone());
        }

        debug!(model = model_name, prompt_len = req.prompt.len(), "Sending Gemini request");

        let response = builder.execute().await.map_err(Self::parse_gemini_error)?;

        let text = response.text();

        debug!(response_len = text.len(), "Received Gemini response");

        Ok(GenerateResponse { text })
    }

    /// Parse gemini-rust errors to extract HTTP status codes.
    ///
    /// Converts generic API error strings into structured GeminiError
    /// with HTTP status codes when available.
    fn parse_gemini_error(err: impl std::fmt::Display) -> GeminiError {
        let err_msg = err.to_string();

        // Example: "bad response from server; code 503; description: ..."
        if let Some(status_code) = Self::extract_status_code(&err_msg) {
            GeminiError::new(GeminiErrorKind::HttpError {
                status_code,
                message: err_msg,
            })
        } else {
            GeminiError::new(GeminiErrorKind::ApiRequest(err_msg))
        }
    }

    /// Extract HTTP status code from error message string.
    fn extract_status_code(error_msg: &str) -> Option<u16> {
        if let Some(code_start) = error_msg.find("code ") {
            let code_str = &error_msg[code_start + 5..];
            if let Some(end) = code_str.find(|c: char| !c.is_numeric()) {
                return code_str[..end].parse().ok();
            }
        }
        None
    }
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoryboardDriver for GeminiClient {
    async fn generate(&self, req: &GenerateRequest) -> StoryboardResult<GenerateResponse> {
        self.generate_internal(req).await.map_err(Into::into)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_status_code_from_error_message() {
        let msg = "bad response from server; code 503; description: overloaded";
        assert_eq!(GeminiClient::extract_status_code(msg), Some(503));
    }

    #[test]
    fn missing_status_code_yields_none() {
        assert_eq!(GeminiClient::extract_status_code("connection refused"), None);
    }

    #[test]
    fn custom_model_names_get_prefixed() {
        match GeminiClient::model_name_to_enum("gemini-2.0-flash") {
            Model::Custom(name) => assert_eq!(name, "models/gemini-2.0-flash"),
            other => panic!("expected Custom variant, got {:?}", other),
        }
    }
}
