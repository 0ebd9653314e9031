//! The retry orchestrator.
//!
//! Sequences prompt builder, completion driver, and validator across a
//! bounded number of attempts, escalating the prompt after an observed
//! shortfall. Each call owns its own [`RetryState`]; concurrent calls share
//! nothing.

use storyboard_core::{GenerateRequest, MAX_SCENES, MIN_SCENES, ScriptText};
use storyboard_error::{
    GeminiErrorKind, SceneError, SceneErrorKind, StoryboardError, StoryboardErrorKind,
    StoryboardResult,
};
use storyboard_interface::StoryboardDriver;
use tracing::{info, instrument, warn};

use crate::{AttemptResult, build_prompt, response_schema, validate};

/// Generation parameters for the formatter.
///
/// Defaults match the production configuration: temperature 0.3, 8192
/// output tokens, and a budget of 3 attempts.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatOptions {
    /// Model identifier (driver default when None)
    pub model: Option<String>,
    /// Sampling temperature
    pub temperature: f32,
    /// Output token cap, sized for a full 30-scene map
    pub max_output_tokens: u32,
    /// Maximum completion requests per format call
    pub max_attempts: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            model: None,
            temperature: 0.3,
            max_output_tokens: 8192,
            max_attempts: 3,
        }
    }
}

/// Explicit retry-loop state, threaded through the attempt loop.
///
/// Modeling the attempt counter and escalation context as a value keeps the
/// bounded-retry and escalation logic testable without a driver.
///
/// # Examples
///
/// ```
/// use storyboard_scenes::RetryState;
///
/// let state = RetryState::new(3);
/// assert_eq!(state.attempt(), 1);
/// assert!(!state.is_final());
///
/// let state = state.advance(Some(10));
/// assert_eq!(state.attempt(), 2);
/// assert_eq!(state.escalation(), Some(10));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryState {
    attempt: usize,
    max_attempts: usize,
    escalation: Option<usize>,
}

impl RetryState {
    /// State for the first attempt.
    pub fn new(max_attempts: usize) -> Self {
        Self {
            attempt: 1,
            max_attempts,
            escalation: None,
        }
    }

    /// Current attempt number, starting at 1.
    pub fn attempt(&self) -> usize {
        self.attempt
    }

    /// True when no further attempts remain after this one.
    pub fn is_final(&self) -> bool {
        self.attempt >= self.max_attempts
    }

    /// Scene count observed in the previous shortfall, if any.
    ///
    /// A provider failure advances without an escalation context: no scene
    /// count was observed, so there is no deficiency to restate.
    pub fn escalation(&self) -> Option<usize> {
        self.escalation
    }

    /// Transition to the next attempt.
    pub fn advance(self, escalation: Option<usize>) -> Self {
        Self {
            attempt: self.attempt + 1,
            max_attempts: self.max_attempts,
            escalation,
        }
    }
}

/// Orchestrates scene decomposition with a bounded, escalating retry loop.
///
/// # Examples
///
/// ```no_run
/// use storyboard_core::ScriptText;
/// use storyboard_models::GeminiClient;
/// use storyboard_scenes::SceneFormatter;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let formatter = SceneFormatter::new(GeminiClient::new());
/// let script = ScriptText::new("The sun rose over the mountains.")?;
/// let formatted = formatter.format_script(&script).await?;
/// # Ok(())
/// # }
/// ```
pub struct SceneFormatter<D> {
    driver: D,
    options: FormatOptions,
}

impl<D: StoryboardDriver> SceneFormatter<D> {
    /// Create a formatter with default options.
    pub fn new(driver: D) -> Self {
        Self::with_options(driver, FormatOptions::default())
    }

    /// Create a formatter with explicit options.
    pub fn with_options(driver: D, options: FormatOptions) -> Self {
        Self { driver, options }
    }

    /// Get a reference to the underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Decompose a script into the scene-map wire text.
    ///
    /// Issues at most `max_attempts` completion requests. Returns the raw
    /// (trimmed) JSON text of the first structurally compliant response, or
    /// the final attempt's under-count text when every attempt falls short
    /// of the scene floor - an under-populated map degrades output quality
    /// but a paid completion is never discarded.
    ///
    /// # Errors
    ///
    /// - A missing `GEMINI_API_KEY` credential fails on the first attempt
    ///   without retrying; a retry cannot produce one.
    /// - Provider failure on the final attempt propagates as-is.
    /// - A response that does not parse as a JSON object fails immediately
    ///   with [`SceneErrorKind::MalformedResponse`]; a parse failure means
    ///   the integration is broken, so no retry is attempted.
    #[instrument(skip(self, script), fields(provider = self.driver.provider_name(), script_len = script.as_str().len()))]
    pub async fn format_script(&self, script: &ScriptText) -> StoryboardResult<String> {
        let schema = response_schema();
        let mut state = RetryState::new(self.options.max_attempts);

        loop {
            let prompt = build_prompt(script, state.escalation());

            let request = GenerateRequest::builder()
                .prompt(prompt)
                .model(self.options.model.clone().unwrap_or_else(|| {
                    self.driver.model_name().to_string()
                }))
                .temperature(self.options.temperature)
                .max_output_tokens(self.options.max_output_tokens)
                .response_schema(schema.clone())
                .build()
                .map_err(|e| {
                    storyboard_error::ConfigError::new(format!("Failed to build request: {}", e))
                })?;

            let response = match self.driver.generate(&request).await {
                Ok(response) => response,
                Err(e) if is_missing_credential(&e) => {
                    // A retry cannot produce a credential; fail without
                    // consuming the remaining budget.
                    warn!(attempt = state.attempt(), "Gemini credential missing, aborting");
                    return Err(e);
                }
                Err(e) if state.is_final() => {
                    warn!(attempt = state.attempt(), error = %e, "Provider call failed on final attempt");
                    return Err(e);
                }
                Err(e) => {
                    // Consumes an attempt but carries no escalation context:
                    // no scene count was observed.
                    warn!(attempt = state.attempt(), error = %e, "Provider call failed, retrying");
                    state = state.advance(None);
                    continue;
                }
            };

            match validate(&response.text) {
                AttemptResult::Malformed { raw } => {
                    warn!(
                        attempt = state.attempt(),
                        response_preview = preview(&raw),
                        "Response is not valid JSON"
                    );
                    return Err(SceneError::new(SceneErrorKind::MalformedResponse(
                        preview(&raw).to_string(),
                    ))
                    .into());
                }
                AttemptResult::Ok { text, count } => {
                    if count > MAX_SCENES {
                        warn!(
                            attempt = state.attempt(),
                            scene_count = count,
                            "More than {} scenes generated, returning without truncation",
                            MAX_SCENES
                        );
                    } else {
                        info!(attempt = state.attempt(), scene_count = count, "Scene map complete");
                    }
                    return Ok(text);
                }
                AttemptResult::Shortfall { text, count } => {
                    if state.is_final() {
                        warn!(
                            attempts = state.attempt(),
                            scene_count = count,
                            "Scene floor not met after all attempts, returning best effort"
                        );
                        return Ok(text);
                    }
                    warn!(
                        attempt = state.attempt(),
                        scene_count = count,
                        minimum = MIN_SCENES,
                        "Scene shortfall, retrying with escalated prompt"
                    );
                    state = state.advance(Some(count));
                }
            }
        }
    }
}

/// True when the failure is an absent `GEMINI_API_KEY` credential.
fn is_missing_credential(err: &StoryboardError) -> bool {
    matches!(
        err.kind(),
        StoryboardErrorKind::Gemini(e) if e.kind == GeminiErrorKind::MissingApiKey
    )
}

/// Bounded snippet of a response for logs and error details.
fn preview(raw: &str) -> &str {
    let end = raw
        .char_indices()
        .nth(200)
        .map_or(raw.len(), |(index, _)| index);
    &raw[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_state_starts_unescalated() {
        let state = RetryState::new(3);
        assert_eq!(state.attempt(), 1);
        assert_eq!(state.escalation(), None);
        assert!(!state.is_final());
    }

    #[test]
    fn retry_state_reaches_final_attempt() {
        let state = RetryState::new(3).advance(Some(8)).advance(Some(12));
        assert_eq!(state.attempt(), 3);
        assert!(state.is_final());
        assert_eq!(state.escalation(), Some(12));
    }

    #[test]
    fn provider_failure_clears_escalation() {
        let state = RetryState::new(3).advance(Some(8)).advance(None);
        assert_eq!(state.escalation(), None);
    }

    #[test]
    fn single_attempt_budget_is_immediately_final() {
        assert!(RetryState::new(1).is_final());
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let text = "日".repeat(300);
        let snippet = preview(&text);
        assert_eq!(snippet.chars().count(), 200);
    }
}
