//! Top-level error wrapper types.

use crate::{ConfigError, GeminiError, InputError, JsonError, SceneError, ServerError};

/// This is the foundation error enum aggregating every concern in the
/// workspace.
///
/// # Examples
///
/// ```
/// use storyboard_error::{StoryboardError, InputError};
///
/// let input_err = InputError::new("Script cannot be empty");
/// let err: StoryboardError = input_err.into();
/// assert!(format!("{}", err).contains("Input Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StoryboardErrorKind {
    /// Input validation error
    #[from(InputError)]
    Input(InputError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Gemini provider error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// Scene formatting error
    #[from(SceneError)]
    Scene(SceneError),
    /// HTTP server error
    #[from(ServerError)]
    Server(ServerError),
}

/// Storyboard error with kind discrimination.
///
/// # Examples
///
/// ```
/// use storyboard_error::{StoryboardResult, ConfigError};
///
/// fn might_fail() -> StoryboardResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Storyboard Error: {}", _0)]
pub struct StoryboardError(Box<StoryboardErrorKind>);

impl StoryboardError {
    /// Create a new error from a kind.
    pub fn new(kind: StoryboardErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StoryboardErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to StoryboardErrorKind
impl<T> From<T> for StoryboardError
where
    T: Into<StoryboardErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Storyboard operations.
///
/// # Examples
///
/// ```
/// use storyboard_error::{StoryboardResult, JsonError};
///
/// fn parse_payload() -> StoryboardResult<String> {
///     Err(JsonError::new("expected value"))?
/// }
/// ```
pub type StoryboardResult<T> = std::result::Result<T, StoryboardError>;
