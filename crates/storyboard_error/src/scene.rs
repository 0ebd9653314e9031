//! Scene formatting error types.

/// Error kinds for scene decomposition.
///
/// A shortfall (structurally valid response with too few scenes) is not an
/// error and has no variant here; it drives an escalated retry inside the
/// formatter and is surfaced only through logs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SceneErrorKind {
    /// Model response was not a parseable JSON object
    #[display("Model response is not valid JSON: {}", _0)]
    MalformedResponse(String),
}

/// Scene formatting error with source location tracking.
///
/// # Examples
///
/// ```
/// use storyboard_error::{SceneError, SceneErrorKind};
///
/// let err = SceneError::new(SceneErrorKind::MalformedResponse("not json".to_string()));
/// assert!(format!("{}", err).contains("not valid JSON"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Scene Error: {} at line {} in {}", kind, line, file)]
pub struct SceneError {
    /// The kind of error that occurred
    pub kind: SceneErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl SceneError {
    /// Create a new SceneError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SceneErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
