//! Validated script input.

use serde::{Deserialize, Serialize};
use storyboard_error::InputError;

/// Script text validated to be non-empty.
///
/// The formatter core assumes its input is never empty or whitespace-only;
/// this newtype enforces that invariant at the boundary so the retry
/// protocol never spends a provider call on a blank script.
///
/// # Examples
///
/// ```
/// use storyboard_core::ScriptText;
///
/// let script = ScriptText::new("The sun rose over the mountains.").unwrap();
/// assert!(script.as_str().starts_with("The sun"));
///
/// assert!(ScriptText::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{}", _0)]
pub struct ScriptText(String);

impl ScriptText {
    /// Validate and wrap raw script text.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] when the text is empty or whitespace-only.
    pub fn new(raw: impl Into<String>) -> Result<Self, InputError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(InputError::new("Script cannot be empty"));
        }
        Ok(Self(raw))
    }

    /// Borrow the script text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ScriptText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
