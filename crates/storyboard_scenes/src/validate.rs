//! Structural validation of model responses.
//!
//! Validation is purely structural: parse, count, classify. Wording
//! fidelity and ordering quality are modeling concerns and are not checked
//! here.

use storyboard_core::{MIN_SCENES, SceneList};
use tracing::debug;

/// Classified outcome of one completion attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptResult {
    /// Structurally valid response meeting the scene floor.
    Ok {
        /// The trimmed response text
        text: String,
        /// Number of populated scenes
        count: usize,
    },
    /// Structurally valid response below the scene floor.
    Shortfall {
        /// The trimmed response text
        text: String,
        /// Number of populated scenes
        count: usize,
    },
    /// Response text that does not parse as a JSON object.
    Malformed {
        /// The raw response text
        raw: String,
    },
}

/// Parse and classify a raw model response.
///
/// Counts values that are non-empty strings after trimming. Counts in
/// `25..` classify as [`AttemptResult::Ok`]; the ceiling is soft and
/// over-count handling (warn, no truncation) belongs to the formatter.
///
/// # Examples
///
/// ```
/// use storyboard_scenes::{AttemptResult, validate};
///
/// match validate("not json") {
///     AttemptResult::Malformed { raw } => assert_eq!(raw, "not json"),
///     other => panic!("expected malformed, got {:?}", other),
/// }
/// ```
pub fn validate(raw: &str) -> AttemptResult {
    let trimmed = raw.trim();

    let scenes = match SceneList::from_wire(trimmed) {
        Ok(scenes) => scenes,
        Err(e) => {
            debug!(error = %e, response_len = raw.len(), "Response failed structural parse");
            return AttemptResult::Malformed {
                raw: raw.to_string(),
            };
        }
    };

    let count = scenes.len();
    if count < MIN_SCENES {
        AttemptResult::Shortfall {
            text: trimmed.to_string(),
            count,
        }
    } else {
        AttemptResult::Ok {
            text: trimmed.to_string(),
            count,
        }
    }
}
