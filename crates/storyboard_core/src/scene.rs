//! Ordered scene sequences and the `scene_N` wire codec.
//!
//! The wire format is a JSON object keyed `scene_1` through `scene_30`, a
//! legacy of the provider-side response schema. Internally scenes are an
//! ordered sequence; the sparse string-keyed map exists only at the wire
//! boundary. Parsing orders entries by numeric suffix (not insertion order)
//! and serialization re-emits the named keys.

use serde_json::{Map, Value};
use storyboard_error::JsonError;

/// Minimum number of populated scenes in a compliant response.
pub const MIN_SCENES: usize = 25;

/// Soft ceiling on scene count. Responses above it are accepted with a
/// warning rather than truncated.
pub const MAX_SCENES: usize = 30;

/// An ordered list of scene strings parsed from the wire map.
///
/// # Examples
///
/// ```
/// use storyboard_core::SceneList;
///
/// let raw = r#"{"scene_2":"over the mountains","scene_1":"The sun rose"}"#;
/// let scenes = SceneList::from_wire(raw).unwrap();
/// assert_eq!(scenes.len(), 2);
/// assert_eq!(scenes.scenes()[0], "The sun rose");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SceneList(Vec<String>);

impl SceneList {
    /// Parse the wire-format JSON object into an ordered scene list.
    ///
    /// Entries are ordered by the numeric suffix of their `scene_N` key.
    /// Values that are not strings, or are empty after trimming, are
    /// dropped; keys without the `scene_` prefix are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError`] when the text is not parseable as a JSON
    /// object.
    pub fn from_wire(raw: &str) -> Result<Self, JsonError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| JsonError::new(format!("Failed to parse scene map: {}", e)))?;

        let object: &Map<String, Value> = value
            .as_object()
            .ok_or_else(|| JsonError::new("Scene map must be a JSON object"))?;

        let mut indexed: Vec<(usize, String)> = Vec::with_capacity(object.len());
        for (key, value) in object {
            let Some(index) = parse_scene_index(key) else {
                continue;
            };
            let Some(text) = value.as_str() else {
                continue;
            };
            if text.trim().is_empty() {
                continue;
            }
            indexed.push((index, text.to_string()));
        }

        indexed.sort_by_key(|(index, _)| *index);
        Ok(Self(indexed.into_iter().map(|(_, text)| text).collect()))
    }

    /// Number of populated scenes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no scenes are populated.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the ordered scene strings.
    pub fn scenes(&self) -> &[String] {
        &self.0
    }

    /// True when the populated count meets the scene floor.
    pub fn meets_floor(&self) -> bool {
        self.0.len() >= MIN_SCENES
    }

    /// True when the populated count exceeds the soft ceiling.
    pub fn exceeds_ceiling(&self) -> bool {
        self.0.len() > MAX_SCENES
    }

    /// Serialize back to the wire format: `scene_1` through `scene_k` in
    /// order.
    pub fn to_wire(&self) -> Value {
        let mut object = Map::with_capacity(self.0.len());
        for (position, text) in self.0.iter().enumerate() {
            object.insert(format!("scene_{}", position + 1), Value::String(text.clone()));
        }
        Value::Object(object)
    }
}

/// Extract the numeric suffix from a `scene_N` key.
fn parse_scene_index(key: &str) -> Option<usize> {
    key.strip_prefix("scene_")?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_by_numeric_suffix() {
        // scene_10 sorts after scene_2 numerically, not lexically
        let raw = r#"{"scene_10":"tenth","scene_2":"second","scene_1":"first"}"#;
        let scenes = SceneList::from_wire(raw).unwrap();
        assert_eq!(scenes.scenes(), ["first", "second", "tenth"]);
    }

    #[test]
    fn drops_empty_and_non_string_values() {
        let raw = r#"{"scene_1":"a","scene_2":"  ","scene_3":7,"scene_4":"b"}"#;
        let scenes = SceneList::from_wire(raw).unwrap();
        assert_eq!(scenes.len(), 2);
        assert_eq!(scenes.scenes(), ["a", "b"]);
    }

    #[test]
    fn ignores_foreign_keys() {
        let raw = r#"{"scene_1":"a","commentary":"not a scene"}"#;
        let scenes = SceneList::from_wire(raw).unwrap();
        assert_eq!(scenes.len(), 1);
    }

    #[test]
    fn rejects_non_object_json() {
        assert!(SceneList::from_wire("[1, 2, 3]").is_err());
        assert!(SceneList::from_wire("not json").is_err());
    }

    #[test]
    fn wire_round_trip_renumbers_in_order() {
        let raw = r#"{"scene_3":"c","scene_1":"a"}"#;
        let scenes = SceneList::from_wire(raw).unwrap();
        let wire = scenes.to_wire();
        assert_eq!(wire["scene_1"], "a");
        // Gap above the populated prefix is closed on re-serialization
        assert_eq!(wire["scene_2"], "c");
        assert!(wire.get("scene_3").is_none());
    }

    #[test]
    fn floor_and_ceiling_checks() {
        let populated: Vec<String> = (1..=MIN_SCENES)
            .map(|i| format!("\"scene_{}\":\"beat {}\"", i, i))
            .collect();
        let raw = format!("{{{}}}", populated.join(","));
        let scenes = SceneList::from_wire(&raw).unwrap();
        assert!(scenes.meets_floor());
        assert!(!scenes.exceeds_ceiling());
    }
}
