//! Provider-side response schema for the scene map.

use serde_json::{Map, Value, json};
use storyboard_core::{MAX_SCENES, MIN_SCENES};

/// Build the JSON schema describing the expected response shape.
///
/// An object with string properties `scene_1` through `scene_30`, the first
/// 25 marked required. This is a hint to bias generation toward compliance;
/// it is not itself a validator - the formatter independently validates the
/// returned text because provider-side schema compliance is not guaranteed.
///
/// # Examples
///
/// ```
/// use storyboard_scenes::response_schema;
///
/// let schema = response_schema();
/// assert_eq!(schema["type"], "object");
/// assert_eq!(schema["required"].as_array().unwrap().len(), 25);
/// ```
pub fn response_schema() -> Value {
    let mut properties = Map::with_capacity(MAX_SCENES);
    let mut required = Vec::with_capacity(MIN_SCENES);

    for i in 1..=MAX_SCENES {
        properties.insert(format!("scene_{}", i), json!({ "type": "string" }));
        if i <= MIN_SCENES {
            required.push(Value::String(format!("scene_{}", i)));
        }
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declares_all_scene_properties() {
        let schema = response_schema();
        let properties = schema["properties"].as_object().unwrap();
        assert_eq!(properties.len(), MAX_SCENES);
        assert_eq!(properties["scene_1"]["type"], "string");
        assert_eq!(properties["scene_30"]["type"], "string");
    }

    #[test]
    fn requires_exactly_the_scene_floor() {
        let schema = response_schema();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), MIN_SCENES);
        assert_eq!(required[0], "scene_1");
        assert_eq!(required[MIN_SCENES - 1], "scene_25");
    }
}
