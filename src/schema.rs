//! Structured-output constraint handed to the backend.
//!
//! The schema only biases generation. The backend is not trusted to honor it,
//! so every candidate is validated again in [`crate::sanitizer`].

use serde_json::{json, Value};

/// Hashtag grammar: one `#` followed by Unicode letters, digits or underscore.
pub const HASHTAG_PATTERN: &str = r"^#[\p{L}\p{N}_]+$";

/// Build a JSON Schema for `{"hashtags": [...]}` with exactly `count` unique items.
pub fn build_schema(count: usize) -> Value {
    json!({
        "type": "object",
        "properties": {
            "hashtags": {
                "type": "array",
                "minItems": count,
                "maxItems": count,
                "uniqueItems": true,
                "items": {
                    "type": "string",
                    "pattern": HASHTAG_PATTERN
                }
            }
        },
        "required": ["hashtags"],
        "additionalProperties": false
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_shape() {
        let schema = build_schema(7);
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["additionalProperties"], false);
        assert_eq!(schema["required"], json!(["hashtags"]));
        assert_eq!(schema["properties"].as_object().unwrap().len(), 1);

        let tags = &schema["properties"]["hashtags"];
        assert_eq!(tags["type"], "array");
        assert_eq!(tags["minItems"], 7);
        assert_eq!(tags["maxItems"], 7);
        assert_eq!(tags["uniqueItems"], true);
        assert_eq!(tags["items"]["type"], "string");
        assert_eq!(tags["items"]["pattern"], HASHTAG_PATTERN);
    }
}
