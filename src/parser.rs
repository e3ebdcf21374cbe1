//! Extraction of candidate hashtags from generated text.
//!
//! The backend wraps whatever the model produced in a string, so the text is
//! parsed a second time here. Every shape mismatch is an expected
//! [`HashtagError::MalformedModelOutput`], never a panic.

use serde_json::Value;

use crate::error::{HashtagError, Result};

/// Parse `raw` as `{"hashtags": [...]}` and return the string items in order.
///
/// A `null` array counts as empty. Any non-string item rejects the document.
pub fn parse_candidates(raw: &str) -> Result<Vec<String>> {
    let document: Value = serde_json::from_str(raw.trim()).map_err(|e| {
        HashtagError::MalformedModelOutput(format!("model output is not valid JSON: {e}"))
    })?;

    let Some(object) = document.as_object() else {
        return Err(HashtagError::MalformedModelOutput(
            "model output is not a JSON object".to_string(),
        ));
    };

    let items = match object.get("hashtags") {
        Some(Value::Array(items)) => items,
        Some(Value::Null) => return Ok(Vec::new()),
        Some(_) => {
            return Err(HashtagError::MalformedModelOutput(
                "field 'hashtags' is not an array".to_string(),
            ))
        },
        None => {
            return Err(HashtagError::MalformedModelOutput(
                "field 'hashtags' is missing".to_string(),
            ))
        },
    };

    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                HashtagError::MalformedModelOutput(format!(
                    "hashtag item is not a string: {item}"
                ))
            })
        })
        .collect()
}
