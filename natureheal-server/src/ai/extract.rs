//! Pull a JSON object out of free-form model output.
//!
//! The span taken is from the first `{` to the last `}` in the text. This is
//! not bracket balancing: two separate objects in one reply produce an
//! unparseable span and the caller falls back.

use serde_json::{Map, Value};
use thiserror::Error;

pub type JsonObject = Map<String, Value>;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("model output contains no JSON object")]
    NoObject,

    #[error("model output is not valid JSON: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// The substring that [`extract_json`] will attempt to parse, if any.
pub fn object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

pub fn extract_json(text: &str) -> Result<JsonObject, ParseError> {
    let span = object_span(text).ok_or(ParseError::NoObject)?;
    Ok(serde_json::from_str(span)?)
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_object_wrapped_in_prose() {
        let text = "Here is your plan:\n```json\n{\"title\": \"Calm\", \"tips\": [\"sleep\"]}\n```\nEnjoy!";
        let obj = extract_json(text).unwrap();
        assert_eq!(obj["title"], json!("Calm"));
        assert_eq!(obj["tips"], json!(["sleep"]));
    }

    #[test]
    fn nested_objects_survive() {
        let obj = extract_json(r#"{"meals": {"breakfast": ["oats"]}}"#).unwrap();
        assert_eq!(obj["meals"]["breakfast"][0], json!("oats"));
    }

    #[test]
    fn two_objects_span_greedily_and_fail() {
        let text = "noise {\"a\":1} noise {\"b\":2} tail";
        assert_eq!(object_span(text), Some("{\"a\":1} noise {\"b\":2}"));
        assert!(matches!(extract_json(text), Err(ParseError::Invalid(_))));
    }

    #[test]
    fn no_brace_is_no_object() {
        assert!(matches!(
            extract_json("I cannot help with that."),
            Err(ParseError::NoObject)
        ));
        assert!(matches!(extract_json("} backwards {"), Err(ParseError::NoObject)));
    }

    #[test]
    fn top_level_array_is_rejected() {
        assert!(extract_json("[1, 2]").is_err());
    }
}
