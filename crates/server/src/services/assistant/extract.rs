//! Pull a JSON object out of free-form model output.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::ReconcileError;

/// First fenced block, with or without a `json` tag.
static FENCED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json)?\s*([\s\S]*?)```").expect("valid fence regex"));

/// Widest brace-delimited span.
static BRACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[\s\S]*\}").expect("valid brace regex"));

/// Locate the JSON text in a model reply.
///
/// A fenced block wins; otherwise the span from the first `{` to the last
/// `}`. Returns `None` when neither is present.
pub fn extract_json(text: &str) -> Option<&str> {
    if let Some(captures) = FENCED.captures(text)
        && let Some(body) = captures.get(1)
    {
        return Some(body.as_str().trim());
    }

    BRACES.find(text).map(|m| m.as_str())
}

/// Extract and parse the reply as a JSON object.
pub fn parse_object(text: &str) -> Result<Map<String, Value>, ReconcileError> {
    let json = extract_json(text).ok_or(ReconcileError::NoJson)?;

    match serde_json::from_str::<Value>(json)? {
        Value::Object(map) => Ok(map),
        _ => Err(ReconcileError::NotAnObject),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_prefers_fenced_block() {
        let text = "Sure! {not this}\n```json\n{\"message\":\"ok\"}\n```\nDone.";
        assert_eq!(extract_json(text), Some("{\"message\":\"ok\"}"));
    }

    #[test]
    fn test_extract_plain_fence() {
        let text = "```\n{\"a\": 1}\n```";
        assert_eq!(extract_json(text), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_extract_greedy_braces() {
        let text = "Here you go: {\"a\": {\"b\": 2}} hope that helps";
        assert_eq!(extract_json(text), Some("{\"a\": {\"b\": 2}}"));
    }

    #[test]
    fn test_extract_nothing() {
        assert_eq!(extract_json("I can't do that."), None);
    }

    #[test]
    fn test_parse_object_fenced_hero_reply() {
        let text = "```json\n{\"message\":\"ok\",\"heroConfig\":{\"items\":[]}}\n```";
        let map = parse_object(text).unwrap();
        assert_eq!(map["message"], "ok");
        assert!(map["heroConfig"].is_object());
    }

    #[test]
    fn test_parse_object_rejects_non_object() {
        assert!(matches!(
            parse_object("```json\n[1, 2]\n```"),
            Err(ReconcileError::NotAnObject)
        ));
        assert!(matches!(
            parse_object("{broken"),
            Err(ReconcileError::NoJson)
        ));
        assert!(matches!(
            parse_object("{\"a\": }"),
            Err(ReconcileError::Json(_))
        ));
    }
}
