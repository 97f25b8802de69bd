//! Field-name and value normalization for model replies.
//!
//! Models drift between `items`/`Items`, kebab and camel case, and CSS color
//! names. Everything here maps that drift onto the keys and values the site
//! model actually uses.

use serde_json::{Map, Value};

use webify_core::color::{is_color_key, named_color_to_hex};
use webify_core::site::Position;

/// First non-null value under any of `keys`.
pub fn field<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find(|value| !value.is_null())
}

/// Like [`field`], but only non-empty strings.
pub fn text_field<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| obj.get(*key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
}

/// Like [`field`], but only objects.
pub fn object_field<'a>(
    obj: &'a Map<String, Value>,
    keys: &[&str],
) -> Option<&'a Map<String, Value>> {
    keys.iter().find_map(|key| obj.get(*key).and_then(Value::as_object))
}

/// Look up a key exactly, then case-insensitively.
pub fn key_insensitive<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).or_else(|| {
        obj.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    })
}

/// Item list under `items` or `Items`.
pub fn items(obj: &Map<String, Value>) -> Option<&[Value]> {
    field(obj, &["items", "Items"])
        .and_then(Value::as_array)
        .map(Vec::as_slice)
}

/// Parse a reply position (`position` or `Position`), if valid.
pub fn position(obj: &Map<String, Value>) -> Option<Position> {
    text_field(obj, &["position", "Position"]).and_then(|s| s.parse().ok())
}

/// Canonical style key: alias table first, then kebab to camel case.
pub fn style_key(key: &str) -> String {
    match key.to_ascii_lowercase().as_str() {
        "backgroundcolor" | "background-color" | "background" => "backgroundColor".to_owned(),
        "fontfamily" | "font-family" => "fontFamily".to_owned(),
        "boxshadow" | "box-shadow" => "boxShadow".to_owned(),
        _ => kebab_to_camel(key),
    }
}

/// `margin-top` -> `marginTop`. Keys without dashes pass through.
pub fn kebab_to_camel(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper = false;
    for ch in key.chars() {
        if ch == '-' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Map CSS color names to hex for color keys; other values pass through.
pub fn style_value(key: &str, value: &Value) -> Value {
    match value {
        Value::String(s) if is_color_key(key) => Value::String(named_color_to_hex(s).into_owned()),
        other => other.clone(),
    }
}

/// Fit `value` to the JSON type of `current` where the two disagree.
///
/// Numbers and booleans become strings for string fields; numeric strings
/// become numbers for numeric fields. Returns `None` when a string can't
/// be read as the number the field needs.
pub fn coerce_like(current: Option<&Value>, value: Value) -> Option<Value> {
    match (current, value) {
        (Some(Value::String(_)), Value::Number(n)) => Some(Value::String(n.to_string())),
        (Some(Value::String(_)), Value::Bool(b)) => Some(Value::String(b.to_string())),
        (Some(Value::Number(_)), Value::String(s)) => parse_number(&s),
        (_, value) => Some(value),
    }
}

/// Read a number out of a loosely formatted string (`"3"`, `" 4 "`, `"2.5"`).
pub fn parse_number(s: &str) -> Option<Value> {
    let s = s.trim();
    if let Ok(n) = s.parse::<i64>() {
        return Some(Value::from(n));
    }
    s.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
}

/// Render a value for a changelog line.
pub fn display(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "unset".to_owned(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_style_key_aliases() {
        assert_eq!(style_key("backgroundcolor"), "backgroundColor");
        assert_eq!(style_key("background-color"), "backgroundColor");
        assert_eq!(style_key("Background"), "backgroundColor");
        assert_eq!(style_key("font-family"), "fontFamily");
        assert_eq!(style_key("box-shadow"), "boxShadow");
        assert_eq!(style_key("border-radius"), "borderRadius");
        assert_eq!(style_key("fontSize"), "fontSize");
    }

    #[test]
    fn test_style_value_converts_color_names_only_for_color_keys() {
        assert_eq!(style_value("backgroundColor", &json!("Navy")), json!("#000080"));
        assert_eq!(style_value("color", &json!("#123456")), json!("#123456"));
        assert_eq!(style_value("fontFamily", &json!("red")), json!("red"));
        assert_eq!(style_value("color", &json!(3)), json!(3));
    }

    #[test]
    fn test_field_skips_nulls_and_falls_back() {
        let map = obj(json!({"items": null, "Items": [1]}));
        assert_eq!(items(&map).unwrap().len(), 1);
        assert!(field(&map, &["missing"]).is_none());
    }

    #[test]
    fn test_key_insensitive() {
        let map = obj(json!({"HeroConfig": {}}));
        assert!(key_insensitive(&map, "heroConfig").is_some());
        assert!(key_insensitive(&map, "navbarConfig").is_none());
    }

    #[test]
    fn test_position_parsing() {
        assert_eq!(position(&obj(json!({"Position": "Right"}))), Some(Position::Right));
        assert_eq!(position(&obj(json!({"position": "middle"}))), None);
    }

    #[test]
    fn test_coerce_like() {
        assert_eq!(coerce_like(Some(&json!("1rem")), json!(4)), Some(json!("4")));
        assert_eq!(coerce_like(Some(&json!(3)), json!("4")), Some(json!(4)));
        assert_eq!(coerce_like(Some(&json!(3)), json!("four")), None);
        assert_eq!(coerce_like(None, json!("x")), Some(json!("x")));
    }

    #[test]
    fn test_display() {
        assert_eq!(display(None), "unset");
        assert_eq!(display(Some(&json!("red"))), "red");
        assert_eq!(display(Some(&json!(3))), "3");
    }
}
