//! CSS color name normalization.
//!
//! Color inputs in the editor only accept hex values, so style values that
//! arrive as CSS names (typically from the assistant) are mapped to hex.

use std::borrow::Cow;

/// Named colors the editor understands, lowercase.
const NAMED_COLORS: &[(&str, &str)] = &[
    ("black", "#000000"),
    ("white", "#ffffff"),
    ("red", "#ff0000"),
    ("green", "#00ff00"),
    ("blue", "#0000ff"),
    ("yellow", "#ffff00"),
    ("purple", "#800080"),
    ("orange", "#ffa500"),
    ("gray", "#808080"),
    ("grey", "#808080"),
    ("pink", "#ffc0cb"),
    ("brown", "#a52a2a"),
    ("cyan", "#00ffff"),
    ("magenta", "#ff00ff"),
    ("lime", "#00ff00"),
    ("navy", "#000080"),
    ("teal", "#008080"),
    ("olive", "#808000"),
    ("maroon", "#800000"),
    ("silver", "#c0c0c0"),
    ("gold", "#ffd700"),
];

/// Convert a CSS color name to its hex value.
///
/// Hex values (anything starting with `#`) and unknown names are returned
/// unchanged, so the conversion is idempotent.
///
/// ```
/// use webify_core::color::named_color_to_hex;
///
/// assert_eq!(named_color_to_hex("Navy"), "#000080");
/// assert_eq!(named_color_to_hex("#abcdef"), "#abcdef");
/// assert_eq!(named_color_to_hex("rgba(0,0,0,0.5)"), "rgba(0,0,0,0.5)");
/// ```
#[must_use]
pub fn named_color_to_hex(value: &str) -> Cow<'_, str> {
    if value.starts_with('#') {
        return Cow::Borrowed(value);
    }

    let needle = value.trim();
    NAMED_COLORS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(needle))
        .map_or(Cow::Borrowed(value), |(_, hex)| Cow::Borrowed(*hex))
}

/// Whether a style key holds a color (`color`, `backgroundColor`, `borderColor`, ...).
#[must_use]
pub fn is_color_key(key: &str) -> bool {
    key.to_ascii_lowercase().contains("color")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors_convert() {
        assert_eq!(named_color_to_hex("red"), "#ff0000");
        assert_eq!(named_color_to_hex("GOLD"), "#ffd700");
        assert_eq!(named_color_to_hex(" grey "), "#808080");
    }

    #[test]
    fn test_hex_is_idempotent() {
        for (_, hex) in NAMED_COLORS {
            assert_eq!(named_color_to_hex(hex), *hex);
            let once = named_color_to_hex(hex).into_owned();
            assert_eq!(named_color_to_hex(&once), once);
        }
    }

    #[test]
    fn test_unknown_passes_through() {
        assert_eq!(named_color_to_hex("transparent"), "transparent");
        assert_eq!(named_color_to_hex(""), "");
    }

    #[test]
    fn test_is_color_key() {
        assert!(is_color_key("color"));
        assert!(is_color_key("backgroundColor"));
        assert!(is_color_key("BORDERCOLOR"));
        assert!(!is_color_key("fontSize"));
    }
}
