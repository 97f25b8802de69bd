//! Section items.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Position, StyleMap};

/// Common view over the item types so editor operations work on any section.
pub trait SectionItem {
    /// Slots the section renders. Items anywhere else are invisible.
    const SLOTS: &'static [Position];

    fn id(&self) -> &str;
    fn position(&self) -> Position;
    fn set_position(&mut self, position: Position);
    fn styles_mut(&mut self) -> &mut StyleMap;
}

/// Returned when an item `type` tag is not valid for the section.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown item type '{0}'")]
pub struct UnknownItemKind(pub String);

// =============================================================================
// Navbar
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavItemKind {
    Link,
    Image,
    Text,
}

/// A navbar entry: a link, a logo/image, or plain text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NavItemKind,
    pub label: String,
    #[serde(default)]
    pub link: String,
    pub position: Position,
    #[serde(default)]
    pub styles: StyleMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl NavItem {
    /// A new link pointing at `/`.
    #[must_use]
    pub fn new_link(id: impl Into<String>, position: Position) -> Self {
        Self::blank(id.into(), NavItemKind::Link, "New Link", "/", position)
    }

    /// A new image with no source yet.
    #[must_use]
    pub fn new_image(id: impl Into<String>, position: Position) -> Self {
        Self::blank(id.into(), NavItemKind::Image, "New Image", "", position)
    }

    /// A new text label.
    #[must_use]
    pub fn new_text(id: impl Into<String>, position: Position) -> Self {
        Self::blank(id.into(), NavItemKind::Text, "New Text", "", position)
    }

    fn blank(id: String, kind: NavItemKind, label: &str, link: &str, position: Position) -> Self {
        let mut styles = StyleMap::new();
        for (key, value) in [
            ("color", ""),
            ("fontSize", "16px"),
            ("fontFamily", ""),
            ("backgroundColor", "transparent"),
            ("padding", "0.5rem"),
            ("marginTop", "0px"),
        ] {
            styles.insert(key.to_owned(), value.into());
        }

        Self {
            id,
            kind,
            label: label.to_owned(),
            link: link.to_owned(),
            position,
            styles,
            image_url: None,
        }
    }
}

impl SectionItem for NavItem {
    const SLOTS: &'static [Position] = &Position::ALL;

    fn id(&self) -> &str {
        &self.id
    }

    fn position(&self) -> Position {
        self.position
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    fn styles_mut(&mut self) -> &mut StyleMap {
        &mut self.styles
    }
}

// =============================================================================
// Hero
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeroItemKind {
    Heading,
    Subheading,
    Button,
    Image,
    Badge,
    Paragraph,
}

impl HeroItemKind {
    pub const ALL: [Self; 6] = [
        Self::Heading,
        Self::Subheading,
        Self::Button,
        Self::Image,
        Self::Badge,
        Self::Paragraph,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Subheading => "subheading",
            Self::Button => "button",
            Self::Image => "image",
            Self::Badge => "badge",
            Self::Paragraph => "paragraph",
        }
    }
}

impl FromStr for HeroItemKind {
    type Err = UnknownItemKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lower)
            .ok_or_else(|| UnknownItemKind(s.to_owned()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeroAnimation {
    #[default]
    None,
    Fade,
    Slide,
    Bounce,
}

/// A hero banner element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: HeroItemKind,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub position: Position,
    #[serde(default)]
    pub styles: StyleMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<HeroAnimation>,
}

impl SectionItem for HeroItem {
    const SLOTS: &'static [Position] = &Position::ALIGNMENTS;

    fn id(&self) -> &str {
        &self.id
    }

    fn position(&self) -> Position {
        self.position
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    fn styles_mut(&mut self) -> &mut StyleMap {
        &mut self.styles
    }
}

// =============================================================================
// Collection
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionItemKind {
    #[default]
    Collection,
}

/// A product collection tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionItem {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: CollectionItemKind,
    pub title: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub link: String,
    pub position: Position,
    #[serde(default)]
    pub styles: StyleMap,
}

impl SectionItem for CollectionItem {
    const SLOTS: &'static [Position] = &Position::ALIGNMENTS;

    fn id(&self) -> &str {
        &self.id
    }

    fn position(&self) -> Position {
        self.position
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    fn styles_mut(&mut self) -> &mut StyleMap {
        &mut self.styles
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_nav_item_wire_shape() {
        let item = NavItem::new_link("3", Position::Nav);
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["type"], "link");
        assert_eq!(value["label"], "New Link");
        assert_eq!(value["link"], "/");
        assert_eq!(value["position"], "nav");
        assert!(value.get("imageUrl").is_none());
    }

    #[test]
    fn test_new_item_defaults() {
        assert_eq!(NavItem::new_image("2", Position::Left).label, "New Image");
        assert_eq!(NavItem::new_text("2", Position::Left).link, "");
    }

    #[test]
    fn test_hero_item_parses_camel_case() {
        let item: HeroItem = serde_json::from_value(json!({
            "id": "button1",
            "type": "button",
            "content": "Shop Now",
            "link": "/shop",
            "position": "left",
            "styles": {"backgroundColor": "#ff4500"},
            "animation": "fade"
        }))
        .unwrap();
        assert_eq!(item.kind, HeroItemKind::Button);
        assert_eq!(item.link.as_deref(), Some("/shop"));
        assert_eq!(item.animation, Some(HeroAnimation::Fade));
    }

    #[test]
    fn test_hero_item_rejects_unknown_kind() {
        let result = serde_json::from_value::<HeroItem>(json!({
            "id": "x", "type": "carousel", "content": "", "position": "left"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_hero_kind_from_str() {
        assert_eq!("Badge".parse::<HeroItemKind>().unwrap(), HeroItemKind::Badge);
        assert!("banner".parse::<HeroItemKind>().is_err());
    }

    #[test]
    fn test_collection_item_type_defaults() {
        let item: CollectionItem = serde_json::from_value(json!({
            "id": "col1", "title": "SHOES", "position": "left"
        }))
        .unwrap();
        assert_eq!(item.kind, CollectionItemKind::Collection);
        assert_eq!(serde_json::to_value(&item).unwrap()["type"], "collection");
    }
}
