//! Starter content for a freshly created store.

use serde_json::Value;

use super::{
    BackgroundType, CollectionConfig, CollectionItem, CollectionItemKind, CollectionStyles,
    HeroConfig, HeroItem, HeroItemKind, HeroStyles, NavItem, NavItemKind, NavbarConfig,
    NavbarStyles, Position, StyleMap, WebsiteConfig,
};

fn styles(pairs: &[(&str, &str)]) -> StyleMap {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_owned(), Value::from(*value)))
        .collect()
}

impl NavbarConfig {
    /// Logo on the left, a single "Home" link in the nav strip.
    #[must_use]
    pub fn starter() -> Self {
        let logo = NavItem {
            id: "logo".to_owned(),
            kind: NavItemKind::Image,
            label: "Logo".to_owned(),
            link: String::new(),
            position: Position::Left,
            styles: styles(&[
                ("width", "40px"),
                ("height", "40px"),
                ("borderRadius", "0px"),
                ("backgroundColor", "transparent"),
                ("objectFit", "contain"),
                ("alignSelf", "center"),
            ]),
            image_url: Some("/logo.svg".to_owned()),
        };
        let mut home = NavItem::new_link("1", Position::Nav);
        home.label = "Home".to_owned();

        Self {
            items: vec![logo, home],
            styles: NavbarStyles::default(),
        }
    }
}

impl HeroConfig {
    /// Badge, heading, subheading and a call-to-action button.
    #[must_use]
    pub fn starter() -> Self {
        let item = |kind: HeroItemKind, content: &str, pairs: &[(&str, &str)]| HeroItem {
            id: format!("{}1", kind.as_str()),
            kind,
            content: content.to_owned(),
            link: None,
            position: Position::Left,
            styles: styles(pairs),
            image_url: None,
            animation: None,
        };

        let mut button = item(
            HeroItemKind::Button,
            "Shop Now",
            &[
                ("color", "#ffffff"),
                ("fontSize", "16px"),
                ("fontWeight", "600"),
                ("backgroundColor", "#ff4500"),
                ("padding", "0.75rem 2rem"),
                ("borderRadius", "4px"),
            ],
        );
        button.link = Some("/shop".to_owned());

        Self {
            items: vec![
                item(
                    HeroItemKind::Heading,
                    "Summer Collection",
                    &[
                        ("color", "#ffffff"),
                        ("fontSize", "48px"),
                        ("fontWeight", "700"),
                        ("margin", "0 0 1rem 0"),
                    ],
                ),
                item(
                    HeroItemKind::Subheading,
                    "Discover the latest trends and styles",
                    &[
                        ("color", "#ffffff"),
                        ("fontSize", "24px"),
                        ("fontWeight", "400"),
                        ("margin", "0 0 2rem 0"),
                    ],
                ),
                button,
                item(
                    HeroItemKind::Badge,
                    "New Arrivals",
                    &[
                        ("color", "#ffffff"),
                        ("fontSize", "14px"),
                        ("backgroundColor", "#ff4500"),
                        ("borderRadius", "20px"),
                    ],
                ),
            ],
            styles: HeroStyles::default(),
        }
    }
}

impl CollectionConfig {
    /// Three category tiles on a white-to-black gradient.
    #[must_use]
    pub fn starter() -> Self {
        let tile = |n: usize, title: &str, image: &str, link: &str| CollectionItem {
            id: format!("col{n}"),
            kind: CollectionItemKind::Collection,
            title: title.to_owned(),
            image_url: image.to_owned(),
            link: link.to_owned(),
            position: Position::Left,
            styles: styles(&[
                ("color", "#FFFFFF"),
                ("fontSize", "24px"),
                ("fontWeight", "600"),
                ("textAlign", "center"),
                ("objectFit", "cover"),
                ("height", "400px"),
                ("borderRadius", "8px"),
            ]),
        };

        Self {
            items: vec![
                tile(1, "EDITOR'S PICK", "/dress.jpg", "/collections/editors-pick"),
                tile(2, "SHOES", "/shoes.jpg", "/collections/shoes"),
                tile(3, "ACCESSORIES", "/accessories.jpg", "/collections/accessories"),
            ],
            styles: CollectionStyles {
                background_type: Some(BackgroundType::Gradient),
                gradient_start: Some("#FFFFFF".to_owned()),
                gradient_end: Some("#000000".to_owned()),
                gradient_direction: Some("to right".to_owned()),
                ..CollectionStyles::default()
            },
        }
    }
}

impl WebsiteConfig {
    /// All three sections with starter content.
    #[must_use]
    pub fn starter() -> Self {
        Self {
            navbar_config: Some(NavbarConfig::starter()),
            hero_config: Some(HeroConfig::starter()),
            collection_config: Some(CollectionConfig::starter()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_config_is_valid() {
        assert!(WebsiteConfig::starter().validate().is_ok());
    }

    #[test]
    fn test_starter_hero_ids_follow_kind() {
        let hero = HeroConfig::starter();
        let ids: Vec<&str> = hero.item_ids().collect();
        assert_eq!(ids, ["heading1", "subheading1", "button1", "badge1"]);
    }
}
