//! Prompt rendering.

use askama::Template;
use serde::Serialize;
use serde_json::Value;

use webify_core::site::{
    CollectionConfig, HeroConfig, NavbarConfig, Section, SectionItem, StyleMap, WebsiteConfig,
};

use super::ReconcileError;
use super::normalize::display;

/// One item as the model sees it in the structure summary.
struct ItemSummary {
    kind: String,
    label: String,
    id: String,
    details: Vec<(&'static str, String)>,
    position: String,
    styles: Vec<(String, String)>,
}

impl ItemSummary {
    fn new<I: SectionItem>(item: &I, kind: &str, label: &str, styles: &StyleMap) -> Self {
        Self {
            kind: kind.to_owned(),
            label: if label.is_empty() { "N/A".to_owned() } else { label.to_owned() },
            id: item.id().to_owned(),
            details: Vec::new(),
            position: item.position().to_string(),
            styles: style_lines(styles),
        }
    }

    fn detail(mut self, key: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.details.push((key, value.to_owned()));
        }
        self
    }
}

#[derive(Template)]
#[template(path = "assistant/section_prompt.txt")]
struct SectionPrompt<'a> {
    section: Section,
    config_key: &'static str,
    items: Vec<ItemSummary>,
    global_styles: Vec<(String, String)>,
    current_json: String,
    instruction: &'a str,
    is_collection: bool,
}

#[derive(Template)]
#[template(path = "assistant/hero_content_prompt.txt")]
struct HeroContentPrompt<'a> {
    store_name: &'a str,
    store_description: &'a str,
}

/// Render the edit prompt for the active section.
pub fn section_prompt(
    section: Section,
    instruction: &str,
    config: &WebsiteConfig,
) -> Result<String, ReconcileError> {
    let missing = || ReconcileError::Shape(format!("{section} section is missing"));

    let (items, global_styles, current_json) = match section {
        Section::Navbar => {
            let navbar = config.navbar_config.as_ref().ok_or_else(missing)?;
            (navbar_items(navbar), style_lines_of(&navbar.styles)?, pretty(navbar)?)
        }
        Section::Hero => {
            let hero = config.hero_config.as_ref().ok_or_else(missing)?;
            (hero_items(hero), style_lines_of(&hero.styles)?, pretty(hero)?)
        }
        Section::Collection => {
            let collection = config.collection_config.as_ref().ok_or_else(missing)?;
            (
                collection_items(collection),
                style_lines_of(&collection.styles)?,
                pretty(collection)?,
            )
        }
    };

    let prompt = SectionPrompt {
        section,
        config_key: section.config_key(),
        items,
        global_styles,
        current_json,
        instruction,
        is_collection: section == Section::Collection,
    };

    Ok(prompt.render()?)
}

/// Render the hero copy prompt for a new store.
pub fn hero_content_prompt(
    store_name: &str,
    store_description: &str,
) -> Result<String, askama::Error> {
    HeroContentPrompt {
        store_name,
        store_description,
    }
    .render()
}

fn navbar_items(config: &NavbarConfig) -> Vec<ItemSummary> {
    config
        .items
        .iter()
        .map(|item| {
            let kind = serde_kind(&item.kind);
            ItemSummary::new(item, &kind, &item.label, &item.styles)
                .detail("Link", Some(&item.link).filter(|l| !l.is_empty()).map(String::as_str))
                .detail("Image URL", item.image_url.as_deref())
        })
        .collect()
}

fn hero_items(config: &HeroConfig) -> Vec<ItemSummary> {
    config
        .items
        .iter()
        .map(|item| {
            ItemSummary::new(item, item.kind.as_str(), &item.content, &item.styles)
                .detail("Link", item.link.as_deref())
                .detail("Image URL", item.image_url.as_deref())
        })
        .collect()
}

fn collection_items(config: &CollectionConfig) -> Vec<ItemSummary> {
    config
        .items
        .iter()
        .map(|item| {
            ItemSummary::new(item, "collection", &item.title, &item.styles)
                .detail("Link", Some(item.link.as_str()))
                .detail("Image URL", Some(item.image_url.as_str()))
        })
        .collect()
}

fn style_lines(styles: &StyleMap) -> Vec<(String, String)> {
    styles
        .iter()
        .map(|(key, value)| (key.clone(), display(Some(value))))
        .collect()
}

fn style_lines_of<S: Serialize>(styles: &S) -> Result<Vec<(String, String)>, ReconcileError> {
    match serde_json::to_value(styles)? {
        Value::Object(map) => Ok(style_lines(&map)),
        _ => Err(ReconcileError::Shape("styles are not an object".to_owned())),
    }
}

fn pretty<T: Serialize>(value: &T) -> Result<String, ReconcileError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Wire name of a serde unit enum (`link`, `image`, ...).
fn serde_kind<T: Serialize>(kind: &T) -> String {
    match serde_json::to_value(kind) {
        Ok(Value::String(s)) => s,
        _ => String::new(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn starter(section: Section) -> WebsiteConfig {
        let mut config = WebsiteConfig::default();
        match section {
            Section::Navbar => config.navbar_config = Some(NavbarConfig::starter()),
            Section::Hero => config.hero_config = Some(HeroConfig::starter()),
            Section::Collection => config.collection_config = Some(CollectionConfig::starter()),
        }
        config
    }

    #[test]
    fn test_section_prompt_mentions_instruction_and_key() {
        let prompt =
            section_prompt(Section::Hero, "make the button red", &starter(Section::Hero)).unwrap();
        assert!(prompt.contains("USER REQUEST:\nmake the button red"));
        assert!(prompt.contains("\"heroConfig\": {"));
        assert!(prompt.contains("• button: "));
        assert!(prompt.contains("Position: left"));
        assert!(!prompt.contains("sectionTitle MUST"));
    }

    #[test]
    fn test_collection_prompt_has_section_title_rules() {
        let prompt = section_prompt(
            Section::Collection,
            "rename the title",
            &starter(Section::Collection),
        )
        .unwrap();
        assert!(prompt.contains("sectionTitle MUST"));
        assert!(prompt.contains("\"collectionConfig\": {"));
        assert!(prompt.contains("id: col1"));
    }

    #[test]
    fn test_section_prompt_requires_section() {
        assert!(matches!(
            section_prompt(Section::Navbar, "x", &WebsiteConfig::default()),
            Err(ReconcileError::Shape(_))
        ));
    }

    #[test]
    fn test_hero_content_prompt() {
        let prompt = hero_content_prompt("Orchard Co", "Fresh fruit, delivered").unwrap();
        assert!(prompt.contains("Store Name: Orchard Co"));
        assert!(prompt.contains("Store Description: Fresh fruit, delivered"));
        assert!(prompt.contains("\"ctaLink\""));
    }
}
