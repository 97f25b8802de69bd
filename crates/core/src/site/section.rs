//! Section configurations and the website aggregate.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::editor::EditorError;
use super::{
    CollectionItem, CollectionStyles, HeroItem, HeroStyles, NavItem, NavbarStyles, SectionItem,
};

/// An ordered item list plus the section's global styles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionConfig<I, S> {
    pub items: Vec<I>,
    #[serde(default)]
    pub styles: S,
}

pub type NavbarConfig = SectionConfig<NavItem, NavbarStyles>;
pub type HeroConfig = SectionConfig<HeroItem, HeroStyles>;
pub type CollectionConfig = SectionConfig<CollectionItem, CollectionStyles>;

/// The three editable page regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Navbar,
    Hero,
    Collection,
}

impl Section {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Navbar => "navbar",
            Self::Hero => "hero",
            Self::Collection => "collection",
        }
    }

    /// Key under which the section lives in a [`WebsiteConfig`].
    #[must_use]
    pub const fn config_key(self) -> &'static str {
        match self {
            Self::Navbar => "navbarConfig",
            Self::Hero => "heroConfig",
            Self::Collection => "collectionConfig",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the builder persists for one store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebsiteConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navbar_config: Option<NavbarConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_config: Option<HeroConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_config: Option<CollectionConfig>,
}

impl WebsiteConfig {
    /// The section being edited: the last one present in page order.
    #[must_use]
    pub const fn active_section(&self) -> Option<Section> {
        if self.collection_config.is_some() {
            Some(Section::Collection)
        } else if self.hero_config.is_some() {
            Some(Section::Hero)
        } else if self.navbar_config.is_some() {
            Some(Section::Navbar)
        } else {
            None
        }
    }

    /// Overlay the sections present in `update`; absent ones keep their value.
    #[must_use]
    pub fn merged_with(self, update: Self) -> Self {
        Self {
            navbar_config: update.navbar_config.or(self.navbar_config),
            hero_config: update.hero_config.or(self.hero_config),
            collection_config: update.collection_config.or(self.collection_config),
        }
    }

    /// Check item ids and slots in every present section.
    ///
    /// # Errors
    ///
    /// Returns the first [`EditorError`] found.
    pub fn validate(&self) -> Result<(), EditorError> {
        if let Some(navbar) = &self.navbar_config {
            navbar.validate()?;
        }
        if let Some(hero) = &self.hero_config {
            hero.validate()?;
        }
        if let Some(collection) = &self.collection_config {
            collection.validate()?;
        }
        Ok(())
    }
}

impl<I: SectionItem, S> SectionConfig<I, S> {
    /// Ids of all items, in list order.
    pub fn item_ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(SectionItem::id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_active_section_prefers_last() {
        let mut config = WebsiteConfig::default();
        assert_eq!(config.active_section(), None);

        config.navbar_config = Some(WebsiteConfig::starter().navbar_config.unwrap());
        assert_eq!(config.active_section(), Some(Section::Navbar));

        config.collection_config = Some(WebsiteConfig::starter().collection_config.unwrap());
        assert_eq!(config.active_section(), Some(Section::Collection));
    }

    #[test]
    fn test_merged_with_keeps_absent_sections() {
        let saved = WebsiteConfig::starter();
        let mut hero = saved.hero_config.clone().unwrap();
        hero.styles.height = "640px".to_owned();

        let update = WebsiteConfig {
            hero_config: Some(hero),
            ..WebsiteConfig::default()
        };
        let merged = saved.clone().merged_with(update);

        assert_eq!(merged.navbar_config, saved.navbar_config);
        assert_eq!(merged.hero_config.unwrap().styles.height, "640px");
    }

    #[test]
    fn test_round_trip_is_lossless() {
        let mut config = WebsiteConfig::starter();
        if let Some(navbar) = config.navbar_config.as_mut() {
            navbar
                .styles
                .extra
                .insert("boxShadow".to_owned(), "0 2px 4px #000".into());
        }

        let json = serde_json::to_string(&config).unwrap();
        let back: WebsiteConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_config_keys() {
        assert_eq!(Section::Hero.config_key(), "heroConfig");
        assert_eq!(Section::Collection.to_string(), "collection");
    }
}
