//! Global style records, one per section.
//!
//! Known keys are typed; anything else the editor or assistant sets is kept
//! in `extra` so nothing is lost on a round trip. Missing keys fall back to
//! the starter values.

use serde::{Deserialize, Serialize};

use super::StyleMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavbarStyles {
    pub background_color: String,
    pub padding: String,
    pub font_family: String,
    pub color: String,
    #[serde(flatten)]
    pub extra: StyleMap,
}

impl Default for NavbarStyles {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".to_owned(),
            padding: "1rem".to_owned(),
            font_family: "Arial".to_owned(),
            color: "#000000".to_owned(),
            extra: StyleMap::new(),
        }
    }
}

/// Where hero content sits relative to the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeroLayout {
    #[default]
    LeftContent,
    RightContent,
    CenterContent,
    FullWidth,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroStyles {
    pub background_color: String,
    pub background_image: String,
    pub background_size: String,
    pub background_width: String,
    pub background_position: String,
    pub background_repeat: String,
    pub background_overlay: String,
    pub overlay_opacity: String,
    pub height: String,
    pub padding: String,
    pub font_family: String,
    pub color: String,
    pub layout: HeroLayout,
    #[serde(flatten)]
    pub extra: StyleMap,
}

impl Default for HeroStyles {
    fn default() -> Self {
        Self {
            background_color: "#1a1a1a".to_owned(),
            background_image: String::new(),
            background_size: "cover".to_owned(),
            background_width: "100%".to_owned(),
            background_position: "center".to_owned(),
            background_repeat: "no-repeat".to_owned(),
            background_overlay: "#000000".to_owned(),
            overlay_opacity: "0.5".to_owned(),
            height: "500px".to_owned(),
            padding: "2rem".to_owned(),
            font_family: "Helvetica".to_owned(),
            color: "#ffffff".to_owned(),
            layout: HeroLayout::LeftContent,
            extra: StyleMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundType {
    Color,
    Image,
    Gradient,
}

/// Heading rendered above the collection grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionTitle {
    pub text: String,
    pub color: String,
    pub font_size: String,
    pub font_weight: String,
    pub text_align: String,
    pub margin: String,
    pub font_family: String,
}

impl Default for SectionTitle {
    fn default() -> Self {
        Self {
            text: "Shop By Category".to_owned(),
            color: "#000000".to_owned(),
            font_size: "32px".to_owned(),
            font_weight: "600".to_owned(),
            text_align: "center".to_owned(),
            margin: "0 0 48px 0".to_owned(),
            font_family: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollectionStyles {
    pub background_color: String,
    pub padding: String,
    pub gap: String,
    pub max_width: String,
    pub layout: String,
    pub grid_columns: u32,
    pub aspect_ratio: String,
    pub container_padding: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_type: Option<BackgroundType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient_direction: Option<String>,
    pub section_title: SectionTitle,
    #[serde(flatten)]
    pub extra: StyleMap,
}

impl CollectionStyles {
    /// Optional background keys that may be introduced even when absent.
    pub const BACKGROUND_KEYS: [&'static str; 7] = [
        "backgroundType",
        "backgroundImage",
        "backgroundSize",
        "backgroundPosition",
        "gradientStart",
        "gradientEnd",
        "gradientDirection",
    ];
}

impl Default for CollectionStyles {
    fn default() -> Self {
        Self {
            background_color: "#FFFFFF".to_owned(),
            padding: "80px 0".to_owned(),
            gap: "24px".to_owned(),
            max_width: "1200px".to_owned(),
            layout: "grid".to_owned(),
            grid_columns: 3,
            aspect_ratio: "1/1".to_owned(),
            container_padding: "0 24px".to_owned(),
            background_type: None,
            background_image: None,
            background_size: None,
            background_position: None,
            gradient_start: None,
            gradient_end: None,
            gradient_direction: None,
            section_title: SectionTitle::default(),
            extra: StyleMap::new(),
        }
    }
}
