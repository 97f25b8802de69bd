//! Website section model.
//!
//! A website is made of up to three sections (navbar, hero, collection). Each
//! section is an ordered list of styled, positioned items plus a global style
//! record. The JSON shape (camelCase keys, `type` tags) is the one the editor
//! and the assistant exchange, and it round-trips losslessly.

mod defaults;
mod editor;
mod item;
mod position;
mod section;
mod styles;

pub use editor::EditorError;
pub use item::{
    CollectionItem, CollectionItemKind, HeroAnimation, HeroItem, HeroItemKind, NavItem,
    NavItemKind, SectionItem, UnknownItemKind,
};
pub use position::{InvalidPosition, Position};
pub use section::{
    CollectionConfig, HeroConfig, NavbarConfig, Section, SectionConfig, WebsiteConfig,
};
pub use styles::{
    BackgroundType, CollectionStyles, HeroLayout, HeroStyles, NavbarStyles, SectionTitle,
};

/// Open-ended style record (`{"color": "#fff", "fontSize": "16px", ...}`).
pub type StyleMap = serde_json::Map<String, serde_json::Value>;
