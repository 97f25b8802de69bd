//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Password signup/signin and identity-provider linking
//! - `stores` - Website projects owned by a user
//! - `website` - Loading and saving `WebsiteConfig` documents
//! - `media` - Uploaded files on disk plus their metadata
//! - `assistant` - AI edits of a section from a natural-language instruction

pub mod assistant;
pub mod auth;
pub mod media;
pub mod stores;
pub mod website;
