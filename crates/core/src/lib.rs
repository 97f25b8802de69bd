//! Webify Core - Shared types library.
//!
//! This crate provides the types used across all Webify components:
//! - `server` - JSON API for the website builder
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no I/O, no
//! database access, no HTTP clients. The site model and editor operations
//! live here so they can be exercised without a running server.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and emails
//! - [`site`] - Section configurations, items, styles and editor operations
//! - [`color`] - CSS color name normalization

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod color;
pub mod site;
pub mod types;

pub use types::*;
