//! Webify API server library.
//!
//! JSON API behind the no-code website builder: accounts and sessions,
//! per-store website configs, media uploads and the Claude-backed editing
//! assistant. Exposed as a library so the CLI and integration tests can
//! reuse it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod claude;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
