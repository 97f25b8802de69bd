//! Anthropic Messages API client.
//!
//! The assistant only needs one-shot text completions, so the client is
//! non-streaming and exposes them through [`TextCompletion`].

mod client;
mod error;
mod types;

use std::future::Future;

pub use client::ClaudeClient;
pub use error::{ApiError, ApiErrorResponse, ClaudeError};
pub use types::{ChatRequest, ChatResponse, ContentBlock, Message, StopReason, Usage};

/// A model that turns a prompt into text.
pub trait TextCompletion: Send + Sync {
    /// Send `prompt` as a single user turn and return the reply text.
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String, ClaudeError>> + Send;
}
