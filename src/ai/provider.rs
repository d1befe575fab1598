//! Completion provider seam
//!
//! The generator only needs "prompt in, text out"; keeping that behind a trait
//! lets the HTTP layer run against OpenRouter in production and a mock in tests.

use async_trait::async_trait;

use crate::error::Result;

/// A hosted chat-completion service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send a single user prompt and return the first completion's text
    async fn complete(&self, prompt: &str) -> Result<String>;
}
