//! AI integration module
//!
//! This module provides OpenRouter integration for generating branch names:
//! - Prompt construction
//! - The chat-completion client
//! - Parsing and normalizing the model's answer

pub mod normalize;
pub mod openrouter;
pub mod prompts;
pub mod provider;

pub use openrouter::OpenRouterClient;
pub use provider::CompletionProvider;
