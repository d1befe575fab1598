//! flowname - Git Flow branch name generator
//!
//! This library turns a task description, a Git Flow branch type and an
//! optional work item id into a branch name such as `feature/jira-123-dark-mode`,
//! using an OpenRouter-hosted model for the wording and a deterministic
//! normalizer for the final shape. It also provides the HTTP server and form
//! that expose the generator.

pub mod ai;
pub mod cli;
pub mod core;
pub mod error;
pub mod server;

pub use error::{FlownameError, Result};
