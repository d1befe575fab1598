//! OpenRouter credential lookup
//!
//! The API key is read once from the process environment at startup and then
//! handed to the completion client as an explicit value.
//!
//! ## Environment Variables
//!
//! - `OPENROUTER_API_KEY` - OpenRouter API key
//! - `VITE_OPENROUTER_API_KEY` - legacy name, used when the first is unset
//!
//! Empty values count as unset.

use secrecy::{ExposeSecret, SecretString};

// Environment variable names
const OPENROUTER_API_KEY_ENV: &str = "OPENROUTER_API_KEY";
const LEGACY_API_KEY_ENV: &str = "VITE_OPENROUTER_API_KEY";

/// Credential lookup for the completion provider
pub struct CredentialStore;

impl CredentialStore {
    /// Retrieve the OpenRouter API key from the environment
    pub fn get_openrouter_key() -> Option<SecretString> {
        Self::get_openrouter_key_from(|key| std::env::var(key).ok())
    }

    /// Retrieve the OpenRouter API key using a custom variable lookup
    ///
    /// Priority: `OPENROUTER_API_KEY` > `VITE_OPENROUTER_API_KEY`
    pub fn get_openrouter_key_from<F>(lookup: F) -> Option<SecretString>
    where
        F: Fn(&str) -> Option<String>,
    {
        [OPENROUTER_API_KEY_ENV, LEGACY_API_KEY_ENV]
            .into_iter()
            .filter_map(|name| lookup(name))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
            .map(SecretString::from)
    }

    /// Get a masked version of a token for display (shows first 4 and last 4 chars)
    pub fn mask_token(token: &SecretString) -> String {
        let exposed: Vec<char> = token.expose_secret().chars().collect();
        if exposed.len() <= 8 {
            "*".repeat(exposed.len())
        } else {
            let head: String = exposed[..4].iter().collect();
            let tail: String = exposed[exposed.len() - 4..].iter().collect();
            format!("{}...{}", head, tail)
        }
    }
}
