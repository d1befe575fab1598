//! Configuration CLI command handlers

use std::path::Path;

use crate::cli::commands::{ConfigCommand, ConfigKey};
use crate::core::config::Config;
use crate::core::credentials::CredentialStore;
use crate::error::Result;

/// Handle configuration commands
pub fn handle_config(command: ConfigCommand, config_path: Option<&Path>) -> Result<()> {
    match command {
        ConfigCommand::Get { key } => handle_get(key, config_path),
        ConfigCommand::Path => handle_path(),
    }
}

/// Handle printing a configuration value
fn handle_get(key: ConfigKey, config_path: Option<&Path>) -> Result<()> {
    if let ConfigKey::ApiKey = key {
        match CredentialStore::get_openrouter_key() {
            Some(key) => println!("OpenRouter API key: {}", CredentialStore::mask_token(&key)),
            None => println!("OpenRouter API key: Not configured"),
        }
        return Ok(());
    }

    let config = Config::resolve(config_path)?;
    println!("{}", display_value(&config, key));
    Ok(())
}

fn handle_path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}

fn display_value(config: &Config, key: ConfigKey) -> String {
    match key {
        ConfigKey::ApiKey => String::new(),
        ConfigKey::Host => config.host.clone(),
        ConfigKey::Port => config.port.to_string(),
        ConfigKey::Workers => config.workers.to_string(),
        ConfigKey::Model => config.model.clone(),
        ConfigKey::Temperature => config.temperature.to_string(),
        ConfigKey::MaxTokens => config.max_tokens.to_string(),
        ConfigKey::ApiBase => config.api_base.clone(),
        ConfigKey::AppTitle => config.app_title.clone(),
        ConfigKey::Referer => config
            .referer
            .clone()
            .unwrap_or_else(|| "(not set)".to_string()),
    }
}
