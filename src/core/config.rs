//! Application configuration management
//!
//! Handles loading server and model settings. Values come from, in order of
//! increasing priority: built-in defaults, the TOML config file, `FLOWNAME_*`
//! environment variables, and command-line flags.

use std::fs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{FlownameError, Result};

/// Default OpenRouter model
pub const DEFAULT_MODEL: &str = "anthropic/claude-3.5-sonnet";

/// OpenRouter API base URL
pub const DEFAULT_API_BASE: &str = "https://openrouter.ai/api/v1";

// Environment variable names
const HOST_ENV: &str = "FLOWNAME_HOST";
const PORT_ENV: &str = "FLOWNAME_PORT";
const WORKERS_ENV: &str = "FLOWNAME_WORKERS";
const MODEL_ENV: &str = "FLOWNAME_MODEL";
const API_BASE_ENV: &str = "FLOWNAME_API_BASE";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Address the HTTP server binds to
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of actix worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// OpenRouter model identifier
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Upper bound on completion tokens
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Base URL of the chat-completions API
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Sent as `X-Title` so requests show up under this name on OpenRouter
    #[serde(default = "default_app_title")]
    pub app_title: String,

    /// Sent as `HTTP-Referer` when set
    #[serde(default)]
    pub referer: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_workers() -> usize {
    2
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    300
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_app_title() -> String {
    "Git Branch Name Generator".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_base: default_api_base(),
            app_title: default_app_title(),
            referer: None,
        }
    }
}

impl Config {
    /// Load configuration from the default file, or defaults if it does not exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load from `explicit` (or the default location) and apply environment overrides
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Load configuration from an explicit file, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            FlownameError::Config(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Apply `FLOWNAME_*` overrides from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides using a custom variable lookup
    ///
    /// Empty values are ignored.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get(HOST_ENV) {
            self.host = host;
        }
        if let Some(port) = get(PORT_ENV) {
            self.port = port.trim().parse().map_err(|_| {
                FlownameError::Config(format!("{} must be a port number, got '{}'", PORT_ENV, port))
            })?;
        }
        if let Some(workers) = get(WORKERS_ENV) {
            self.workers = workers.trim().parse().map_err(|_| {
                FlownameError::Config(format!(
                    "{} must be a positive number, got '{}'",
                    WORKERS_ENV, workers
                ))
            })?;
        }
        if let Some(model) = get(MODEL_ENV) {
            self.model = model;
        }
        if let Some(api_base) = get(API_BASE_ENV) {
            self.api_base = api_base;
        }

        Ok(())
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api_base).map_err(|e| {
            FlownameError::Config(format!("Invalid api_base '{}': {}", self.api_base, e))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(FlownameError::Config(format!(
                "api_base must be an http(s) URL, got '{}'",
                self.api_base
            )));
        }
        if self.port == 0 {
            return Err(FlownameError::Config("port must not be 0".into()));
        }
        if self.workers == 0 {
            return Err(FlownameError::Config("workers must be at least 1".into()));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(FlownameError::Config(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }
        if self.max_tokens == 0 {
            return Err(FlownameError::Config("max_tokens must be at least 1".into()));
        }
        if self.model.trim().is_empty() {
            return Err(FlownameError::Config("model must not be empty".into()));
        }
        Ok(())
    }

    /// Full URL of the chat-completions endpoint
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }

    /// Whether `api_base` points at this machine
    pub fn api_base_is_loopback(&self) -> bool {
        let Ok(url) = Url::parse(&self.api_base) else {
            return false;
        };
        match url.host_str() {
            Some("localhost") => true,
            Some(host) => host
                .trim_start_matches('[')
                .trim_end_matches(']')
                .parse::<IpAddr>()
                .map(|ip| ip.is_loopback())
                .unwrap_or(false),
            None => false,
        }
    }

    /// `host:port` for the HTTP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("com", "flowname", "flowname")
            .ok_or_else(|| FlownameError::Config("Could not determine config directory".into()))?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.model, "anthropic/claude-3.5-sonnet");
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.max_tokens, 300);
        assert_eq!(config.referer, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = 8080\nmodel = \"openai/gpt-4o-mini\"").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.model, "openai/gpt-4o-mini");
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.max_tokens, 300);
    }

    #[test]
    fn test_invalid_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = \"not a number\"").unwrap();

        assert!(matches!(
            Config::load_from(file.path()),
            Err(FlownameError::Toml(_))
        ));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(matches!(
            Config::load_from(&path),
            Err(FlownameError::Config(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env_from(env(&[
                ("FLOWNAME_HOST", "0.0.0.0"),
                ("FLOWNAME_PORT", "8081"),
                ("FLOWNAME_WORKERS", "4"),
                ("FLOWNAME_MODEL", "openai/gpt-4o"),
                ("FLOWNAME_API_BASE", "http://localhost:9000/v1"),
            ]))
            .unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:8081");
        assert_eq!(config.workers, 4);
        assert_eq!(config.model, "openai/gpt-4o");
        assert_eq!(config.api_base, "http://localhost:9000/v1");
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let mut config = Config::default();
        config
            .apply_env_from(env(&[("FLOWNAME_MODEL", ""), ("FLOWNAME_PORT", "  ")]))
            .unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_bad_env_port() {
        let mut config = Config::default();
        assert!(config
            .apply_env_from(env(&[("FLOWNAME_PORT", "eighty")]))
            .is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            Config {
                api_base: "ftp://example.com".into(),
                ..Config::default()
            },
            Config {
                api_base: "not a url".into(),
                ..Config::default()
            },
            Config {
                port: 0,
                ..Config::default()
            },
            Config {
                workers: 0,
                ..Config::default()
            },
            Config {
                temperature: 2.5,
                ..Config::default()
            },
            Config {
                max_tokens: 0,
                ..Config::default()
            },
            Config {
                model: " ".into(),
                ..Config::default()
            },
        ];
        for config in bad {
            assert!(config.validate().is_err(), "{:?} should be rejected", config);
        }
    }

    #[test]
    fn test_completions_url() {
        let config = Config {
            api_base: "https://openrouter.ai/api/v1/".into(),
            ..Config::default()
        };
        assert_eq!(
            config.completions_url(),
            "https://openrouter.ai/api/v1/chat/completions"
        );
    }

    #[test]
    fn test_api_base_is_loopback() {
        let with_base = |base: &str| Config {
            api_base: base.into(),
            ..Config::default()
        };
        assert!(with_base("http://127.0.0.1:4000").api_base_is_loopback());
        assert!(with_base("http://localhost:4000/v1").api_base_is_loopback());
        assert!(with_base("http://[::1]:4000").api_base_is_loopback());
        assert!(!with_base(DEFAULT_API_BASE).api_base_is_loopback());
        assert!(!with_base("garbage").api_base_is_loopback());
    }
}
