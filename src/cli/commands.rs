//! CLI command definitions using clap
//!
//! Defines the command structure for the `flowname` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// flowname - Git Flow branch name generator
///
/// Serves a small web form that turns a task description into a Git Flow
/// branch name. Run without arguments to start the server.
#[derive(Parser, Debug)]
#[command(name = "flowname", version, about, long_about = None)]
pub struct Cli {
    /// Read settings from this TOML file instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve(ServeArgs),

    /// Inspect configuration
    Config(ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Serve Command
// ─────────────────────────────────────────────────────────────────────────────

/// Server options; each flag overrides the config file and environment
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Number of worker threads
    #[arg(long)]
    pub workers: Option<usize>,

    /// OpenRouter model identifier
    #[arg(short, long)]
    pub model: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Config Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration commands
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective value of a setting
    Get {
        /// Configuration key
        key: ConfigKey,
    },

    /// Print the default configuration file location
    Path,
}

/// Available configuration keys
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ConfigKey {
    /// OpenRouter API key (masked)
    #[value(name = "api-key")]
    ApiKey,
    Host,
    Port,
    Workers,
    Model,
    Temperature,
    #[value(name = "max-tokens")]
    MaxTokens,
    #[value(name = "api-base")]
    ApiBase,
    #[value(name = "app-title")]
    AppTitle,
    Referer,
}
