//! CLI module for flowname
//!
//! This module contains all CLI command definitions and handlers using clap.

pub mod commands;
pub mod config;
pub mod serve;

pub use commands::{Cli, Commands};
