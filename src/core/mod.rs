//! Core functionality for flowname
//!
//! This module contains shared business logic including:
//! - The Git Flow branch type registry
//! - Branch name generation
//! - Credential lookup
//! - Application configuration

pub mod branch_type;
pub mod config;
pub mod credentials;
pub mod generator;

pub use branch_type::{BranchTag, BranchType};
pub use config::Config;
pub use credentials::CredentialStore;
pub use generator::{BranchNameGenerator, GenerationRequest, GenerationResult};
