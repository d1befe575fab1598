//! Serve command handler

use std::path::Path;

use crate::cli::commands::ServeArgs;
use crate::core::config::Config;
use crate::core::credentials::CredentialStore;
use crate::error::Result;
use crate::server;

/// Handle the serve command
pub async fn handle_serve(args: ServeArgs, config_path: Option<&Path>) -> Result<()> {
    let mut config = Config::resolve(config_path)?;
    apply_args(&mut config, args);
    config.validate()?;

    server::run(config, CredentialStore::get_openrouter_key()).await
}

/// Command-line flags take priority over everything else
fn apply_args(config: &mut Config, args: ServeArgs) {
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if let Some(model) = args.model {
        config.model = model;
    }
}
