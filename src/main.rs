//! flowname - Git Flow branch name generator
//!
//! Starts the web form and API by default; `flowname config` inspects the
//! effective settings.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use flowname::cli::commands::{Cli, Commands, ServeArgs};
use flowname::cli::{config, serve};
use flowname::error::Result;

#[actix_web::main]
async fn main() {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        // No subcommand - start the server
        None => serve::handle_serve(ServeArgs::default(), config_path).await,
        Some(Commands::Serve(args)) => serve::handle_serve(args, config_path).await,
        Some(Commands::Config(args)) => config::handle_config(args.command, config_path),
    }
}
