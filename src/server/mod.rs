//! HTTP server
//!
//! Routes:
//! - `GET /` - the form
//! - `POST /generate-branch-name` (and `/api/generate-branch-name`)
//! - `GET /branch-types`
//! - `GET /health`

pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use secrecy::SecretString;
use tracing::{info, warn};

use crate::ai::openrouter::OpenRouterClient;
use crate::core::config::Config;
use crate::core::credentials::CredentialStore;
use crate::core::generator::BranchNameGenerator;
use crate::error::Result;

use self::middleware::RequestTracing;

/// Shared, read-only state handed to every worker
pub struct AppState {
    pub generator: BranchNameGenerator,
}

impl AppState {
    pub fn new(generator: BranchNameGenerator) -> Self {
        Self { generator }
    }

    /// Build the state backed by OpenRouter
    pub fn with_openrouter(config: &Config, api_key: Option<SecretString>) -> Result<Self> {
        let client = OpenRouterClient::new(config, api_key)?;
        Ok(Self::new(BranchNameGenerator::new(Arc::new(client))))
    }
}

/// Register all routes
pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(handlers::json_error_handler));

    for path in handlers::GENERATE_PATHS {
        cfg.service(
            web::resource(path)
                .route(web::post().to(handlers::generate_branch_name))
                .default_service(web::to(handlers::method_not_allowed)),
        );
    }

    cfg.route("/", web::get().to(handlers::index))
        .route("/branch-types", web::get().to(handlers::branch_types))
        .route("/health", web::get().to(handlers::health));
}

/// Start the HTTP server and run until it is stopped
pub async fn run(config: Config, api_key: Option<SecretString>) -> Result<()> {
    match &api_key {
        Some(key) => info!("Using OpenRouter key {}", CredentialStore::mask_token(key)),
        None => warn!(
            "No OpenRouter API key found; generation requests will fail until OPENROUTER_API_KEY is set"
        ),
    }

    let state = web::Data::new(AppState::with_openrouter(&config, api_key)?);
    let address = config.bind_address();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(RequestTracing)
            .configure(app_config)
    })
    .workers(config.workers)
    .bind(&address)?
    .run();

    info!(model = %config.model, "Listening on http://{}", address);

    server.await?;
    Ok(())
}
