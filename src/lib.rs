pub mod analysis; // Gateway round trip + interpretation
pub mod api; // HTTP router and server
pub mod config;
pub mod db;
pub mod emergency; // Ambulance number and hospital search links
pub mod gateway; // OpenAI-compatible generation client
pub mod interpreter; // Reply → diseases, recommendations, emergency flag
pub mod models;

use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::analysis::HealthAnalyzer;
use crate::api::ApiContext;
use crate::config::AppConfig;
use crate::gateway::GatewayClient;

#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error("Database unavailable: {0}")]
    Database(#[from] db::DatabaseError),

    #[error("{0}")]
    Server(String),

    #[error("Failed to listen for shutdown signal: {0}")]
    Signal(#[from] std::io::Error),
}

/// Install the global tracing subscriber. `RUST_LOG` overrides the default
/// filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Run the service until Ctrl-C.
pub async fn run() -> Result<(), StartupError> {
    init_tracing();
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = AppConfig::from_env()?;

    // Open once up front so schema problems surface before binding.
    db::open_database(&config.database_path)?;
    tracing::info!(path = %config.database_path.display(), "Database ready");

    let gateway_configured = config.gateway.is_configured();
    if !gateway_configured {
        tracing::warn!(
            "{} is not set; analysis requests will fail until it is configured",
            config::env::API_KEY
        );
    }
    tracing::info!(model = %config.gateway.model, url = %config.gateway.completions_url(), "Gateway");

    let analyzer = HealthAnalyzer::new(Arc::new(GatewayClient::new(config.gateway.clone())));
    let ctx = ApiContext::new(analyzer, config.database_path.clone(), gateway_configured);

    let server = api::start_api_server(ctx, config.bind_addr)
        .await
        .map_err(StartupError::Server)?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown requested");
    server.stop().await;

    Ok(())
}
