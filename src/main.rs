use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use weathercast::config::AppConfig;
use weathercast::service::WeatherService;
use weathercast::session::build_session;
use weathercast::web::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let session = build_session(config.timeout(), config.max_retries)?;
    let service = WeatherService::new(session, &config);

    web::run(Arc::new(AppState { service }), config.port).await
}
