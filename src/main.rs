// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};

use heating_charts::application::heating_service::HeatingService;
use heating_charts::infrastructure::config::load_app_config;
use heating_charts::infrastructure::snapshot_repository::SnapshotRepository;
use heating_charts::{router, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(SnapshotRepository::new(config.data.snapshot_path.clone()));

    // Create service (application layer)
    let heating_service = HeatingService::from_config(repository, &config);

    // Create application state
    let state = Arc::new(AppState::new(heating_service, config.server.max_views));

    // Build router (presentation layer)
    let router = router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!(
        %addr,
        snapshot = %config.data.snapshot_path.display(),
        "starting heating-charts service"
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
