//! hydration-tracker server entry point.
//!
//! Starts the Axum HTTP server with the REST endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use hydration_tracker::api;
use hydration_tracker::app_state::AppState;
use hydration_tracker::config::{LogFormat, ServiceConfig};
use hydration_tracker::domain::beverage::BEVERAGE_CATALOG;
use hydration_tracker::persistence::{MemoryStore, PostgresStore, Store};

/// Upper bound on handling a single request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = ServiceConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    tracing::info!(addr = %config.listen_addr, "starting hydration-tracker");
    if config.uses_dev_jwt_secret() {
        tracing::warn!("JWT_SECRET is not set; using the insecure development secret");
    }

    // Build persistence layer
    let store: Arc<dyn Store> = if config.persistence_enabled {
        let postgres = PostgresStore::connect(&config).await?;
        postgres.migrate().await?;
        let seeded = postgres.seed_beverages(&BEVERAGE_CATALOG).await?;
        tracing::info!(seeded, "PostgreSQL store ready");
        Arc::new(postgres)
    } else {
        tracing::warn!("persistence disabled; data lives in memory only");
        Arc::new(MemoryStore::with_beverages(&BEVERAGE_CATALOG))
    };

    // Build application state
    let app_state = AppState::new(store, &config);

    // Build router
    let app = Router::new()
        .merge(api::build_router(&app_state))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
