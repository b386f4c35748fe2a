//! Astro HTTP Server Binary
//!
//! Entry point for the rise/set/twilight REST API.
//!
//! # Usage
//!
//! ```bash
//! TIMEZONE_API_KEY=... cargo run --bin astro-server
//! ```
//!
//! # Environment Variables
//!
//! - `ASTRO_CONFIG`: Path to the TOML configuration file
//! - `HOST`: Server host (default: 127.0.0.1)
//! - `PORT`: Server port (default: 7778)
//! - `TIMEZONE_API_KEY`: Google Time Zone API key; without it every response uses UTC
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use astro_server::config::AppConfig;
use astro_server::http::{create_router, AppState};
use astro_server::services::{
    FallbackTimezone, GoogleTimezoneClient, ObservationService, SystemClock, TimezoneProvider,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting astro HTTP server");

    let config = match AppConfig::from_default_location() {
        Ok(config) => config,
        Err(e) => {
            warn!("{}; using defaults", e);
            AppConfig::default()
        }
    }
    .with_env_overrides();

    if !config.timezone.has_api_key() {
        warn!("No timezone API key configured; all responses will use UTC");
    }

    let timezone: Arc<dyn TimezoneProvider> = match GoogleTimezoneClient::new(&config.timezone) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            warn!("Failed to build timezone client: {}", e);
            Arc::new(FallbackTimezone)
        }
    };

    let service =
        ObservationService::new(timezone, Arc::new(SystemClock), config.timezone.timeout());
    let app = create_router(AppState::new(service));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
