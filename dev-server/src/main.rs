//! Development server for the student records UI
//!
//! Serves the in-memory student API with a small roster already loaded, so
//! the browser app can be developed without a real backend.
//!
//! Usage: cargo run -p dev-server

use anyhow::{Context, Result};
use payloads::ClientConfig;
use test_helpers::{ServerConfig, mock::DevDataset, telemetry};
use tracing::info;

const DEFAULT_IP: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5001;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = telemetry::get_subscriber("info".into());
    telemetry::init_subscriber(subscriber);

    let ip = std::env::var("IP_ADDRESS").unwrap_or_else(|_| DEFAULT_IP.into());
    let port = match std::env::var("PORT") {
        Ok(port) => port.parse().context("PORT must be a port number")?,
        Err(_) => DEFAULT_PORT,
    };

    info!("🚀 Starting student records development server");
    let app = test_helpers::spawn_app_with(ServerConfig { ip, port }).await;
    info!("✅ API server running on {}", app.address());

    let configured = ClientConfig::from_env();
    if configured.base_url != app.address() {
        tracing::warn!(
            configured = %configured.base_url,
            serving = %app.address(),
            "API_BASE_URL does not point at this server"
        );
    }

    info!("📊 Setting up development test data...");
    let dataset = match DevDataset::create(&app).await {
        Ok(dataset) => dataset,
        Err(e) => {
            telemetry::log_error(e);
            anyhow::bail!("failed to load development data");
        }
    };

    info!("🎯 Development server ready!");
    info!("   API: {}", app.address());
    info!("   UI:  cd ui && API_BASE_URL={} trunk serve", app.address());
    info!("");
    dataset.print_summary();
    info!("");
    info!("👋 Press Ctrl+C to shutdown");

    tokio::signal::ctrl_c().await?;
    info!("🛑 Shutting down development server");
    Ok(())
}
