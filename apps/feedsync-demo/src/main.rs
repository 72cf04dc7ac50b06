//! # Feedsync Demo
//!
//! Runs one scripted session against a simulated remote and network, then
//! shuts the context down.

mod config;
mod context;
mod session;
mod telemetry;

use config::AppConfig;
use context::AppContext;
use telemetry::TelemetryConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();
    tracing::info!(
        store = ?config.store,
        page_size = config.page_size,
        latency_ms = config.remote.latency.as_millis() as u64,
        "Starting feedsync demo"
    );

    let ctx = AppContext::build(&config).await?;
    let result = session::run(&ctx).await;
    ctx.shutdown();

    let report = result?;
    tracing::info!(?report, "Session finished");
    Ok(())
}
