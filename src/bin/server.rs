//! Taixiu Server - round tracker and predictor
//!
//! Polls the plain and digest feeds, keeps the last rounds of each in memory
//! and serves them read-only over HTTP. Snapshots are pushed via structured
//! JSON logs to stdout.
//!
//! # Usage
//! ```sh
//! FEED_BASE_URL=https://feed.example/glms/v1/notify cargo run --bin server
//! ```
//!
//! # Environment Variables
//! - `FEED_BASE_URL` - Upstream notify endpoint (required)
//! - `SERVER_PORT` - HTTP port (default: 10000)
//! - `OBSERVABILITY_ENABLED` - Enable snapshot reporting (default: true)
//! - `OBSERVABILITY_INTERVAL` - Seconds between snapshot lines (default: 60)
//! - `PREDICTION_SEED` - Fixed seed for prediction noise (default: OS entropy)

use anyhow::Result;
use taixiu::application::system::Application;
use taixiu::config::Config;
use taixiu::infrastructure::observability::SnapshotReporter;
use taixiu::interfaces::{ApiState, serve};
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("Taixiu Server {} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: feed={}, platform={}, games=({}, {}), poll={}s",
        config.feed.base_url,
        config.feed.platform_id,
        config.feed.plain_game_id,
        config.feed.digest_game_id,
        config.feed.poll_interval_secs
    );

    let addr = config.server.socket_addr();
    let observability = config.observability.clone();

    let app = Application::build(config).await?;
    let handle = app.start().await?;
    info!("Pollers running.");

    if observability.enabled {
        let reporter = SnapshotReporter::new(
            handle.stores(),
            handle.metrics.clone(),
            observability.interval_secs,
        );
        tokio::spawn(async move {
            reporter.run().await;
        });
        info!(
            "Snapshot reporter started (interval: {}s)",
            observability.interval_secs
        );
    } else {
        info!("Snapshot reporting disabled.");
    }

    let api = ApiState::from_handle(&handle);
    tokio::select! {
        _ = serve(api, addr) => {}
        res = tokio::signal::ctrl_c() => {
            res?;
            info!("Shutdown signal received. Exiting...");
        }
    }

    handle.shutdown();
    Ok(())
}
