//! Zenoh bridge for NUT (Network UPS Tools).
//!
//! Polls a NUT server and publishes UPS variable snapshots to Zenoh.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use zenoh_bridge_nut::config::NutBridgeConfig;
use zenoh_bridge_nut::poller::NutPoller;
use zenoh_bridge_nut::query::run_listups_queryable;
use upsight_common::LoggingConfig;
use upsight_common::bridge_status_key;
use upsight_common::serialization::Format;

/// Zenoh bridge for NUT (Network UPS Tools) servers.
#[derive(Parser, Debug)]
#[command(name = "zenoh-bridge-nut")]
#[command(about = "Polls a NUT server and publishes UPS telemetry to Zenoh")]
#[command(version)]
struct Args {
    /// Path to configuration file (JSON5 format)
    #[arg(short, long, default_value = "nut.json5")]
    config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = NutBridgeConfig::load_from_file(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;

    // Initialize logging
    let log_config = LoggingConfig {
        level: args
            .log_level
            .clone()
            .unwrap_or_else(|| config.logging.level.clone()),
        format: config.logging.format,
    };
    upsight_common::init_tracing(&log_config)
        .map_err(|e| anyhow::anyhow!("Failed to init tracing: {}", e))?;

    info!("Starting zenoh-bridge-nut");
    info!("Loaded configuration from {:?}", args.config);

    // Connect to Zenoh
    let session = upsight_common::connect(&config.zenoh)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to Zenoh: {}", e))?;

    let format = Format::Json;

    // Start the poller and the listUPS queryable
    let poller = NutPoller::new(config.nut.clone(), session.clone(), format);
    let poller_task = tokio::spawn(async move {
        poller.run().await;
    });

    let query_session = session.clone();
    let query_config = config.nut.clone();
    let query_task = tokio::spawn(async move {
        if let Err(e) = run_listups_queryable(query_session, query_config).await {
            error!(error = %e, "listUPS queryable failed");
        }
    });

    info!(
        ups = %config.nut.ups,
        channel = %config.nut.channel,
        "NUT bridge running"
    );

    // Publish bridge status
    let status_key = bridge_status_key(&config.nut.channel);
    let status = serde_json::json!({
        "bridge": "nut",
        "version": env!("CARGO_PKG_VERSION"),
        "ups": config.nut.ups,
        "status": "running"
    });

    if let Err(e) = session.put(&status_key, status.to_string()).await {
        error!("Failed to publish bridge status: {}", e);
    }

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Received shutdown signal");

    poller_task.abort();
    query_task.abort();

    // Publish offline status
    let status = serde_json::json!({
        "bridge": "nut",
        "status": "offline"
    });
    let _ = session.put(&status_key, status.to_string()).await;

    session
        .close()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to close Zenoh session: {}", e))?;
    info!("NUT bridge stopped");

    Ok(())
}
