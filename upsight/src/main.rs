//! Upsight - UPS battery widget backed by Zenoh telemetry.
//!
//! Subscribes to `upsight/<channel>/vars` snapshots published by
//! zenoh-bridge-nut and renders the battery state.

use anyhow::Result;
use clap::Parser;
use iced::application;
use std::path::PathBuf;

use upsight::app::Upsight;
use upsight::config::AppConfig;
use upsight_common::LoggingConfig;

/// UPS battery widget for Zenoh telemetry.
#[derive(Parser, Debug)]
#[command(name = "upsight")]
#[command(about = "Displays UPS battery state from a zenoh-bridge-nut publisher")]
#[command(version)]
struct Args {
    /// Path to configuration file (JSON5 format)
    #[arg(short, long, default_value = "upsight.json5")]
    config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = AppConfig::load_or_default(&args.config);

    let log_config = LoggingConfig {
        level: args
            .log_level
            .clone()
            .unwrap_or_else(|| config.logging.level.clone()),
        format: config.logging.format,
    };
    upsight_common::init_tracing(&log_config)
        .map_err(|e| anyhow::anyhow!("Failed to init tracing: {}", e))?;

    tracing::info!(ups = %config.ups.ups, channel = %config.ups.channel, "Starting Upsight");

    let boot_config = config.clone();
    application(
        move || Upsight::boot(boot_config.clone()),
        Upsight::update,
        Upsight::view,
    )
    .title(Upsight::title)
    .subscription(Upsight::subscription)
    .theme(Upsight::theme)
    .run()
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
