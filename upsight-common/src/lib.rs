//! Upsight Common Library
//!
//! Shared types and utilities for the Upsight UPS monitor:
//!
//! - [`telemetry`] - UPS variable snapshots and the push envelope
//! - [`status`] - flag classification (offline/charging/online/...)
//! - [`presentation`] - pure derivation of the widget's bar and table
//! - [`listups`] - listUPS query payloads
//! - [`serialization`] - JSON/CBOR encoding and decoding
//! - [`config`] - configuration types and JSON5 loading
//! - [`session`] - Zenoh session management
//! - [`keyexpr`] - key expression builders
//! - [`error`] - error types

pub mod config;
pub mod error;
pub mod keyexpr;
pub mod listups;
pub mod presentation;
pub mod serialization;
pub mod session;
pub mod status;
pub mod telemetry;

// Re-export commonly used types at the crate root
pub use config::{LogFormat, LoggingConfig, UpsSettings, ZenohConfig, load_config, parse_config};
pub use error::{Error, Result};
pub use keyexpr::{
    KEY_PREFIX, all_vars_wildcard, bridge_status_key, listups_key, status_changed_key, vars_key,
};
pub use listups::{ListUpsRequest, ListUpsResponse};
pub use presentation::{
    BAR_TRACK_FRACTION, BarColor, BatteryBar, PopoverRow, Thresholds, battery_bar,
    battery_bar_for, popover_rows,
};
pub use serialization::{Format, decode, decode_auto, encode};
pub use session::connect;
pub use status::UpsStatus;
pub use telemetry::{StatusFlags, UpsMessage, UpsSnapshot, current_timestamp_millis};

/// Initialize tracing with the given configuration.
///
/// Supports two output formats:
/// - `LogFormat::Text` (default): Human-readable text format
/// - `LogFormat::Json`: Structured JSON format for log aggregation systems
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(fmt::layer())
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(fmt::layer().json())
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
    }

    Ok(())
}
