use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Common Zenoh connection configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZenohConfig {
    /// Zenoh mode: "client", "peer", or "router".
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Endpoints to connect to (for client mode).
    #[serde(default)]
    pub connect: Vec<String>,

    /// Endpoints to listen on (for peer/router mode).
    #[serde(default)]
    pub listen: Vec<String>,
}

fn default_mode() -> String {
    "peer".to_string()
}

impl Default for ZenohConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            connect: Vec::new(),
            listen: Vec::new(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format (default).
    #[default]
    Text,
    /// Structured JSON format.
    Json,
}

/// Common logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format: "text" or "json".
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// UPS connection and widget settings shared by the bridge and frontend.
///
/// Defaults match a stock local NUT install: `upsd` on localhost:3493,
/// no authentication, thresholds at 25/70 percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsSettings {
    /// NUT server hostname or address.
    #[serde(default = "default_host")]
    pub host: String,

    /// NUT server TCP port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Whether to send USERNAME/PASSWORD on connect.
    #[serde(default)]
    pub auth: bool,

    /// Username for authenticated connections.
    #[serde(default)]
    pub username: String,

    /// Password for authenticated connections.
    #[serde(default)]
    pub password: String,

    /// Name of the monitored UPS device.
    #[serde(default)]
    pub ups: String,

    /// Charge percentage at or above which the bar is green.
    #[serde(default = "default_battery_high")]
    pub battery_high: i64,

    /// Charge percentage at or below which the bar is red.
    #[serde(default = "default_battery_low")]
    pub battery_low: i64,

    /// Channel name tagging push messages from the bridge.
    #[serde(default = "default_channel")]
    pub channel: String,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    3493
}

fn default_battery_high() -> i64 {
    70
}

fn default_battery_low() -> i64 {
    25
}

fn default_channel() -> String {
    "ups".to_string()
}

impl Default for UpsSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            auth: false,
            username: String::new(),
            password: String::new(),
            ups: String::new(),
            battery_high: default_battery_high(),
            battery_low: default_battery_low(),
            channel: default_channel(),
        }
    }
}

impl UpsSettings {
    /// The battery bar thresholds configured here.
    pub fn thresholds(&self) -> crate::presentation::Thresholds {
        crate::presentation::Thresholds {
            low: self.battery_low,
            high: self.battery_high,
        }
    }
}

/// Load a configuration file in JSON5 format.
pub fn load_config<T: for<'de> Deserialize<'de>>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    json5::from_str(&content).map_err(|e| {
        Error::Config(format!(
            "Failed to parse config file '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Load a configuration from a JSON5 string.
pub fn parse_config<T: for<'de> Deserialize<'de>>(content: &str) -> Result<T> {
    json5::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
}
