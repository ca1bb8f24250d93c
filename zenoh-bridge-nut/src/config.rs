//! Configuration for the NUT bridge.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use upsight_common::config::{LoggingConfig, ZenohConfig};
use upsight_common::listups::ListUpsRequest;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] json5::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Complete bridge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutBridgeConfig {
    /// Zenoh connection settings
    #[serde(default)]
    pub zenoh: ZenohConfig,

    /// NUT-specific settings
    pub nut: NutConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// NUT server connection and polling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutConfig {
    /// Channel name tagging push messages (default: "ups")
    #[serde(default = "default_channel")]
    pub channel: String,

    /// NUT server hostname or address
    #[serde(default = "default_host")]
    pub host: String,

    /// NUT server TCP port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Whether to send USERNAME/PASSWORD after connecting
    #[serde(default)]
    pub auth: bool,

    /// Username for authenticated connections
    #[serde(default)]
    pub username: String,

    /// Password for authenticated connections
    #[serde(default)]
    pub password: String,

    /// Name of the UPS device to poll
    pub ups: String,

    /// Poll interval in seconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Connection and request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_channel() -> String {
    "ups".to_string()
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    3493
}

fn default_poll_interval() -> u64 {
    1
}

fn default_timeout_ms() -> u64 {
    5000
}

impl NutConfig {
    /// Connection parameters in listUPS request form.
    pub fn as_request(&self) -> ListUpsRequest {
        ListUpsRequest {
            host: self.host.clone(),
            port: self.port,
            auth: self.auth,
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

impl NutBridgeConfig {
    /// Load configuration from a JSON5 file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: NutBridgeConfig = json5::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nut.ups.is_empty() {
            return Err(ConfigError::Validation(
                "A UPS device name must be configured".to_string(),
            ));
        }

        if self.nut.channel.is_empty() || self.nut.channel.contains('/') {
            return Err(ConfigError::Validation(format!(
                "Invalid channel name '{}'",
                self.nut.channel
            )));
        }

        if self.nut.poll_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "poll_interval_secs must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let json = r#"{
            nut: { ups: "apc1500" }
        }"#;

        let config: NutBridgeConfig = json5::from_str(json).unwrap();
        config.validate().unwrap();

        assert_eq!(config.nut.ups, "apc1500");
        assert_eq!(config.nut.host, "localhost");
        assert_eq!(config.nut.port, 3493);
        assert_eq!(config.nut.channel, "ups");
        assert_eq!(config.nut.poll_interval_secs, 1);
        assert_eq!(config.zenoh.mode, "peer");
    }

    #[test]
    fn test_parse_authenticated_config() {
        let json = r#"{
            zenoh: { mode: "client", connect: ["tcp/router.lan:7447"] },
            nut: {
                channel: "rack",
                host: "nut.lan",
                auth: true,
                username: "monuser",
                password: "secret",
                ups: "eaton5p",
                poll_interval_secs: 2,
            },
            logging: { level: "debug" }
        }"#;

        let config: NutBridgeConfig = json5::from_str(json).unwrap();
        config.validate().unwrap();

        assert_eq!(config.nut.channel, "rack");
        assert!(config.nut.auth);
        assert_eq!(config.nut.poll_interval_secs, 2);
        assert_eq!(config.logging.level, "debug");

        let req = config.nut.as_request();
        assert_eq!(req.host, "nut.lan");
        assert_eq!(req.username, "monuser");
    }

    #[test]
    fn test_validate_missing_ups() {
        let json = r#"{ nut: { ups: "" } }"#;

        let config: NutBridgeConfig = json5::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_channel() {
        let json = r#"{ nut: { ups: "apc1500", channel: "a/b" } }"#;

        let config: NutBridgeConfig = json5::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }
}
