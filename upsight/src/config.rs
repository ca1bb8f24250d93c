//! Frontend configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use upsight_common::config::{LoggingConfig, UpsSettings, ZenohConfig};

/// Complete frontend configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Zenoh connection settings.
    #[serde(default)]
    pub zenoh: ZenohConfig,

    /// UPS connection settings and widget thresholds.
    #[serde(default)]
    pub ups: UpsSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a JSON5 file, or defaults when absent.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::info!(path = %path.display(), "No config file, using defaults");
            return Self::default();
        }

        match upsight_common::load_config(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use upsight_common::parse_config;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.zenoh.mode, "peer");
        assert_eq!(config.ups.host, "localhost");
        assert_eq!(config.ups.battery_high, 70);
        assert_eq!(config.ups.battery_low, 25);
    }

    #[test]
    fn test_parse() {
        let config: AppConfig = parse_config(
            r#"{
                zenoh: { mode: "client", connect: ["tcp/localhost:7447"] },
                ups: { ups: "apc1500", battery_low: 20, battery_high: 80 },
            }"#,
        )
        .unwrap();

        assert_eq!(config.zenoh.mode, "client");
        assert_eq!(config.ups.ups, "apc1500");
        assert_eq!(config.ups.thresholds().high, 80);
    }
}
