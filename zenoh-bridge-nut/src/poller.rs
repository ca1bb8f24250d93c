//! NUT polling and snapshot publishing.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, error, info, warn};
use zenoh::Session;
use upsight_common::serialization::{Format, encode};
use upsight_common::telemetry::{StatusFlags, UpsMessage};
use upsight_common::{status_changed_key, vars_key};

use crate::client::{NutClient, NutError};
use crate::config::NutConfig;

/// Polls one UPS and publishes its variables wholesale every cycle.
pub struct NutPoller {
    config: NutConfig,
    session: Session,
    format: Format,
    client: Option<NutClient>,
    prev_vars: HashMap<String, String>,
}

impl NutPoller {
    /// Create a new poller.
    pub fn new(config: NutConfig, session: Session, format: Format) -> Self {
        Self {
            config,
            session,
            format,
            client: None,
            prev_vars: HashMap::new(),
        }
    }

    /// Run the polling loop.
    pub async fn run(mut self) {
        let interval = Duration::from_secs(self.config.poll_interval_secs);

        info!(
            ups = %self.config.ups,
            server = %format!("{}:{}", self.config.host, self.config.port),
            interval_secs = self.config.poll_interval_secs,
            "Starting NUT poller"
        );

        let mut first_run = true;
        loop {
            if first_run {
                first_run = false;
            } else {
                tokio::time::sleep(interval).await;
            }

            self.poll_once().await;
        }
    }

    /// One poll cycle: ensure the connection, fetch vars, publish.
    async fn poll_once(&mut self) {
        if !self.ensure_connected().await {
            self.publish_offline().await;
            return;
        }

        let vars = match self.fetch_vars().await {
            Ok(vars) => vars,
            Err(e) if e.is_data_stale() || e.is_driver_not_connected() => {
                // The server answers but has no fresh data for the UPS.
                warn!(ups = %self.config.ups, error = %e, "UPS data unavailable");
                self.publish_offline().await;
                return;
            }
            Err(e) => {
                error!(ups = %self.config.ups, error = %e, "Failed to fetch UPS variables");
                self.client = None;
                return;
            }
        };

        debug!(ups = %self.config.ups, count = vars.len(), "Fetched UPS variables");

        self.log_transitions(&vars);

        if vars.get("ups.status") != self.prev_vars.get("ups.status") {
            self.publish(&vars, &status_changed_key(&self.config.channel))
                .await;
        }

        self.publish(&vars, &vars_key(&self.config.channel)).await;
        self.prev_vars = vars;
    }

    /// Probe an existing connection, reconnecting when it is gone.
    async fn ensure_connected(&mut self) -> bool {
        if let Some(client) = self.client.as_mut() {
            if client.ver().await.is_ok() {
                return true;
            }
            warn!("Connection lost. Reconnecting...");
            self.client = None;
        } else {
            info!(
                server = %format!("{}:{}", self.config.host, self.config.port),
                "Connecting..."
            );
        }

        let timeout = Duration::from_millis(self.config.timeout_ms);
        match NutClient::connect(
            &self.config.host,
            self.config.port,
            self.config.auth,
            &self.config.username,
            &self.config.password,
            timeout,
        )
        .await
        {
            Ok(client) => {
                info!("Connected!");
                self.client = Some(client);
                true
            }
            Err(e) => {
                error!(error = %e, "Unable to connect");
                false
            }
        }
    }

    async fn fetch_vars(&mut self) -> Result<HashMap<String, String>, NutError> {
        // ensure_connected ran just before, so the client is present.
        match self.client.as_mut() {
            Some(client) => client.list_vars(&self.config.ups).await,
            None => Err(NutError::Protocol("Not connected".into())),
        }
    }

    /// Log power transitions the way an operator expects to read them.
    fn log_transitions(&self, vars: &HashMap<String, String>) {
        let on_battery = has_flag(vars, "OB");
        let was_on_battery = has_flag(&self.prev_vars, "OB");

        if on_battery {
            if !was_on_battery {
                info!("Power lost. Running on battery.");
            }

            let charge = vars.get("battery.charge");
            if !was_on_battery || charge != self.prev_vars.get("battery.charge") {
                if let Some(charge) = charge {
                    info!("Battery remaining {}%", charge);
                }
            }
        } else if was_on_battery {
            info!("Power restored.");
        }
    }

    /// Publish the marker snapshot used when the UPS is unreachable.
    async fn publish_offline(&mut self) {
        let vars = HashMap::from([("ups.status".to_string(), "OFFLINE".to_string())]);
        self.publish(&vars, &vars_key(&self.config.channel)).await;
        self.prev_vars = vars;
    }

    async fn publish(&self, vars: &HashMap<String, String>, key: &str) {
        let message = snapshot_message(&self.config.channel, vars.clone());

        match encode(&message, self.format) {
            Ok(payload) => {
                if let Err(e) = self.session.put(key, payload).await {
                    warn!(key = %key, error = %e, "Failed to publish snapshot");
                } else {
                    debug!(key = %key, vars = vars.len(), "Published snapshot");
                }
            }
            Err(e) => {
                warn!(error = %e, "Failed to encode snapshot");
            }
        }
    }
}

/// Build the push envelope for a snapshot, stamped with wall-clock time.
fn snapshot_message(channel: &str, vars: HashMap<String, String>) -> UpsMessage {
    UpsMessage {
        channel: channel.to_string(),
        timestamp: chrono::Utc::now().timestamp_millis(),
        vars: Some(vars),
    }
}

fn has_flag(vars: &HashMap<String, String>, token: &str) -> bool {
    vars.get("ups.status")
        .map(|status| StatusFlags::parse(status).contains(token))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(status: &str) -> HashMap<String, String> {
        HashMap::from([("ups.status".to_string(), status.to_string())])
    }

    #[test]
    fn test_has_flag() {
        assert!(has_flag(&vars("OB LB"), "OB"));
        assert!(!has_flag(&vars("OL CHRG"), "OB"));
        assert!(!has_flag(&HashMap::new(), "OB"));
    }

    #[test]
    fn test_snapshot_message_is_timestamped() {
        let before = chrono::Utc::now().timestamp_millis();
        let message = snapshot_message("ups", vars("OL"));
        let after = chrono::Utc::now().timestamp_millis();

        assert_eq!(message.channel, "ups");
        assert!(message.timestamp >= before && message.timestamp <= after);
        assert!(message.vars.is_some());
    }

    #[test]
    fn test_offline_marker_shape() {
        // The unreachable-server snapshot classifies as offline downstream.
        let vars = HashMap::from([("ups.status".to_string(), "OFFLINE".to_string())]);
        let message = snapshot_message("ups", vars);
        let snapshot = message.snapshot_for("ups").unwrap();

        assert_eq!(
            upsight_common::UpsStatus::from_snapshot(&snapshot),
            upsight_common::UpsStatus::Offline
        );
    }
}
