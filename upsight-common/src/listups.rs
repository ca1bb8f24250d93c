//! Payload types for the listUPS query answered by the NUT bridge.

use serde::{Deserialize, Serialize};

use crate::config::UpsSettings;

/// Connection parameters for a listUPS query.
///
/// The frontend sends the parameters it currently holds (possibly unsaved
/// edits), so the bridge connects with these rather than its own settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUpsRequest {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub auth: bool,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl From<&UpsSettings> for ListUpsRequest {
    fn from(settings: &UpsSettings) -> Self {
        Self {
            host: settings.host.clone(),
            port: settings.port,
            auth: settings.auth,
            username: settings.username.clone(),
            password: settings.password.clone(),
        }
    }
}

/// Reply payload: the UPS device names known to the NUT server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUpsResponse {
    pub result: Vec<String>,
}
