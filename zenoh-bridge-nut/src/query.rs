//! listUPS queryable.
//!
//! The frontend's "which UPS devices exist?" request arrives as a zenoh
//! query carrying connection parameters; each query gets a fresh NUT
//! connection so unsaved settings edits can be probed before committing.

use std::time::Duration;

use tracing::{info, warn};
use zenoh::Session;
use upsight_common::listups::{ListUpsRequest, ListUpsResponse};
use upsight_common::listups_key;

use crate::client::{NutClient, NutError};
use crate::config::NutConfig;

/// Serve listUPS queries until the session closes.
pub async fn run_listups_queryable(session: Session, config: NutConfig) -> anyhow::Result<()> {
    let key = listups_key(&config.channel);
    let queryable = session
        .declare_queryable(&key)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to declare queryable on '{}': {}", key, e))?;

    info!(key = %key, "Serving listUPS queries");

    let timeout = Duration::from_millis(config.timeout_ms);

    while let Ok(query) = queryable.recv_async().await {
        let request = match query.payload() {
            Some(payload) => match serde_json::from_slice::<ListUpsRequest>(&payload.to_bytes()) {
                Ok(request) => request,
                Err(e) => {
                    warn!(error = %e, "Malformed listUPS request");
                    if let Err(e) = query.reply_err(format!("Malformed request: {}", e)).await {
                        warn!(error = %e, "Failed to send error reply");
                    }
                    continue;
                }
            },
            // No payload: fall back to the bridge's own connection settings.
            None => config.as_request(),
        };

        match list_ups(&request, timeout).await {
            Ok(result) => {
                info!(count = result.len(), host = %request.host, "Answered listUPS");
                let response = ListUpsResponse { result };
                match serde_json::to_vec(&response) {
                    Ok(payload) => {
                        if let Err(e) = query.reply(&key, payload).await {
                            warn!(error = %e, "Failed to reply to listUPS query");
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to encode listUPS response");
                    }
                }
            }
            Err(e) => {
                warn!(host = %request.host, error = %e, "listUPS failed");
                if let Err(e) = query.reply_err(format!("Error getting UPS list: {}", e)).await {
                    warn!(error = %e, "Failed to send error reply");
                }
            }
        }
    }

    Ok(())
}

/// Connect with the supplied parameters and list the server's UPS devices.
async fn list_ups(request: &ListUpsRequest, timeout: Duration) -> Result<Vec<String>, NutError> {
    let mut client = NutClient::connect(
        &request.host,
        request.port,
        request.auth,
        &request.username,
        &request.password,
        timeout,
    )
    .await?;

    client.list_ups().await
}
