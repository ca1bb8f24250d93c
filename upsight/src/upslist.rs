//! listUPS query issued towards the NUT bridge.
//!
//! Fire-and-forget: the caller spawns this future and reacts to the
//! resulting message. Overlapping refreshes are not deduplicated; whichever
//! reply lands last wins.

use std::time::Duration;

use anyhow::{Result, anyhow};

use upsight_common::listups::{ListUpsRequest, ListUpsResponse};
use upsight_common::{ZenohConfig, listups_key};

/// How long to wait for the bridge to answer a listUPS query.
const QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Query the bridge for the UPS device names its NUT server knows.
///
/// Each call opens and closes its own zenoh session rather than sharing the
/// subscription's; refreshes are rare enough that the extra connection cost
/// is accepted over threading a session handle through the update loop.
pub async fn fetch_ups_list(
    config: ZenohConfig,
    channel: String,
    request: ListUpsRequest,
) -> Result<Vec<String>> {
    let session = upsight_common::connect(&config)
        .await
        .map_err(|e| anyhow!("Zenoh connect failed: {}", e))?;

    let key = listups_key(&channel);
    let payload = serde_json::to_vec(&request)?;

    let replies = session
        .get(&key)
        .payload(payload)
        .timeout(QUERY_TIMEOUT)
        .await
        .map_err(|e| anyhow!("listUPS query failed: {}", e))?;

    let reply = replies
        .recv_async()
        .await
        .map_err(|_| anyhow!("No reply from bridge"))?;

    let result = match reply.result() {
        Ok(sample) => {
            let response: ListUpsResponse = serde_json::from_slice(&sample.payload().to_bytes())?;
            Ok(response.result)
        }
        Err(err) => {
            let reason = String::from_utf8_lossy(&err.payload().to_bytes()).into_owned();
            Err(anyhow!("{}", reason))
        }
    };

    let _ = session.close().await;
    result
}
