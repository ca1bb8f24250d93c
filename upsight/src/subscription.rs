use iced::Subscription;

use upsight_common::{UpsMessage, ZenohConfig, decode_auto, vars_key};

use crate::message::Message;

/// Create a subscription that connects to Zenoh and receives UPS snapshots.
///
/// Only messages tagged with the configured channel and carrying a variable
/// map are applied; everything else is dropped without side effect.
pub fn zenoh_subscription(config: ZenohConfig, channel: String) -> Subscription<Message> {
    Subscription::run_with((config, channel), move |(config, channel)| {
        let config = config.clone();
        let channel = channel.clone();
        async_stream::stream! {
            // Connect to Zenoh
            let session = match upsight_common::connect(&config).await {
                Ok(session) => {
                    yield Message::Connected;
                    session
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to connect to Zenoh");
                    yield Message::Disconnected(e.to_string());
                    // Wait before the stream ends (subscription will restart)
                    tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                    return;
                }
            };

            // Subscribe to snapshot publications for our channel
            let key_expr = vars_key(&channel);
            let subscriber = match session.declare_subscriber(&key_expr).await {
                Ok(sub) => sub,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create subscriber");
                    yield Message::Disconnected(e.to_string());
                    return;
                }
            };

            // Process incoming samples
            loop {
                match subscriber.recv_async().await {
                    Ok(sample) => {
                        let payload = sample.payload().to_bytes();
                        match decode_auto::<UpsMessage>(&payload) {
                            Ok(message) => {
                                // Channel filter: messages for other widgets
                                // or without vars are ignored entirely.
                                if let Some(snapshot) = message.snapshot_for(&channel) {
                                    yield Message::VarsReceived(snapshot);
                                }
                            }
                            Err(e) => {
                                tracing::warn!(
                                    error = %e,
                                    key = %sample.key_expr(),
                                    "Failed to decode snapshot"
                                );
                            }
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Subscriber error");
                        yield Message::Disconnected(e.to_string());
                        return;
                    }
                }
            }
        }
    })
}
