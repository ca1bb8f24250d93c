/// Default key expression prefix for all Upsight traffic.
pub const KEY_PREFIX: &str = "upsight";

/// Key the bridge publishes variable snapshots on.
///
/// # Example
/// ```
/// use upsight_common::keyexpr::vars_key;
///
/// assert_eq!(vars_key("ups"), "upsight/ups/vars");
/// ```
pub fn vars_key(channel: &str) -> String {
    format!("{}/{}/vars", KEY_PREFIX, channel)
}

/// Key the bridge answers listUPS queries on.
///
/// # Example
/// ```
/// use upsight_common::keyexpr::listups_key;
///
/// assert_eq!(listups_key("ups"), "upsight/ups/listups");
/// ```
pub fn listups_key(channel: &str) -> String {
    format!("{}/{}/listups", KEY_PREFIX, channel)
}

/// Key the bridge publishes snapshots on whenever `ups.status` changed.
pub fn status_changed_key(channel: &str) -> String {
    format!("{}/{}/events/status_changed", KEY_PREFIX, channel)
}

/// Key the bridge publishes its own running/offline status on.
pub fn bridge_status_key(channel: &str) -> String {
    format!("{}/{}/@/status", KEY_PREFIX, channel)
}

/// Wildcard matching snapshot publications from every channel.
pub fn all_vars_wildcard() -> String {
    format!("{}/*/vars", KEY_PREFIX)
}
