use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// A full UPS variable snapshot at one point in time.
///
/// Snapshots are replaced wholesale on every update and never mutated in
/// place; all derived views are pure functions of a snapshot. Keys follow
/// the NUT variable vocabulary (`ups.status`, `battery.charge`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpsSnapshot {
    vars: HashMap<String, String>,
}

impl UpsSnapshot {
    /// Create an empty snapshot (startup state, before any push arrived).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a snapshot from a raw variable map.
    pub fn from_vars(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }

    /// Look up a raw variable value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Whether the snapshot contains no variables at all.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Number of variables in the snapshot.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Parse the `ups.status` flags, or `None` if the key is absent.
    ///
    /// An absent key is meaningful: the widget classifies it as offline,
    /// which is distinct from a present-but-unrecognized status value.
    pub fn status_flags(&self) -> Option<StatusFlags> {
        self.get("ups.status").map(StatusFlags::parse)
    }

    /// Battery charge as an integer percentage.
    ///
    /// Absent and unparseable values both yield `None`; callers fall back
    /// to 0 for the bar and omit the table row.
    pub fn charge_percent(&self) -> Option<i64> {
        self.get("battery.charge").and_then(parse_integer)
    }

    /// Remaining battery runtime in seconds.
    pub fn runtime_secs(&self) -> Option<i64> {
        self.get("battery.runtime").and_then(parse_integer)
    }

    /// Iterate over all variables.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Parse a NUT numeric value as an integer, truncating a fractional part.
///
/// NUT reports numbers as strings, sometimes with decimals ("87.0").
fn parse_integer(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Ok(n) = value.parse::<i64>() {
        return Some(n);
    }
    value.parse::<f64>().ok().map(|f| f.trunc() as i64)
}

/// The whitespace-separated tokens of a `ups.status` value (e.g. "OL CHRG").
///
/// Token order is insignificant; only membership matters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusFlags {
    tokens: Vec<String>,
}

impl StatusFlags {
    /// Parse a raw status string into its flag tokens.
    pub fn parse(status: &str) -> Self {
        Self {
            tokens: status.split_whitespace().map(str::to_string).collect(),
        }
    }

    /// Whether a flag token is present.
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Whether no tokens were present at all.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Push envelope published by the bridge on the vars key expression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsMessage {
    /// Channel name identifying the publishing bridge (default "ups").
    pub channel: String,

    /// Unix epoch milliseconds when the snapshot was taken.
    pub timestamp: i64,

    /// The full variable map, replaced wholesale. A message without vars
    /// carries no snapshot and must be ignored by subscribers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vars: Option<HashMap<String, String>>,
}

impl UpsMessage {
    /// Create a snapshot message for a channel with the current timestamp.
    pub fn new(channel: impl Into<String>, vars: HashMap<String, String>) -> Self {
        Self {
            channel: channel.into(),
            timestamp: current_timestamp_millis(),
            vars: Some(vars),
        }
    }

    /// Apply the inbound message filter.
    ///
    /// Returns a snapshot only when the message is addressed to `channel`
    /// and actually carries a variable map; everything else is ignored
    /// without side effect.
    pub fn snapshot_for(&self, channel: &str) -> Option<UpsSnapshot> {
        if self.channel != channel {
            return None;
        }
        self.vars.clone().map(UpsSnapshot::from_vars)
    }
}

/// Get the current timestamp in milliseconds since Unix epoch.
///
/// Returns 0 if system time is before Unix epoch (should never happen in practice).
pub fn current_timestamp_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
