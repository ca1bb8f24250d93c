//! Zenoh bridge for NUT (Network UPS Tools).
//!
//! This bridge polls a NUT server (`upsd`) and publishes the full UPS
//! variable snapshot to Zenoh every cycle. It also answers listUPS queries
//! so a frontend can enumerate the server's devices.
//!
//! # Key Expressions
//!
//! ```text
//! upsight/<channel>/vars                   wholesale variable snapshots
//! upsight/<channel>/events/status_changed  snapshot re-published on status change
//! upsight/<channel>/listups                queryable for device enumeration
//! upsight/<channel>/@/status               bridge running/offline status
//! ```

pub mod client;
pub mod config;
pub mod poller;
pub mod query;
