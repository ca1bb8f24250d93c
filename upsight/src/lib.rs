//! Upsight - UPS battery widget backed by Zenoh telemetry.
//!
//! This library exposes the core components for testing.

pub mod app;
pub mod config;
pub mod message;
pub mod subscription;
pub mod upslist;
pub mod view;

// Re-export commonly used types
pub use app::Upsight;
pub use config::AppConfig;
pub use message::Message;
