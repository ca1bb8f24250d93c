//! View components for the Upsight widget.

pub mod details;
pub mod icons;
pub mod settings;
pub mod theme;
pub mod widget;
