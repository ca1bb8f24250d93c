//! SVG icons for the battery widget.
//!
//! All icons are embedded at compile time using `include_bytes!`.

use iced::widget::svg::{Handle, Svg};
use iced::{Element, Length};

use upsight_common::UpsStatus;

/// Icon size presets.
#[derive(Debug, Clone, Copy, Default)]
pub enum IconSize {
    /// Small icon (12px)
    Small,
    /// Medium icon (16px) - default
    #[default]
    Medium,
    /// Large icon (20px)
    Large,
}

impl IconSize {
    fn pixels(self) -> f32 {
        match self {
            IconSize::Small => 12.0,
            IconSize::Medium => 16.0,
            IconSize::Large => 20.0,
        }
    }
}

/// Create an SVG element from raw bytes.
fn svg_icon<Message: 'static>(data: &'static [u8], size: IconSize) -> Element<'static, Message> {
    let handle = Handle::from_memory(data);
    Svg::new(handle)
        .width(Length::Fixed(size.pixels()))
        .height(Length::Fixed(size.pixels()))
        .into()
}

/// Question mark (UPS unreachable).
pub fn question<Message: 'static>(size: IconSize) -> Element<'static, Message> {
    svg_icon(include_bytes!("question.svg"), size)
}

/// Lightning bolt (battery charging).
pub fn bolt<Message: 'static>(size: IconSize) -> Element<'static, Message> {
    svg_icon(include_bytes!("bolt.svg"), size)
}

/// Power plug (on line power).
pub fn plug<Message: 'static>(size: IconSize) -> Element<'static, Message> {
    svg_icon(include_bytes!("plug.svg"), size)
}

/// Warning triangle (replace battery).
pub fn triangle_exclamation<Message: 'static>(size: IconSize) -> Element<'static, Message> {
    svg_icon(include_bytes!("triangle-exclamation.svg"), size)
}

/// Refresh arrows (device list reload).
pub fn arrows_rotate<Message: 'static>(size: IconSize) -> Element<'static, Message> {
    svg_icon(include_bytes!("arrows-rotate.svg"), size)
}

/// The icon for a classified UPS state, or `None` when the state shows none.
pub fn status_icon<Message: 'static>(
    status: UpsStatus,
    size: IconSize,
) -> Option<Element<'static, Message>> {
    match status.icon_name()? {
        "question" => Some(question(size)),
        "bolt" => Some(bolt(size)),
        "plug" => Some(plug(size)),
        "triangle-exclamation" => Some(triangle_exclamation(size)),
        _ => None,
    }
}
