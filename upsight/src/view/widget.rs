//! The battery widget: classification icon plus color-coded charge bar.

use iced::widget::{button, container, row, text};
use iced::{Alignment, Element, Length, Theme};

use upsight_common::{Thresholds, UpsSnapshot, UpsStatus, battery_bar_for};

use crate::message::Message;
use crate::view::icons::{self, IconSize};
use crate::view::theme;

/// Height of the charge bar.
const BAR_HEIGHT: f32 = 14.0;

/// Render the battery widget for a snapshot.
///
/// Clicking the widget toggles the detail table.
pub fn battery_widget<'a>(snapshot: &UpsSnapshot, thresholds: Thresholds) -> Element<'a, Message> {
    let status = UpsStatus::from_snapshot(snapshot);
    let bar = battery_bar_for(snapshot, thresholds);
    let bar_color = bar.color;

    // Filled and empty track portions; the track itself covers the whole
    // glyph width, so the fraction already includes the track scaling.
    let filled_portion = (bar.width_fraction * 100.0).round() as u16;
    let empty_portion = 100u16.saturating_sub(filled_portion);

    let mut track = iced::widget::Row::new().width(Length::Fill);
    if filled_portion > 0 {
        track = track.push(
            container(text(""))
                .width(Length::FillPortion(filled_portion))
                .height(Length::Fixed(BAR_HEIGHT))
                .style(move |t: &Theme| container::Style {
                    background: Some(iced::Background::Color(
                        theme::colors(t).bar_color(bar_color),
                    )),
                    ..Default::default()
                }),
        );
    }
    if empty_portion > 0 {
        track = track.push(
            container(text(""))
                .width(Length::FillPortion(empty_portion))
                .height(Length::Fixed(BAR_HEIGHT))
                .style(|t: &Theme| container::Style {
                    background: Some(iced::Background::Color(theme::colors(t).row_background())),
                    ..Default::default()
                }),
        );
    }

    let body = container(track)
        .width(Length::Fixed(120.0))
        .style(|t: &Theme| container::Style {
            border: iced::Border {
                color: theme::colors(t).border(),
                width: 1.0,
                radius: 3.0.into(),
            },
            ..Default::default()
        });

    let mut content = iced::widget::Row::new()
        .spacing(8)
        .align_y(Alignment::Center);

    if let Some(icon) = icons::status_icon(status, IconSize::Medium) {
        content = content.push(icon);
    }
    content = content.push(body);

    button(content)
        .on_press(Message::ToggleDetails)
        .style(button::text)
        .into()
}

/// One-line connection indicator next to the widget.
pub fn connection_indicator<'a>(connected: bool) -> Element<'a, Message> {
    let (label, style): (&str, fn(&Theme) -> text::Style) = if connected {
        ("Connected", |t| text::Style {
            color: Some(theme::colors(t).status_connected()),
        })
    } else {
        ("Disconnected", |t| text::Style {
            color: Some(theme::colors(t).status_disconnected()),
        })
    };

    row![text(label).size(11).style(style)]
        .align_y(Alignment::Center)
        .into()
}
