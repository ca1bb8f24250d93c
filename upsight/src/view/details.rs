//! Detail table shown under the battery widget.

use iced::widget::{Column, container, row, text};
use iced::{Element, Length, Theme};

use upsight_common::{UpsSnapshot, popover_rows};

use crate::message::Message;
use crate::view::theme;

/// Render the status detail table for a snapshot.
///
/// Rows come straight from the derivation in upsight-common, in order:
/// always a Status row, then charge and runtime when available.
pub fn details_view<'a>(snapshot: &UpsSnapshot) -> Element<'a, Message> {
    let mut table = Column::new().spacing(2).width(Length::Fill);

    for popover_row in popover_rows(snapshot) {
        table = table.push(
            container(
                row![
                    text(popover_row.label).size(12).width(Length::Fixed(70.0)),
                    text(popover_row.value).size(12).style(|t: &Theme| text::Style {
                        color: Some(theme::colors(t).text_muted()),
                    }),
                ]
                .spacing(10),
            )
            .padding([2, 8])
            .style(|t: &Theme| container::Style {
                background: Some(iced::Background::Color(theme::colors(t).row_background())),
                ..Default::default()
            }),
        );
    }

    container(table)
        .width(Length::Fixed(220.0))
        .padding(4)
        .style(|t: &Theme| container::Style {
            background: Some(iced::Background::Color(
                theme::colors(t).section_background(),
            )),
            border: iced::Border {
                color: theme::colors(t).border(),
                width: 1.0,
                radius: 4.0.into(),
            },
            ..Default::default()
        })
        .into()
}
