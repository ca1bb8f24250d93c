//! Settings pane for NUT connection and display thresholds.

use iced::widget::{
    Column, button, checkbox, column, container, pick_list, row, rule, scrollable, text,
    text_input,
};
use iced::{Alignment, Element, Length, Theme};

use upsight_common::UpsSettings;

use crate::message::Message;
use crate::view::icons::{self, IconSize};

/// Editable settings state.
///
/// All numeric fields are kept as strings while editing so partial input
/// never snaps back; validation happens on apply.
#[derive(Debug, Clone)]
pub struct SettingsState {
    /// NUT server hostname.
    pub host: String,
    /// NUT server port.
    pub port: String,
    /// Whether to authenticate against the NUT server.
    pub auth: bool,
    /// Username for authentication.
    pub username: String,
    /// Password for authentication.
    pub password: String,
    /// Selected UPS device name.
    pub ups: String,
    /// Battery percentage above which the bar turns green.
    pub battery_high: String,
    /// Battery percentage at or below which the bar turns red.
    pub battery_low: String,
    /// Whether settings have been modified.
    pub modified: bool,
    /// Last validation error (if any).
    pub error: Option<String>,
}

impl SettingsState {
    /// Create edit state from the saved configuration.
    pub fn from_settings(settings: &UpsSettings) -> Self {
        Self {
            host: settings.host.clone(),
            port: settings.port.to_string(),
            auth: settings.auth,
            username: settings.username.clone(),
            password: settings.password.clone(),
            ups: settings.ups.clone(),
            battery_high: settings.battery_high.to_string(),
            battery_low: settings.battery_low.to_string(),
            modified: false,
            error: None,
        }
    }

    /// Update the host field.
    pub fn set_host(&mut self, host: String) {
        self.host = host;
        self.touch();
    }

    /// Update the port field.
    pub fn set_port(&mut self, port: String) {
        self.port = port;
        self.touch();
    }

    /// Toggle authentication.
    pub fn set_auth(&mut self, auth: bool) {
        self.auth = auth;
        self.touch();
    }

    /// Update the username field.
    pub fn set_username(&mut self, username: String) {
        self.username = username;
        self.touch();
    }

    /// Update the password field.
    pub fn set_password(&mut self, password: String) {
        self.password = password;
        self.touch();
    }

    /// Select a UPS device.
    pub fn set_ups(&mut self, ups: String) {
        self.ups = ups;
        self.touch();
    }

    /// Update the low threshold field.
    pub fn set_battery_low(&mut self, value: String) {
        self.battery_low = value;
        self.touch();
    }

    /// Update the high threshold field.
    pub fn set_battery_high(&mut self, value: String) {
        self.battery_high = value;
        self.touch();
    }

    fn touch(&mut self) {
        self.modified = true;
        self.error = None;
    }

    /// Validate the edits and produce updated settings.
    ///
    /// The channel is carried over from the saved settings untouched; it
    /// is not editable from the pane.
    pub fn apply_to(&self, saved: &UpsSettings) -> Result<UpsSettings, String> {
        if self.host.trim().is_empty() {
            return Err("Host must not be empty".to_string());
        }

        let port: u16 = self
            .port
            .trim()
            .parse()
            .map_err(|_| "Port must be a number between 1 and 65535".to_string())?;
        if port == 0 {
            return Err("Port must be a number between 1 and 65535".to_string());
        }

        let battery_low: i64 = self
            .battery_low
            .trim()
            .parse()
            .map_err(|_| "Low battery threshold must be a number".to_string())?;
        let battery_high: i64 = self
            .battery_high
            .trim()
            .parse()
            .map_err(|_| "High battery threshold must be a number".to_string())?;

        if !(0..=100).contains(&battery_low) || !(0..=100).contains(&battery_high) {
            return Err("Battery thresholds must be between 0 and 100".to_string());
        }

        if battery_low >= battery_high {
            return Err("Low threshold must be below the high threshold".to_string());
        }

        Ok(UpsSettings {
            host: self.host.trim().to_string(),
            port,
            auth: self.auth,
            username: self.username.clone(),
            password: self.password.clone(),
            ups: self.ups.clone(),
            battery_high,
            battery_low,
            channel: saved.channel.clone(),
        })
    }
}

/// Render the settings pane.
pub fn settings_view<'a>(
    state: &'a SettingsState,
    ups_list: &'a [String],
    refreshing: bool,
) -> Element<'a, Message> {
    let header = render_header(state);
    let server_section = render_server_section(state);
    let device_section = render_device_section(state, ups_list, refreshing);
    let threshold_section = render_threshold_section(state);
    let actions = render_actions(state);

    let content = column![
        header,
        rule::horizontal(1),
        server_section,
        rule::horizontal(1),
        device_section,
        rule::horizontal(1),
        threshold_section,
        rule::horizontal(1),
        actions,
    ]
    .spacing(16)
    .padding(16);

    container(scrollable(content))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Render header with back button.
fn render_header(state: &SettingsState) -> Element<'_, Message> {
    let back_button = button(text("<- Back").size(14))
        .on_press(Message::CloseSettings)
        .style(iced::widget::button::secondary);

    let title = text("UPS Settings").size(22);

    let modified_indicator = if state.modified {
        text("(unsaved changes)")
            .size(12)
            .style(|_theme: &Theme| text::Style {
                color: Some(iced::Color::from_rgb(1.0, 0.7, 0.0)),
            })
    } else {
        text("")
    };

    row![back_button, title, modified_indicator]
        .spacing(12)
        .align_y(Alignment::Center)
        .into()
}

/// Render NUT server connection section.
fn render_server_section(state: &SettingsState) -> Element<'_, Message> {
    let section_title = text("NUT Server").size(16);

    let host_label = text("Host:").size(14);
    let host_input = text_input("localhost", &state.host)
        .on_input(Message::SetHost)
        .padding(8)
        .width(Length::Fixed(220.0));

    let port_label = text("Port:").size(14);
    let port_input = text_input("3493", &state.port)
        .on_input(Message::SetPort)
        .padding(8)
        .width(Length::Fixed(80.0));

    let address_row = row![host_label, host_input, port_label, port_input]
        .spacing(10)
        .align_y(Alignment::Center);

    let auth_check = checkbox(state.auth)
        .label("Authenticate")
        .on_toggle(Message::SetAuth);

    let mut section = column![section_title, address_row, auth_check].spacing(8);

    if state.auth {
        let username_input = text_input("username", &state.username)
            .on_input(Message::SetUsername)
            .padding(8)
            .width(Length::Fixed(220.0));

        let password_input = text_input("password", &state.password)
            .on_input(Message::SetPassword)
            .secure(true)
            .padding(8)
            .width(Length::Fixed(220.0));

        section = section.push(
            row![text("Username:").size(14), username_input]
                .spacing(10)
                .align_y(Alignment::Center),
        );
        section = section.push(
            row![text("Password:").size(14), password_input]
                .spacing(10)
                .align_y(Alignment::Center),
        );
    }

    section.into()
}

/// Render UPS device picker with refresh.
fn render_device_section<'a>(
    state: &'a SettingsState,
    ups_list: &'a [String],
    refreshing: bool,
) -> Element<'a, Message> {
    let section_title = text("UPS Device").size(16);

    let picker = pick_list(ups_list, Some(state.ups.clone()), Message::SelectUps)
        .placeholder("Select UPS")
        .width(Length::Fixed(220.0));

    let refresh_button = if refreshing {
        button(text("Refreshing...").size(14)).style(iced::widget::button::secondary)
    } else {
        let label = row![
            icons::arrows_rotate(IconSize::Small),
            text("Refresh").size(14),
        ]
        .spacing(6)
        .align_y(Alignment::Center);

        button(label)
            .on_press(Message::RefreshUpsList)
            .style(iced::widget::button::secondary)
    };

    let picker_row = row![picker, refresh_button]
        .spacing(10)
        .align_y(Alignment::Center);

    let help = text("Devices reported by the NUT server; refresh queries the server again")
        .size(11)
        .style(|_theme: &Theme| text::Style {
            color: Some(iced::Color::from_rgb(0.5, 0.5, 0.5)),
        });

    column![section_title, picker_row, help].spacing(8).into()
}

/// Render battery threshold section.
fn render_threshold_section(state: &SettingsState) -> Element<'_, Message> {
    let section_title = text("Battery Thresholds").size(16);

    let low_input = text_input("25", &state.battery_low)
        .on_input(Message::SetBatteryLow)
        .padding(8)
        .width(Length::Fixed(80.0));

    let high_input = text_input("70", &state.battery_high)
        .on_input(Message::SetBatteryHigh)
        .padding(8)
        .width(Length::Fixed(80.0));

    let threshold_row = row![
        text("Low (%):").size(14),
        low_input,
        text("High (%):").size(14),
        high_input,
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let help = text("Bar turns red at or below low, green at or above high")
        .size(11)
        .style(|_theme: &Theme| text::Style {
            color: Some(iced::Color::from_rgb(0.5, 0.5, 0.5)),
        });

    column![section_title, threshold_row, help].spacing(8).into()
}

/// Render apply button and validation message.
fn render_actions(state: &SettingsState) -> Element<'_, Message> {
    let mut content = Column::new().spacing(10);

    if let Some(error) = &state.error {
        let error_text = text(format!("Error: {}", error))
            .size(14)
            .style(|_theme: &Theme| text::Style {
                color: Some(iced::Color::from_rgb(1.0, 0.3, 0.3)),
            });
        content = content.push(error_text);
    }

    let apply_button = button(text("Apply").size(14))
        .on_press(Message::ApplySettings)
        .style(iced::widget::button::primary);

    content = content.push(apply_button);
    content.into()
}
