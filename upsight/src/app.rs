//! Upsight Iced application.

use iced::widget::{Column, button, container, row, text};
use iced::{Alignment, Element, Length, Subscription, Task, Theme};

use upsight_common::{ListUpsRequest, UpsSnapshot};

use crate::config::AppConfig;
use crate::message::Message;
use crate::subscription::zenoh_subscription;
use crate::upslist::fetch_ups_list;
use crate::view::settings::{SettingsState, settings_view};
use crate::view::theme;
use crate::view::widget::{battery_widget, connection_indicator};

/// The main Upsight application.
pub struct Upsight {
    /// Application configuration (UPS settings are updated on apply).
    config: AppConfig,
    /// Latest variable snapshot from the bridge.
    snapshot: UpsSnapshot,
    /// Whether the Zenoh subscriber is live.
    connected: bool,
    /// Whether the detail table is expanded.
    show_details: bool,
    /// Settings pane edit state, when open.
    settings: Option<SettingsState>,
    /// Known UPS device names, seeded with the configured one.
    ups_list: Vec<String>,
    /// Whether a listUPS refresh is in flight.
    refreshing: bool,
    /// Warning banner text, at most one at a time.
    warning: Option<String>,
}

impl Upsight {
    /// Boot the application (called by iced::application).
    pub fn boot(config: AppConfig) -> (Self, Task<Message>) {
        let ups_list = vec![config.ups.ups.clone()];

        let app = Self {
            config,
            snapshot: UpsSnapshot::empty(),
            connected: false,
            show_details: false,
            settings: None,
            ups_list,
            refreshing: false,
            warning: None,
        };

        (app, Task::none())
    }

    /// Get the window title.
    pub fn title(&self) -> String {
        if self.config.ups.ups.is_empty() {
            "Upsight".to_string()
        } else {
            format!("Upsight - {}", self.config.ups.ups)
        }
    }

    /// Handle incoming messages.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::VarsReceived(snapshot) => {
                // Wholesale replacement: stale keys never linger.
                self.snapshot = snapshot;
            }

            Message::Connected => {
                tracing::info!("Connected to Zenoh");
                self.connected = true;
            }

            Message::Disconnected(error) => {
                tracing::warn!(error = %error, "Disconnected from Zenoh");
                self.connected = false;
            }

            Message::ToggleDetails => {
                self.show_details = !self.show_details;
            }

            Message::DismissWarning => {
                self.warning = None;
            }

            Message::RefreshUpsList => {
                if !self.refreshing {
                    self.refreshing = true;
                    let request = self.listups_request();
                    let zenoh = self.config.zenoh.clone();
                    let channel = self.config.ups.channel.clone();
                    return Task::perform(
                        fetch_ups_list(zenoh, channel, request),
                        |result| match result {
                            Ok(devices) => Message::UpsListLoaded(devices),
                            Err(e) => Message::UpsListFailed(e.to_string()),
                        },
                    );
                }
            }

            Message::UpsListLoaded(devices) => {
                self.refreshing = false;
                self.ups_list = devices;
            }

            Message::UpsListFailed(error) => {
                tracing::warn!(error = %error, "listUPS query failed");
                self.refreshing = false;
                // Collapse to the one device we know about.
                self.ups_list = vec![self.config.ups.ups.clone()];
                self.warning = Some(format!("Could not list UPS devices: {}", error));
            }

            Message::OpenSettings => {
                self.settings = Some(SettingsState::from_settings(&self.config.ups));
            }

            Message::CloseSettings => {
                self.settings = None;
            }

            Message::SelectUps(ups) => {
                if let Some(state) = &mut self.settings {
                    state.set_ups(ups);
                }
            }

            Message::SetHost(host) => {
                if let Some(state) = &mut self.settings {
                    state.set_host(host);
                }
            }

            Message::SetPort(port) => {
                if let Some(state) = &mut self.settings {
                    state.set_port(port);
                }
            }

            Message::SetAuth(auth) => {
                if let Some(state) = &mut self.settings {
                    state.set_auth(auth);
                }
            }

            Message::SetUsername(username) => {
                if let Some(state) = &mut self.settings {
                    state.set_username(username);
                }
            }

            Message::SetPassword(password) => {
                if let Some(state) = &mut self.settings {
                    state.set_password(password);
                }
            }

            Message::SetBatteryLow(value) => {
                if let Some(state) = &mut self.settings {
                    state.set_battery_low(value);
                }
            }

            Message::SetBatteryHigh(value) => {
                if let Some(state) = &mut self.settings {
                    state.set_battery_high(value);
                }
            }

            Message::ApplySettings => {
                if let Some(state) = &mut self.settings {
                    match state.apply_to(&self.config.ups) {
                        Ok(updated) => {
                            tracing::info!(ups = %updated.ups, host = %updated.host, "Settings applied");
                            self.config.ups = updated;
                            self.settings = None;
                        }
                        Err(error) => {
                            state.error = Some(error);
                        }
                    }
                }
            }
        }

        Task::none()
    }

    /// Subscribe to snapshot publications for the configured channel.
    pub fn subscription(&self) -> Subscription<Message> {
        zenoh_subscription(self.config.zenoh.clone(), self.config.ups.channel.clone())
    }

    /// Render the view.
    pub fn view(&self) -> Element<'_, Message> {
        if let Some(state) = &self.settings {
            return settings_view(state, &self.ups_list, self.refreshing);
        }

        let mut content = Column::new().spacing(8).padding(12);

        if let Some(warning) = &self.warning {
            content = content.push(warning_banner(warning));
        }

        let settings_button = button(text("Settings").size(12))
            .on_press(Message::OpenSettings)
            .style(iced::widget::button::secondary);

        let header = row![
            battery_widget(&self.snapshot, self.config.ups.thresholds()),
            settings_button,
        ]
        .spacing(12)
        .align_y(Alignment::Center);

        content = content.push(header);
        content = content.push(connection_indicator(self.connected));

        if self.show_details {
            content = content.push(crate::view::details::details_view(&self.snapshot));
        }

        container(content).width(Length::Fill).into()
    }

    /// Get the application theme.
    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    /// Current UPS device list.
    pub fn ups_list(&self) -> &[String] {
        &self.ups_list
    }

    /// Current warning banner text, if any.
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    /// Latest snapshot.
    pub fn snapshot(&self) -> &UpsSnapshot {
        &self.snapshot
    }

    /// Build the listUPS request from the pane edits when open, otherwise
    /// from the saved settings. Unparseable edits fall back to the saved
    /// value so a half-typed port never blocks a refresh.
    fn listups_request(&self) -> ListUpsRequest {
        let saved = &self.config.ups;
        match &self.settings {
            Some(state) => ListUpsRequest {
                host: if state.host.trim().is_empty() {
                    saved.host.clone()
                } else {
                    state.host.trim().to_string()
                },
                port: state.port.trim().parse().unwrap_or(saved.port),
                auth: state.auth,
                username: state.username.clone(),
                password: state.password.clone(),
            },
            None => ListUpsRequest::from(saved),
        }
    }
}

/// Dismissible warning banner.
fn warning_banner(message: &str) -> Element<'_, Message> {
    container(
        row![
            text(message).size(12).style(|t: &Theme| text::Style {
                color: Some(theme::colors(t).warning()),
            }),
            button(text("x").size(12))
                .on_press(Message::DismissWarning)
                .style(iced::widget::button::text),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
    )
    .padding([4, 8])
    .width(Length::Fill)
    .style(|t: &Theme| container::Style {
        background: Some(iced::Background::Color(theme::colors(t).warning_background())),
        border: iced::Border {
            color: theme::colors(t).warning(),
            width: 1.0,
            radius: 3.0.into(),
        },
        ..Default::default()
    })
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boot_app() -> Upsight {
        let mut config = AppConfig::default();
        config.ups.ups = "apc1500".to_string();
        Upsight::boot(config).0
    }

    #[test]
    fn test_boot_seeds_device_list() {
        let app = boot_app();
        assert_eq!(app.ups_list(), ["apc1500".to_string()]);
        assert!(app.warning().is_none());
    }

    #[test]
    fn test_snapshot_is_replaced_wholesale() {
        let mut app = boot_app();

        let first = UpsSnapshot::from_vars(
            [
                ("ups.status".to_string(), "OL".to_string()),
                ("battery.charge".to_string(), "90".to_string()),
            ]
            .into(),
        );
        let _ = app.update(Message::VarsReceived(first));
        assert_eq!(app.snapshot().get("battery.charge"), Some("90"));

        // Next snapshot drops battery.charge; the old value must not survive.
        let second =
            UpsSnapshot::from_vars([("ups.status".to_string(), "OB".to_string())].into());
        let _ = app.update(Message::VarsReceived(second));
        assert_eq!(app.snapshot().get("battery.charge"), None);
        assert_eq!(app.snapshot().get("ups.status"), Some("OB"));
    }

    #[test]
    fn test_failed_refresh_collapses_list_with_one_warning() {
        let mut app = boot_app();

        let _ = app.update(Message::UpsListLoaded(vec![
            "apc1500".to_string(),
            "eaton5s".to_string(),
        ]));
        assert_eq!(app.ups_list().len(), 2);

        let _ = app.update(Message::UpsListFailed("connection refused".to_string()));
        assert_eq!(app.ups_list(), ["apc1500".to_string()]);
        let warning = app.warning().unwrap().to_string();
        assert!(warning.contains("connection refused"));

        // A second failure still leaves exactly one warning.
        let _ = app.update(Message::UpsListFailed("timed out".to_string()));
        assert!(app.warning().is_some());
        assert_eq!(app.ups_list().len(), 1);
    }

    #[test]
    fn test_apply_settings_updates_config() {
        let mut app = boot_app();

        let _ = app.update(Message::OpenSettings);
        let _ = app.update(Message::SetHost("nut.lan".to_string()));
        let _ = app.update(Message::SetBatteryLow("20".to_string()));
        let _ = app.update(Message::SetBatteryHigh("80".to_string()));
        let _ = app.update(Message::ApplySettings);

        assert!(app.settings.is_none());
        assert_eq!(app.config.ups.host, "nut.lan");
        assert_eq!(app.config.ups.thresholds().low, 20);
        assert_eq!(app.config.ups.thresholds().high, 80);
    }

    #[test]
    fn test_invalid_settings_stay_open_with_error() {
        let mut app = boot_app();

        let _ = app.update(Message::OpenSettings);
        let _ = app.update(Message::SetPort("not-a-port".to_string()));
        let _ = app.update(Message::ApplySettings);

        let state = app.settings.as_ref().unwrap();
        assert!(state.error.is_some());
        // Saved config untouched.
        assert_eq!(app.config.ups.port, 3493);
    }
}
