//! UI tests using iced_test Simulator.
//!
//! These tests verify the widget behavior without a Zenoh session or a
//! running NUT bridge.

use iced_test::simulator;

use upsight::app::Upsight;
use upsight::config::AppConfig;
use upsight::message::Message;
use upsight::view::details::details_view;
use upsight::view::settings::{SettingsState, settings_view};

use upsight_common::{UpsSettings, UpsSnapshot};

fn snapshot(vars: &[(&str, &str)]) -> UpsSnapshot {
    UpsSnapshot::from_vars(
        vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

fn app_with(vars: &[(&str, &str)]) -> Upsight {
    let mut config = AppConfig::default();
    config.ups.ups = "apc1500".to_string();
    let mut app = Upsight::boot(config).0;
    let _ = app.update(Message::VarsReceived(snapshot(vars)));
    app
}

/// Charging UPS shows status, charge and runtime rows.
#[test]
fn test_details_charging() {
    let snap = snapshot(&[
        ("ups.status", "OL CHRG"),
        ("battery.charge", "87"),
        ("battery.runtime", "1200"),
    ]);
    let mut ui = simulator(details_view(&snap));

    assert!(ui.find("Status").is_ok());
    assert!(ui.find("Charging").is_ok());
    assert!(ui.find("87%").is_ok());
    assert!(ui.find("20 min").is_ok());
}

/// An offline UPS shows only the status row.
#[test]
fn test_details_offline() {
    let snap = snapshot(&[("battery.charge", "87")]);
    let mut ui = simulator(details_view(&snap));

    assert!(ui.find("Offline").is_ok());
    assert!(ui.find("Charge").is_err());
    assert!(ui.find("Runtime").is_err());
}

/// Unparseable numerics are treated as absent, not rendered.
#[test]
fn test_details_skips_bad_numerics() {
    let snap = snapshot(&[
        ("ups.status", "OB"),
        ("battery.charge", "not-a-number"),
        ("battery.runtime", "600"),
    ]);
    let mut ui = simulator(details_view(&snap));

    assert!(ui.find("On Battery").is_ok());
    assert!(ui.find("Charge").is_err());
    assert!(ui.find("10 min").is_ok());
}

/// Settings pane renders its sections.
#[test]
fn test_settings_view_renders() {
    let state = SettingsState::from_settings(&UpsSettings::default());
    let ups_list = vec!["ups".to_string()];
    let mut ui = simulator(settings_view(&state, &ups_list, false));

    assert!(ui.find("UPS Settings").is_ok());
    assert!(ui.find("NUT Server").is_ok());
    assert!(ui.find("UPS Device").is_ok());
    assert!(ui.find("Battery Thresholds").is_ok());
    assert!(ui.find("Apply").is_ok());
}

/// Username and password fields appear only when auth is enabled.
#[test]
fn test_settings_auth_fields() {
    let mut state = SettingsState::from_settings(&UpsSettings::default());
    let ups_list = vec!["ups".to_string()];

    {
        let mut ui = simulator(settings_view(&state, &ups_list, false));
        assert!(ui.find("Username:").is_err());
    }

    state.set_auth(true);
    let mut ui = simulator(settings_view(&state, &ups_list, false));
    assert!(ui.find("Username:").is_ok());
    assert!(ui.find("Password:").is_ok());
}

/// Clicking Apply produces ApplySettings.
#[test]
fn test_settings_apply_button() {
    let state = SettingsState::from_settings(&UpsSettings::default());
    let ups_list = vec!["ups".to_string()];
    let mut ui = simulator(settings_view(&state, &ups_list, false));

    let _ = ui.click("Apply");

    let messages: Vec<Message> = ui.into_messages().collect();
    assert!(messages.iter().any(|m| matches!(m, Message::ApplySettings)));
}

/// Clicking Refresh produces RefreshUpsList; while in flight the button
/// is replaced and cannot fire again.
#[test]
fn test_settings_refresh_button() {
    let state = SettingsState::from_settings(&UpsSettings::default());
    let ups_list = vec!["ups".to_string()];

    let mut ui = simulator(settings_view(&state, &ups_list, false));
    let _ = ui.click("Refresh");
    let messages: Vec<Message> = ui.into_messages().collect();
    assert!(
        messages
            .iter()
            .any(|m| matches!(m, Message::RefreshUpsList))
    );

    let mut ui = simulator(settings_view(&state, &ups_list, true));
    assert!(ui.find("Refreshing...").is_ok());
    assert!(ui.find("Refresh").is_err());
}

/// Clicking Back produces CloseSettings.
#[test]
fn test_settings_back_button() {
    let state = SettingsState::from_settings(&UpsSettings::default());
    let ups_list = vec!["ups".to_string()];
    let mut ui = simulator(settings_view(&state, &ups_list, false));

    let _ = ui.click("<- Back");

    let messages: Vec<Message> = ui.into_messages().collect();
    assert!(messages.iter().any(|m| matches!(m, Message::CloseSettings)));
}

/// The main view offers a Settings button.
#[test]
fn test_main_view_settings_button() {
    let app = app_with(&[("ups.status", "OL"), ("battery.charge", "100")]);
    let mut ui = simulator(app.view());

    let _ = ui.click("Settings");

    let messages: Vec<Message> = ui.into_messages().collect();
    assert!(messages.iter().any(|m| matches!(m, Message::OpenSettings)));
}

/// A failed device list refresh surfaces a dismissible warning banner.
#[test]
fn test_warning_banner() {
    let mut app = app_with(&[("ups.status", "OL")]);
    let _ = app.update(Message::UpsListFailed("connection refused".to_string()));

    let mut ui = simulator(app.view());
    assert!(
        ui.find("Could not list UPS devices: connection refused")
            .is_ok()
    );

    let _ = ui.click("x");
    let messages: Vec<Message> = ui.into_messages().collect();
    assert!(messages.iter().any(|m| matches!(m, Message::DismissWarning)));
}

/// Dismissing the warning removes the banner.
#[test]
fn test_warning_dismissed() {
    let mut app = app_with(&[("ups.status", "OL")]);
    let _ = app.update(Message::UpsListFailed("timed out".to_string()));
    let _ = app.update(Message::DismissWarning);

    let mut ui = simulator(app.view());
    assert!(ui.find("Could not list UPS devices").is_err());
}

/// Toggling details from the main view shows and hides the table.
#[test]
fn test_details_toggle() {
    let mut app = app_with(&[("ups.status", "OL"), ("battery.charge", "55")]);

    {
        let mut ui = simulator(app.view());
        assert!(ui.find("Status").is_err());
    }

    let _ = app.update(Message::ToggleDetails);
    let mut ui = simulator(app.view());
    assert!(ui.find("Status").is_ok());
    assert!(ui.find("55%").is_ok());
}
