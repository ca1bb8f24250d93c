use upsight_common::UpsSnapshot;

/// Messages for the Upsight application.
#[derive(Debug, Clone)]
pub enum Message {
    /// A variable snapshot arrived from the bridge (wholesale replacement).
    VarsReceived(UpsSnapshot),

    /// Zenoh connection established.
    Connected,

    /// Zenoh connection lost or failed.
    Disconnected(String),

    /// User toggled the detail table under the battery widget.
    ToggleDetails,

    /// User dismissed the warning banner.
    DismissWarning,

    /// User requested a refresh of the UPS device list.
    RefreshUpsList,

    /// A listUPS query completed.
    UpsListLoaded(Vec<String>),

    /// A listUPS query failed (warning surfaced, list collapses to the
    /// configured device).
    UpsListFailed(String),

    // Settings messages
    /// Open the settings pane.
    OpenSettings,

    /// Close the settings pane, discarding edits.
    CloseSettings,

    /// User picked a UPS device from the list.
    SelectUps(String),

    /// Set the NUT server host.
    SetHost(String),

    /// Set the NUT server port.
    SetPort(String),

    /// Toggle authentication.
    SetAuth(bool),

    /// Set the username.
    SetUsername(String),

    /// Set the password.
    SetPassword(String),

    /// Set the low battery threshold.
    SetBatteryLow(String),

    /// Set the high battery threshold.
    SetBatteryHigh(String),

    /// Apply the edited settings.
    ApplySettings,
}
