//! Pure derivation of the widget's visual values from a snapshot.
//!
//! The frontend renders exactly what these functions return; they carry the
//! whole presentation contract and are tested without any UI in the loop.

use serde::{Deserialize, Serialize};

use crate::status::UpsStatus;
use crate::telemetry::UpsSnapshot;

/// Fraction of the battery glyph's width available to the charge bar.
///
/// Layout constant of the widget artwork, not derived from data.
pub const BAR_TRACK_FRACTION: f32 = 0.73;

/// Battery charge thresholds in percent.
///
/// `low < high` is assumed from the settings UI but not enforced here;
/// `low == high` simply leaves no orange band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub low: i64,
    pub high: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { low: 25, high: 70 }
    }
}

/// Color of the charge bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarColor {
    Green,
    Orange,
    Red,
}

impl BarColor {
    /// CSS-style color name, used in logs and tests.
    pub fn as_str(&self) -> &'static str {
        match self {
            BarColor::Green => "green",
            BarColor::Orange => "orange",
            BarColor::Red => "red",
        }
    }
}

/// Derived style of the charge bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryBar {
    /// Filled fraction of the widget width (percent scaled to the track).
    pub width_fraction: f32,
    /// Threshold-derived color.
    pub color: BarColor,
}

/// Derive the charge bar style from a percentage and thresholds.
///
/// Boundary semantics: a percent equal to `high` is green, equal to `low`
/// is red, strictly between is orange.
pub fn battery_bar(percent: i64, thresholds: Thresholds) -> BatteryBar {
    let color = if percent >= thresholds.high {
        BarColor::Green
    } else if percent > thresholds.low && percent < thresholds.high {
        BarColor::Orange
    } else {
        BarColor::Red
    };

    BatteryBar {
        width_fraction: percent as f32 / 100.0 * BAR_TRACK_FRACTION,
        color,
    }
}

/// Derive the charge bar from a snapshot; a missing or unparseable charge
/// renders as 0%, never as an error.
pub fn battery_bar_for(snapshot: &UpsSnapshot, thresholds: Thresholds) -> BatteryBar {
    battery_bar(snapshot.charge_percent().unwrap_or(0), thresholds)
}

/// One label/value row of the detail table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopoverRow {
    pub label: &'static str,
    pub value: String,
}

impl PopoverRow {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// Derive the detail table rows, in render order.
///
/// A `Status` row is always present. Charge and runtime rows are shown only
/// when the UPS is not offline and the variable is available. Runtime is
/// integer minutes, truncating.
pub fn popover_rows(snapshot: &UpsSnapshot) -> Vec<PopoverRow> {
    let status = UpsStatus::from_snapshot(snapshot);
    let mut rows = vec![PopoverRow::new("Status", status.label())];

    if status != UpsStatus::Offline {
        if let Some(charge) = snapshot.charge_percent() {
            rows.push(PopoverRow::new("Charge", format!("{}%", charge)));
        }

        if let Some(runtime) = snapshot.runtime_secs() {
            rows.push(PopoverRow::new("Runtime", format!("{} min", runtime / 60)));
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn snapshot(pairs: &[(&str, &str)]) -> UpsSnapshot {
        UpsSnapshot::from_vars(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        )
    }

    #[test]
    fn test_bar_boundaries() {
        let t = Thresholds { low: 25, high: 70 };

        assert_eq!(battery_bar(70, t).color, BarColor::Green);
        assert_eq!(battery_bar(100, t).color, BarColor::Green);
        assert_eq!(battery_bar(69, t).color, BarColor::Orange);
        assert_eq!(battery_bar(26, t).color, BarColor::Orange);
        assert_eq!(battery_bar(25, t).color, BarColor::Red);
        assert_eq!(battery_bar(0, t).color, BarColor::Red);
    }

    #[test]
    fn test_bar_width_fraction() {
        let t = Thresholds::default();

        assert_eq!(battery_bar(0, t).width_fraction, 0.0);
        assert_eq!(battery_bar(100, t).width_fraction, BAR_TRACK_FRACTION);

        let half = battery_bar(50, t).width_fraction;
        assert!((half - 0.365).abs() < 1e-6);
    }

    #[test]
    fn test_equal_thresholds_have_no_orange_band() {
        let t = Thresholds { low: 50, high: 50 };

        assert_eq!(battery_bar(50, t).color, BarColor::Green);
        assert_eq!(battery_bar(49, t).color, BarColor::Red);
        assert_eq!(battery_bar(51, t).color, BarColor::Green);
    }

    #[test]
    fn test_missing_charge_renders_as_zero() {
        let bar = battery_bar_for(&UpsSnapshot::empty(), Thresholds::default());

        assert_eq!(bar.width_fraction, 0.0);
        assert_eq!(bar.color, BarColor::Red);
    }

    #[test]
    fn test_popover_full_scenario() {
        // Charging at 87% with 20 min runtime left, thresholds 20/80.
        let snap = snapshot(&[
            ("ups.status", "OL CHRG"),
            ("battery.charge", "87"),
            ("battery.runtime", "1200"),
        ]);

        let bar = battery_bar_for(&snap, Thresholds { low: 20, high: 80 });
        assert_eq!(bar.color, BarColor::Green);

        let rows = popover_rows(&snap);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], PopoverRow::new("Status", "Charging"));
        assert_eq!(rows[1], PopoverRow::new("Charge", "87%"));
        assert_eq!(rows[2], PopoverRow::new("Runtime", "20 min"));
    }

    #[test]
    fn test_popover_offline_hides_detail_rows() {
        let snap = snapshot(&[
            ("ups.status", "OFFLINE"),
            ("battery.charge", "87"),
            ("battery.runtime", "1200"),
        ]);

        let rows = popover_rows(&snap);
        assert_eq!(rows, vec![PopoverRow::new("Status", "Offline")]);

        // Absent status key is offline too and equally terse.
        let rows = popover_rows(&UpsSnapshot::empty());
        assert_eq!(rows, vec![PopoverRow::new("Status", "Offline")]);
    }

    #[test]
    fn test_popover_runtime_truncates_minutes() {
        let snap = snapshot(&[("ups.status", "OB"), ("battery.runtime", "1230")]);

        let rows = popover_rows(&snap);
        assert_eq!(rows[0], PopoverRow::new("Status", "On Battery"));
        assert_eq!(rows[1], PopoverRow::new("Runtime", "20 min"));
    }

    #[test]
    fn test_popover_omits_unavailable_values() {
        let snap = snapshot(&[("ups.status", "OL"), ("battery.charge", "garbage")]);

        let rows = popover_rows(&snap);
        assert_eq!(rows, vec![PopoverRow::new("Status", "Online")]);
    }
}
