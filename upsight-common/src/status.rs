//! UPS status classification.
//!
//! Both the navbar icon and the detail table derive from one classification
//! of the `ups.status` flags, so the two can never disagree.

use crate::telemetry::{StatusFlags, UpsSnapshot};

/// Classified UPS state, in the priority order used for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpsStatus {
    /// The UPS is unreachable (OFFLINE flag, or no status at all).
    Offline,
    /// On line power and charging the battery (CHRG).
    Charging,
    /// On line power (OL).
    Online,
    /// Running on battery (OB).
    OnBattery,
    /// Battery needs replacement (RB).
    ReplaceBattery,
    /// Status reported but no recognized flag.
    Unknown,
}

impl UpsStatus {
    /// Classify a parsed flag set.
    ///
    /// The flags are not mutually exclusive ("OL CHRG" is common), so the
    /// first match in priority order wins: OFFLINE, CHRG, OL, OB, RB.
    pub fn from_flags(flags: &StatusFlags) -> Self {
        if flags.contains("OFFLINE") {
            UpsStatus::Offline
        } else if flags.contains("CHRG") {
            UpsStatus::Charging
        } else if flags.contains("OL") {
            UpsStatus::Online
        } else if flags.contains("OB") {
            UpsStatus::OnBattery
        } else if flags.contains("RB") {
            UpsStatus::ReplaceBattery
        } else {
            UpsStatus::Unknown
        }
    }

    /// Classify a snapshot.
    ///
    /// A snapshot without any `ups.status` key classifies as [`UpsStatus::Offline`].
    /// This differs from a present-but-unrecognized status, which classifies
    /// as [`UpsStatus::Unknown`].
    pub fn from_snapshot(snapshot: &UpsSnapshot) -> Self {
        match snapshot.status_flags() {
            Some(flags) => Self::from_flags(&flags),
            None => UpsStatus::Offline,
        }
    }

    /// Human-readable label shown in the detail table.
    pub fn label(&self) -> &'static str {
        match self {
            UpsStatus::Offline => "Offline",
            UpsStatus::Charging => "Charging",
            UpsStatus::Online => "Online",
            UpsStatus::OnBattery => "On Battery",
            UpsStatus::ReplaceBattery => "Replace Battery",
            UpsStatus::Unknown => "Unknown",
        }
    }

    /// Icon name for this state, or `None` when no icon is shown.
    pub fn icon_name(&self) -> Option<&'static str> {
        match self {
            UpsStatus::Offline => Some("question"),
            UpsStatus::Charging => Some("bolt"),
            UpsStatus::Online => Some("plug"),
            UpsStatus::OnBattery => None,
            UpsStatus::ReplaceBattery => Some("triangle-exclamation"),
            UpsStatus::Unknown => None,
        }
    }
}

impl std::fmt::Display for UpsStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn classify(status: &str) -> UpsStatus {
        UpsStatus::from_flags(&StatusFlags::parse(status))
    }

    #[test]
    fn test_priority_order() {
        // CHRG is checked before OL even though both are present.
        assert_eq!(classify("OL CHRG"), UpsStatus::Charging);
        assert_eq!(classify("CHRG OL"), UpsStatus::Charging);
        // OFFLINE beats everything.
        assert_eq!(classify("OL OFFLINE CHRG"), UpsStatus::Offline);
        // OB beats RB.
        assert_eq!(classify("RB OB"), UpsStatus::OnBattery);
    }

    #[test]
    fn test_single_flags() {
        assert_eq!(classify("OFFLINE"), UpsStatus::Offline);
        assert_eq!(classify("CHRG"), UpsStatus::Charging);
        assert_eq!(classify("OL"), UpsStatus::Online);
        assert_eq!(classify("OB"), UpsStatus::OnBattery);
        assert_eq!(classify("RB"), UpsStatus::ReplaceBattery);
    }

    #[test]
    fn test_unrecognized_tokens_fall_through() {
        assert_eq!(classify("XYZ"), UpsStatus::Unknown);
        assert_eq!(classify(""), UpsStatus::Unknown);
        // Unrecognized tokens alongside a recognized one are ignored.
        assert_eq!(classify("LB OL"), UpsStatus::Online);
    }

    #[test]
    fn test_absent_status_key_is_offline_not_unknown() {
        let absent = UpsSnapshot::empty();
        assert_eq!(UpsStatus::from_snapshot(&absent), UpsStatus::Offline);

        let present = UpsSnapshot::from_vars(HashMap::from([(
            "ups.status".to_string(),
            "XYZ".to_string(),
        )]));
        assert_eq!(UpsStatus::from_snapshot(&present), UpsStatus::Unknown);

        // The two cases stay observably distinct downstream.
        assert_ne!(
            UpsStatus::Offline.icon_name(),
            UpsStatus::Unknown.icon_name()
        );
        assert_ne!(UpsStatus::Offline.label(), UpsStatus::Unknown.label());
    }

    #[test]
    fn test_icon_names() {
        assert_eq!(UpsStatus::Offline.icon_name(), Some("question"));
        assert_eq!(UpsStatus::Charging.icon_name(), Some("bolt"));
        assert_eq!(UpsStatus::Online.icon_name(), Some("plug"));
        assert_eq!(UpsStatus::OnBattery.icon_name(), None);
        assert_eq!(
            UpsStatus::ReplaceBattery.icon_name(),
            Some("triangle-exclamation")
        );
        assert_eq!(UpsStatus::Unknown.icon_name(), None);
    }
}
