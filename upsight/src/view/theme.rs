//! Theme-aware color palette for the widget.
//!
//! Semantic colors that adapt to the current theme; use these instead of
//! hardcoded Color::from_rgb() values in the views.

use iced::{Color, Theme};

use upsight_common::BarColor;

/// Get colors from the theme's extended palette.
pub struct ThemeColors<'a> {
    theme: &'a Theme,
}

impl<'a> ThemeColors<'a> {
    /// Create a new ThemeColors from a theme reference.
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn palette(&self) -> &iced::theme::palette::Extended {
        self.theme.extended_palette()
    }

    /// Primary text color.
    pub fn text(&self) -> Color {
        self.palette().background.base.text
    }

    /// Muted/secondary text color.
    pub fn text_muted(&self) -> Color {
        self.palette().background.weak.text
    }

    /// Default border color.
    pub fn border(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.25, 0.25, 0.3)
        } else {
            Color::from_rgb(0.8, 0.8, 0.82)
        }
    }

    /// Row/list item background.
    pub fn row_background(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.13, 0.13, 0.15)
        } else {
            Color::from_rgb(0.98, 0.98, 0.99)
        }
    }

    /// Section/panel background.
    pub fn section_background(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.12, 0.12, 0.14)
        } else {
            Color::from_rgb(0.96, 0.96, 0.97)
        }
    }

    /// Warning banner background.
    pub fn warning_background(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.18, 0.16, 0.1)
        } else {
            Color::from_rgb(1.0, 0.99, 0.95)
        }
    }

    /// Warning color (amber/orange).
    pub fn warning(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.9, 0.7, 0.2)
        } else {
            Color::from_rgb(0.8, 0.6, 0.0)
        }
    }

    /// Connected/online status.
    pub fn status_connected(&self) -> Color {
        Color::from_rgb(0.2, 0.8, 0.2)
    }

    /// Disconnected/offline status.
    pub fn status_disconnected(&self) -> Color {
        Color::from_rgb(0.8, 0.2, 0.2)
    }

    /// Color of the battery charge bar (consistent across themes).
    pub fn bar_color(&self, color: BarColor) -> Color {
        match color {
            BarColor::Green => Color::from_rgb(0.2, 0.8, 0.3),
            BarColor::Orange => Color::from_rgb(0.95, 0.6, 0.1),
            BarColor::Red => Color::from_rgb(0.9, 0.2, 0.2),
        }
    }

    /// Check if the current theme is dark.
    pub fn is_dark(&self) -> bool {
        self.palette().is_dark
    }
}

/// Convenience function to create ThemeColors.
pub fn colors(theme: &Theme) -> ThemeColors<'_> {
    ThemeColors::new(theme)
}
