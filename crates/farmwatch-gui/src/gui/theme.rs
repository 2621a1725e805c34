//! Theme and styling for the Farmwatch GUI.
//!
//! Provides a consistent visual theme with dark/light mode support,
//! including colors, spacing, and typography constants.

use eframe::egui::{Color32, Margin, Style, Visuals};

/// Theme mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    /// Toggle between light and dark mode.
    pub fn toggle(&mut self) {
        *self = match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        };
    }

    /// Get the switcher label for the current theme.
    pub fn icon(&self) -> &'static str {
        match self {
            ThemeMode::Dark => "Light Mode",
            ThemeMode::Light => "Dark Mode",
        }
    }

    /// Parse a configured theme name; anything unrecognized means dark.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("light") {
            ThemeMode::Light
        } else {
            ThemeMode::Dark
        }
    }
}

/// Spacing constants for consistent layout using a 4px grid.
#[derive(Debug, Clone, Copy)]
pub struct Spacing {
    /// Extra small spacing (4px)
    pub xs: f32,
    /// Small spacing (8px)
    pub sm: f32,
    /// Medium spacing (16px)
    pub md: f32,
    /// Large spacing (24px)
    pub lg: f32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            xs: 4.0,
            sm: 8.0,
            md: 16.0,
            lg: 24.0,
        }
    }
}

/// Font size constants.
#[derive(Debug, Clone, Copy)]
pub struct Typography {
    /// Caption/small text (11px)
    pub caption: f32,
    /// Body text (14px)
    pub body: f32,
    /// Subheading (18px)
    pub subheading: f32,
    /// Heading (22px)
    pub heading: f32,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            caption: 11.0,
            body: 14.0,
            subheading: 18.0,
            heading: 22.0,
        }
    }
}

/// Color palette and layout constants for the dashboard.
#[derive(Debug, Clone)]
pub struct Theme {
    is_dark: bool,

    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_card: Color32,

    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,
    pub text_on_accent: Color32,

    pub border_subtle: Color32,

    pub accent: Color32,
    pub success: Color32,
    pub danger: Color32,

    /// Series color for sensor charts.
    pub chart_line: Color32,
    /// Series color for the tag chart.
    pub chart_tags: Color32,

    pub spacing: Spacing,
    pub typography: Typography,
}

impl Theme {
    /// Get the theme for a mode.
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Dark color palette.
    pub fn dark() -> Self {
        Self {
            is_dark: true,
            bg_primary: Color32::from_rgb(9, 9, 11),      // zinc-950
            bg_secondary: Color32::from_rgb(24, 24, 27),  // zinc-900
            bg_card: Color32::from_rgb(39, 39, 42),       // zinc-800
            text_primary: Color32::from_rgb(250, 250, 250), // zinc-50
            text_secondary: Color32::from_rgb(212, 212, 216), // zinc-300
            text_muted: Color32::from_rgb(161, 161, 170), // zinc-400
            text_on_accent: Color32::WHITE,
            border_subtle: Color32::from_rgb(39, 39, 42), // zinc-800
            accent: Color32::from_rgb(59, 130, 246),      // blue-500
            success: Color32::from_rgb(34, 197, 94),      // green-500
            danger: Color32::from_rgb(239, 68, 68),       // red-500
            chart_line: Color32::from_rgb(74, 222, 128),  // green-400
            chart_tags: Color32::from_rgb(34, 211, 238),  // cyan-400
            spacing: Spacing::default(),
            typography: Typography::default(),
        }
    }

    /// Light color palette.
    pub fn light() -> Self {
        Self {
            is_dark: false,
            bg_primary: Color32::from_rgb(250, 250, 250), // zinc-50
            bg_secondary: Color32::from_rgb(244, 244, 245), // zinc-100
            bg_card: Color32::WHITE,
            text_primary: Color32::from_rgb(24, 24, 27),  // zinc-900
            text_secondary: Color32::from_rgb(63, 63, 70), // zinc-700
            text_muted: Color32::from_rgb(113, 113, 122), // zinc-500
            text_on_accent: Color32::WHITE,
            border_subtle: Color32::from_rgb(228, 228, 231), // zinc-200
            accent: Color32::from_rgb(37, 99, 235),       // blue-600
            success: Color32::from_rgb(22, 163, 74),      // green-600
            danger: Color32::from_rgb(220, 38, 38),       // red-600
            chart_line: Color32::from_rgb(22, 163, 74),   // green-600
            chart_tags: Color32::from_rgb(8, 145, 178),   // cyan-600
            spacing: Spacing::default(),
            typography: Typography::default(),
        }
    }

    /// Create an egui style matching this theme.
    pub fn to_style(&self) -> Style {
        Style {
            visuals: self.to_visuals(),
            spacing: eframe::egui::style::Spacing {
                item_spacing: eframe::egui::vec2(self.spacing.sm, self.spacing.sm),
                window_margin: Margin::same(self.spacing.md as i8),
                button_padding: eframe::egui::vec2(12.0, 6.0),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Create egui Visuals from this theme.
    pub fn to_visuals(&self) -> Visuals {
        let mut visuals = if self.is_dark {
            Visuals::dark()
        } else {
            Visuals::light()
        };

        visuals.dark_mode = self.is_dark;
        visuals.panel_fill = self.bg_primary;
        visuals.window_fill = self.bg_secondary;
        visuals.extreme_bg_color = self.bg_card;
        visuals.faint_bg_color = self.bg_secondary;
        visuals.widgets.noninteractive.bg_fill = self.bg_secondary;
        visuals.widgets.inactive.bg_fill = self.bg_card;

        visuals
    }
}
