//! Theme system for consistent UI colors across dark and light modes.
//!
//! The OS theme is detected with `dark-light` when the configured mode is `Auto`.

use ratatui::style::Color;

use crate::config::ThemeMode;

/// Semantic color theme for the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Borders, titles, and emphasis
    pub primary: Color,
    /// Highlights and focus
    pub accent: Color,
    /// Confirmations
    pub success: Color,
    /// Errors
    pub error: Color,
    /// Warnings and hints
    pub warning: Color,

    /// Primary text content
    pub text: Color,
    /// Help text and dim content
    pub text_muted: Color,

    /// Main background
    pub background: Color,

    /// Key cap fill
    pub key_bg: Color,
    /// Key label
    pub key_fg: Color,
    /// Key cap fill of the slot being edited
    pub selected_bg: Color,
    /// Label of the slot being edited
    pub selected_fg: Color,
}

impl Theme {
    /// Picks a theme for the configured mode.
    #[must_use]
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Auto => Self::detect(),
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Detects the OS theme and returns the matching Theme.
    #[must_use]
    pub fn detect() -> Self {
        match dark_light::detect() {
            Ok(dark_light::Mode::Light) => Self::light(),
            // Fall back to dark theme for dark mode, unspecified, or errors
            Ok(dark_light::Mode::Dark | dark_light::Mode::Unspecified) | Err(_) => Self::dark(),
        }
    }

    /// Dark theme: bright chrome, black key caps with white labels.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            accent: Color::Yellow,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,

            text: Color::White,
            text_muted: Color::DarkGray,

            background: Color::Black,

            key_bg: Color::Rgb(40, 40, 40),
            key_fg: Color::White,
            selected_bg: Color::Yellow,
            selected_fg: Color::Black,
        }
    }

    /// Light theme: darker chrome, black key caps on a white background.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::Blue,
            accent: Color::Rgb(180, 100, 0),
            success: Color::Rgb(0, 128, 0),
            error: Color::Red,
            warning: Color::Rgb(200, 100, 0),

            text: Color::Black,
            text_muted: Color::Gray,

            background: Color::White,

            key_bg: Color::Black,
            key_fg: Color::White,
            selected_bg: Color::Rgb(180, 100, 0),
            selected_fg: Color::White,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}
