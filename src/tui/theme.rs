//! Dark/light color palettes.
//!
//! The toggle is persisted via `crate::config`; everything here is a
//! plain lookup so the renderer stays declarative.

use ratatui::style::Color;

use crate::config::ThemeMode;

/// Resolved palette for one theme mode.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub header_fg: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub active: Color,
    pub inactive: Color,
    pub error: Color,
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    fn dark() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::Gray,
            dim: Color::DarkGray,
            accent: Color::Cyan,
            border: Color::DarkGray,
            header_fg: Color::White,
            selection_bg: Color::DarkGray,
            selection_fg: Color::White,
            active: Color::Green,
            inactive: Color::Red,
            error: Color::LightRed,
        }
    }

    fn light() -> Self {
        Self {
            bg: Color::White,
            fg: Color::Black,
            dim: Color::Gray,
            accent: Color::Blue,
            border: Color::Gray,
            header_fg: Color::Black,
            selection_bg: Color::LightBlue,
            selection_fg: Color::Black,
            active: Color::Green,
            inactive: Color::Red,
            error: Color::Red,
        }
    }

    /// Latency-bucket color for a speed label.
    pub fn speed_color(&self, label: &str) -> Color {
        match label {
            "Excellent" => Color::Green,
            "Good" => Color::LightGreen,
            "Medium" => Color::Yellow,
            "Poor" => Color::LightRed,
            "Unusable" => Color::Red,
            _ => self.dim,
        }
    }
}
