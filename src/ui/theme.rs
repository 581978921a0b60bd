//! Theme and styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Color palette for a theme.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Brand Colors
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,

    // Semantic Colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // Background Colors
    pub bg: Color,
    pub bg_card: Color,
    pub bg_highlight: Color,

    // Text Colors
    pub text: Color,
    pub text_muted: Color,
    pub text_dim: Color,

    // Difficulty Colors
    pub difficulty_easy: Color,
    pub difficulty_medium: Color,
    pub difficulty_hard: Color,
}

/// Available theme names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeName {
    Dark,
    Light,
}

impl ThemeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Dark => "dark",
            ThemeName::Light => "light",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ThemeName::Dark => "Dark",
            ThemeName::Light => "Light",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dark" => ThemeName::Dark,
            _ => ThemeName::Light,
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            ThemeName::Dark => ThemeName::Light,
            ThemeName::Light => ThemeName::Dark,
        }
    }
}

/// Theme struct that holds colors and provides style methods.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: ThemeName,
    pub colors: ThemeColors,
}

impl Theme {
    pub fn new(name: ThemeName) -> Self {
        let colors = match name {
            ThemeName::Dark => Self::dark_colors(),
            ThemeName::Light => Self::light_colors(),
        };
        Self { name, colors }
    }

    pub fn from_name(name: &str) -> Self {
        Self::new(ThemeName::from_str(name))
    }

    fn dark_colors() -> ThemeColors {
        ThemeColors {
            primary: Color::Rgb(96, 165, 250),      // Blue 400
            secondary: Color::Rgb(147, 197, 253),   // Blue 300
            accent: Color::Rgb(159, 142, 226),      // Lavender

            success: Color::Rgb(34, 197, 94),       // Green 500
            warning: Color::Rgb(250, 204, 21),      // Yellow 400
            error: Color::Rgb(252, 165, 165),       // Red 300

            bg: Color::Rgb(14, 14, 16),
            bg_card: Color::Rgb(30, 41, 59),        // Slate 800
            bg_highlight: Color::Rgb(51, 65, 85),   // Slate 700

            text: Color::Rgb(228, 228, 231),        // Zinc 200
            text_muted: Color::Rgb(161, 161, 170),  // Zinc 400
            text_dim: Color::Rgb(82, 82, 91),       // Zinc 600

            difficulty_easy: Color::Rgb(34, 197, 94),
            difficulty_medium: Color::Rgb(251, 191, 36),
            difficulty_hard: Color::Rgb(239, 68, 68),
        }
    }

    fn light_colors() -> ThemeColors {
        ThemeColors {
            primary: Color::Rgb(91, 75, 138),       // Deep violet
            secondary: Color::Rgb(37, 99, 235),     // Blue 600
            accent: Color::Rgb(190, 24, 93),        // Pink 700

            success: Color::Rgb(21, 128, 61),       // Green 700
            warning: Color::Rgb(180, 83, 9),        // Amber 700
            error: Color::Rgb(185, 28, 28),         // Red 700

            bg: Color::Rgb(250, 250, 250),
            bg_card: Color::Rgb(255, 255, 255),
            bg_highlight: Color::Rgb(224, 224, 224),

            text: Color::Rgb(14, 14, 14),
            text_muted: Color::Rgb(94, 94, 94),
            text_dim: Color::Rgb(160, 160, 160),

            difficulty_easy: Color::Rgb(21, 128, 61),
            difficulty_medium: Color::Rgb(180, 83, 9),
            difficulty_hard: Color::Rgb(185, 28, 28),
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Styles
    // ══════════════════════════════════════════════════════════════════════

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.colors.text)
            .add_modifier(Modifier::BOLD)
    }

    pub fn subtitle(&self) -> Style {
        Style::default()
            .fg(self.colors.text_muted)
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.colors.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .bg(self.colors.bg_highlight)
            .fg(self.colors.text)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.colors.error)
    }

    pub fn card_front(&self) -> Style {
        Style::default()
            .fg(self.colors.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn card_back(&self) -> Style {
        Style::default()
            .fg(self.colors.success)
            .add_modifier(Modifier::BOLD)
    }

    pub fn input(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.colors.accent)
        } else {
            Style::default().fg(self.colors.text_muted)
        }
    }

    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.colors.text_dim)
    }

    pub fn key_highlight(&self) -> Style {
        Style::default()
            .fg(self.colors.accent)
            .add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeName::Light)
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Icons
// ══════════════════════════════════════════════════════════════════════════

pub mod icons {
    pub const CHECK: &str = "✓";
    pub const CROSS: &str = "✗";
    pub const BOOK: &str = "📚";
}
