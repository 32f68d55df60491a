//! Catppuccin color palettes for the TUI.

use ratatui::style::Color;
use std::str::FromStr;

/// Named palettes selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeName {
    /// Catppuccin Mocha (dark).
    #[default]
    Mocha,
    /// Catppuccin Latte (light).
    Latte,
    /// Black background, primary colors.
    HighContrast,
}

impl FromStr for ThemeName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mocha" | "dark" => Ok(Self::Mocha),
            "latte" | "light" => Ok(Self::Latte),
            "high-contrast" | "high_contrast" | "contrast" => Ok(Self::HighContrast),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct Theme {
    // Backgrounds
    pub base: Color,
    pub surface: Color,

    // Foregrounds
    pub text: Color,
    pub subtext: Color,
    pub muted: Color,

    // Accents
    pub primary: Color,
    pub accent: Color,

    // Senders
    pub user: Color,
    pub ai: Color,

    // Semantic
    pub success: Color,
    pub error: Color,

    // Borders
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

impl Theme {
    /// Palette for a named theme.
    pub fn named(name: ThemeName) -> Self {
        match name {
            ThemeName::Mocha => Self::mocha(),
            ThemeName::Latte => Self::latte(),
            ThemeName::HighContrast => Self::high_contrast(),
        }
    }

    /// Catppuccin Mocha theme (default dark theme).
    pub fn mocha() -> Self {
        Self {
            base: Color::Rgb(30, 30, 46),    // #1e1e2e
            surface: Color::Rgb(49, 50, 68), // #313244

            text: Color::Rgb(205, 214, 244),    // #cdd6f4
            subtext: Color::Rgb(166, 173, 200), // #a6adc8
            muted: Color::Rgb(108, 112, 134),   // #6c7086

            primary: Color::Rgb(180, 190, 254), // #b4befe (lavender)
            accent: Color::Rgb(245, 194, 231),  // #f5c2e7 (pink)

            user: Color::Rgb(137, 180, 250), // #89b4fa (blue)
            ai: Color::Rgb(148, 226, 213),   // #94e2d5 (teal)

            success: Color::Rgb(166, 227, 161), // #a6e3a1
            error: Color::Rgb(243, 139, 168),   // #f38ba8

            border: Color::Rgb(69, 71, 90),            // #45475a
            border_focused: Color::Rgb(180, 190, 254), // #b4befe
        }
    }

    /// Catppuccin Latte theme (light theme).
    pub fn latte() -> Self {
        Self {
            base: Color::Rgb(239, 241, 245),    // #eff1f5
            surface: Color::Rgb(230, 233, 239), // #e6e9ef

            text: Color::Rgb(76, 79, 105),    // #4c4f69
            subtext: Color::Rgb(92, 95, 119), // #5c5f77
            muted: Color::Rgb(140, 143, 161), // #8c8fa1

            primary: Color::Rgb(114, 135, 253), // #7287fd
            accent: Color::Rgb(234, 118, 203),  // #ea76cb

            user: Color::Rgb(30, 102, 245), // #1e66f5
            ai: Color::Rgb(23, 146, 153),   // #179299

            success: Color::Rgb(64, 160, 43), // #40a02b
            error: Color::Rgb(210, 15, 57),   // #d20f39

            border: Color::Rgb(188, 192, 204),         // #bcc0cc
            border_focused: Color::Rgb(114, 135, 253), // #7287fd
        }
    }

    /// High contrast theme for accessibility.
    pub fn high_contrast() -> Self {
        Self {
            base: Color::Black,
            surface: Color::Rgb(20, 20, 20),

            text: Color::White,
            subtext: Color::Rgb(200, 200, 200),
            muted: Color::Rgb(150, 150, 150),

            primary: Color::Cyan,
            accent: Color::Magenta,

            user: Color::LightBlue,
            ai: Color::LightGreen,

            success: Color::Green,
            error: Color::Red,

            border: Color::White,
            border_focused: Color::Cyan,
        }
    }
}
