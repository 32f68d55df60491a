//! Border sets for Unicode and ASCII fallback.

use ratatui::symbols::border;

use super::icons::IconMode;

/// Border set based on icon mode (supports `NO_COLOR`/ASCII fallback).
#[derive(Debug, Clone, Copy)]
pub struct BorderSet {
    mode: IconMode,
}

impl Default for BorderSet {
    fn default() -> Self {
        Self::new(IconMode::default())
    }
}

impl BorderSet {
    /// Create a new border set with the specified mode.
    pub fn new(mode: IconMode) -> Self {
        Self { mode }
    }

    /// Panel borders - rounded for Unicode, plain for ASCII.
    pub fn panel(self) -> border::Set {
        match self.mode {
            IconMode::Nerd | IconMode::Unicode => border::ROUNDED,
            IconMode::Ascii => border::PLAIN,
        }
    }

    /// Borders for the active input - thick for Unicode, double for ASCII.
    pub fn active(self) -> border::Set {
        match self.mode {
            IconMode::Nerd | IconMode::Unicode => border::THICK,
            IconMode::Ascii => border::DOUBLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unicode_borders_are_rounded() {
        let borders = BorderSet::new(IconMode::Unicode);
        assert_eq!(borders.panel().top_left, border::ROUNDED.top_left);
        assert_eq!(borders.active().top_left, border::THICK.top_left);
    }

    #[test]
    fn test_ascii_borders() {
        let borders = BorderSet::new(IconMode::Ascii);
        assert_eq!(borders.panel().top_left, border::PLAIN.top_left);
        assert_eq!(borders.active().top_left, border::DOUBLE.top_left);
    }
}
