//! Icon sets for Nerd Fonts, Unicode, and ASCII fallback.

use chatterbox_engine::Sender;

/// Icon mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconMode {
    /// Nerd Font icons (default, richest experience).
    #[default]
    Nerd,
    /// Standard Unicode symbols (wide compatibility).
    Unicode,
    /// ASCII-only fallback (maximum compatibility, also used with `NO_COLOR`).
    Ascii,
}

impl IconMode {
    /// Parse a mode name as used by `CHATTERBOX_ICONS`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nerd" => Some(Self::Nerd),
            "unicode" => Some(Self::Unicode),
            "ascii" => Some(Self::Ascii),
            _ => None,
        }
    }
}

/// Icon set based on configured mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct IconSet {
    mode: IconMode,
}

impl IconSet {
    /// Create a new icon set with the specified mode.
    pub fn new(mode: IconMode) -> Self {
        Self { mode }
    }

    /// Get the current icon mode.
    pub fn mode(self) -> IconMode {
        self.mode
    }

    // === Senders ===

    pub fn user(self) -> &'static str {
        match self.mode {
            IconMode::Nerd => "\u{f007}",
            IconMode::Unicode => "●",
            IconMode::Ascii => "[you]",
        }
    }

    pub fn bot(self) -> &'static str {
        match self.mode {
            IconMode::Nerd => "\u{f06a9}",
            IconMode::Unicode => "◆",
            IconMode::Ascii => "[ai]",
        }
    }

    /// Icon for a message sender.
    pub fn sender(self, sender: Sender) -> &'static str {
        match sender {
            Sender::User => self.user(),
            Sender::Ai => self.bot(),
        }
    }

    // === Input ===

    pub fn send(self) -> &'static str {
        match self.mode {
            IconMode::Nerd => "\u{f1d8}",
            IconMode::Unicode => "➤",
            IconMode::Ascii => ">",
        }
    }

    /// Frames for the three-dot typing animation.
    pub fn typing_frames(self) -> &'static [&'static str] {
        match self.mode {
            IconMode::Nerd | IconMode::Unicode => &["● · ·", "· ● ·", "· · ●"],
            IconMode::Ascii => &["o . .", ". o .", ". . o"],
        }
    }

    /// Typing animation frame for a UI tick.
    pub fn typing_frame(self, tick: usize) -> &'static str {
        let frames = self.typing_frames();
        frames[tick % frames.len()]
    }
}
