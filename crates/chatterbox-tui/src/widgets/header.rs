//! Header widget for the top of the TUI.
//!
//! Format:
//! ```text
//!  ◆ AI Chat Assistant
//!    Your intelligent conversation partner
//! ```

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::text::truncate_to_width;
use crate::theme::{IconSet, Theme};

/// Title shown in the header.
pub const TITLE: &str = "AI Chat Assistant";

/// Subtitle shown under the title.
pub const SUBTITLE: &str = "Your intelligent conversation partner";

/// Height of the header (in lines).
pub const HEADER_HEIGHT: u16 = 2;

/// Header widget.
pub struct Header<'a> {
    theme: &'a Theme,
    icons: IconSet,
}

impl<'a> Header<'a> {
    /// Create a new header widget.
    pub fn new(theme: &'a Theme, icons: IconSet) -> Self {
        Self { theme, icons }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let icon = self.icons.bot();
        let indent = " ".repeat(icon.chars().count() + 2);
        let room = usize::from(area.width).saturating_sub(indent.len());

        let lines = vec![
            Line::from(vec![
                Span::styled(format!(" {icon} "), Style::default().fg(self.theme.ai)),
                Span::styled(
                    truncate_to_width(TITLE, room),
                    Style::default()
                        .fg(self.theme.text)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::raw(indent.clone()),
                Span::styled(
                    truncate_to_width(SUBTITLE, room),
                    Style::default().fg(self.theme.subtext),
                ),
            ]),
        ];

        Paragraph::new(lines)
            .style(Style::default().bg(self.theme.surface))
            .render(area, buf);
    }
}
