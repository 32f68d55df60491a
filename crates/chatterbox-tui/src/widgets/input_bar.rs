//! Full-width input bar widget.
//!
//! Always visible at the bottom of the screen for text entry. Supports
//! multi-line input with Shift+Enter or Ctrl+J for newlines, and is disabled
//! while the assistant is typing.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::input::TextInputState;
use crate::theme::{BorderSet, IconSet, Theme};

/// Placeholder shown when the input is empty.
pub const PLACEHOLDER: &str = "Type your message...";

/// Text shown instead of the input while a reply is pending.
pub const TYPING_TEXT: &str = "AI is typing...";

/// Maximum number of content rows before the input scrolls.
const MAX_INPUT_ROWS: usize = 5;

/// Full-width input bar for text entry.
pub struct InputBar<'a> {
    input: &'a TextInputState,
    theme: &'a Theme,
    icons: IconSet,
    borders: BorderSet,
    disabled: bool,
}

impl<'a> InputBar<'a> {
    /// Create a new input bar widget.
    pub fn new(input: &'a TextInputState, theme: &'a Theme) -> Self {
        Self {
            input,
            theme,
            icons: IconSet::default(),
            borders: BorderSet::default(),
            disabled: false,
        }
    }

    #[must_use]
    pub fn icons(mut self, icons: IconSet) -> Self {
        self.icons = icons;
        self
    }

    #[must_use]
    pub fn borders(mut self, borders: BorderSet) -> Self {
        self.borders = borders;
        self
    }

    /// Disable input (while the assistant is typing).
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Height the bar needs for the given input, borders included.
    pub fn height_for(input: &TextInputState) -> u16 {
        let rows = input.content().split('\n').count().clamp(1, MAX_INPUT_ROWS);
        // rows <= MAX_INPUT_ROWS
        u16::try_from(rows).unwrap_or(1) + 2
    }

    /// Build Lines for multi-line input display.
    /// Returns the lines to display and which line index contains the cursor.
    fn build_input_lines(&self) -> (Vec<Line<'static>>, usize) {
        let prompt_style = Style::default().fg(self.theme.primary);
        let cursor_style = Style::default()
            .fg(self.theme.text)
            .add_modifier(Modifier::REVERSED);

        if self.input.is_empty() {
            let line = Line::from(vec![
                Span::styled(format!("{} ", self.icons.send()), prompt_style),
                Span::styled(" ", cursor_style),
                Span::styled(PLACEHOLDER, Style::default().fg(self.theme.muted)),
            ]);
            return (vec![line], 0);
        }

        let prefix_width = self.icons.send().chars().count() + 1;
        let mut lines = Vec::new();
        let mut cursor_line = 0;
        // Characters left before the cursor; a newline counts as one.
        let mut remaining = Some(self.input.cursor());

        for (idx, text) in self.input.content().split('\n').enumerate() {
            let mut spans = if idx == 0 {
                vec![Span::styled(format!("{} ", self.icons.send()), prompt_style)]
            } else {
                vec![Span::raw(" ".repeat(prefix_width))]
            };

            let len = text.chars().count();
            match remaining {
                Some(at) if at <= len => {
                    cursor_line = idx;
                    spans.push(Span::raw(text.chars().take(at).collect::<String>()));
                    let mut rest = text.chars().skip(at);
                    match rest.next() {
                        Some(ch) => {
                            spans.push(Span::styled(ch.to_string(), cursor_style));
                            spans.push(Span::raw(rest.collect::<String>()));
                        }
                        None => spans.push(Span::styled(" ", cursor_style)),
                    }
                    remaining = None;
                }
                Some(at) => {
                    remaining = Some(at - len - 1);
                    spans.push(Span::raw(text.to_string()));
                }
                None => spans.push(Span::raw(text.to_string())),
            }

            lines.push(Line::from(spans));
        }

        (lines, cursor_line)
    }
}

impl Widget for InputBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.disabled {
            Style::default().fg(self.theme.border)
        } else {
            Style::default().fg(self.theme.border_focused)
        };
        let border_set = if self.disabled {
            self.borders.panel()
        } else {
            self.borders.active()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border_set)
            .border_style(border_style);

        let inner_height = usize::from(area.height.saturating_sub(2));

        let paragraph = if self.disabled {
            let line = Line::from(vec![
                Span::styled(format!("{} ", self.icons.bot()), Style::default().fg(self.theme.ai)),
                Span::styled(
                    TYPING_TEXT,
                    Style::default()
                        .fg(self.theme.muted)
                        .add_modifier(Modifier::ITALIC),
                ),
            ]);
            Paragraph::new(line).block(block)
        } else {
            let (lines, cursor_line) = self.build_input_lines();

            // Keep the cursor line visible
            let scroll_offset = if lines.len() <= inner_height {
                0
            } else {
                cursor_line.saturating_sub(inner_height.saturating_sub(1))
            };

            Paragraph::new(lines)
                .block(block)
                .style(Style::default().fg(self.theme.text))
                .scroll((u16::try_from(scroll_offset).unwrap_or(u16::MAX), 0))
        };

        paragraph.render(area, buf);
    }
}
