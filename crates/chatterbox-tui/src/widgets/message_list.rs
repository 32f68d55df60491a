//! Scrollable message list.
//!
//! Messages render as bubbles no wider than 70% of the pane. Assistant
//! bubbles hug the left edge and user bubbles hug the right edge:
//!
//! ```text
//! ◆ Assistant · 09:41
//!   Hello! I'm your AI assistant.
//!   How can I help you today?
//!
//!                               09:42 · You ●
//!                                 What's up?
//!
//! ◆ ● · ·
//! ```
//!
//! Scrolling is tracked as a line offset from the bottom, so a state at
//! offset zero keeps following the newest message.

use chatterbox_engine::{Conversation, Message, Sender};
use chrono::Local;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, StatefulWidget, Widget},
};

use crate::text::{visual_width, wrap_message};
use crate::theme::{IconSet, Theme};

/// Share of the pane width a bubble may take, in percent.
const BUBBLE_WIDTH_PERCENT: usize = 70;

/// Indentation of assistant content under its header.
const AI_INDENT: &str = "  ";

/// Scroll state for [`MessageList`].
#[derive(Debug, Clone, Default)]
pub struct MessageListState {
    /// Lines scrolled up from the bottom (0 = following latest).
    offset: usize,
    /// Height of the last rendered viewport.
    viewport: usize,
}

impl MessageListState {
    /// Create a state that follows the newest message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the newest message is pinned to the bottom.
    pub fn is_following(&self) -> bool {
        self.offset == 0
    }

    /// Scroll towards older messages. Clamped on the next render.
    pub fn scroll_up(&mut self, lines: usize) {
        self.offset = self.offset.saturating_add(lines);
    }

    /// Scroll towards newer messages.
    pub fn scroll_down(&mut self, lines: usize) {
        self.offset = self.offset.saturating_sub(lines);
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.page());
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.page());
    }

    /// Re-enable following so the newest message is visible.
    pub fn jump_to_latest(&mut self) {
        self.offset = 0;
    }

    fn page(&self) -> usize {
        self.viewport.saturating_sub(1).max(1)
    }
}

/// Message list widget.
pub struct MessageList<'a> {
    conversation: &'a Conversation,
    theme: &'a Theme,
    icons: IconSet,
    tick: usize,
}

impl<'a> MessageList<'a> {
    /// Create a message list over a conversation.
    pub fn new(conversation: &'a Conversation, theme: &'a Theme, icons: IconSet) -> Self {
        Self {
            conversation,
            theme,
            icons,
            tick: 0,
        }
    }

    /// Set the animation tick used by the typing indicator.
    #[must_use]
    pub fn tick(mut self, tick: usize) -> Self {
        self.tick = tick;
        self
    }

    /// Build every line of the list, top to bottom.
    fn lines(&self, width: usize) -> Vec<Line<'static>> {
        let bubble_width = (width * BUBBLE_WIDTH_PERCENT / 100).max(1);
        let mut lines = Vec::new();

        for (i, msg) in self.conversation.messages().iter().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            match msg.sender {
                Sender::Ai => self.push_ai(&mut lines, msg, bubble_width),
                Sender::User => self.push_user(&mut lines, msg, bubble_width),
            }
        }

        if self.conversation.is_typing() {
            lines.push(Line::default());
            lines.push(Line::from(vec![
                Span::styled(self.icons.bot(), Style::default().fg(self.theme.ai)),
                Span::raw(" "),
                Span::styled(
                    self.icons.typing_frame(self.tick),
                    Style::default().fg(self.theme.accent),
                ),
            ]));
        }

        lines
    }

    fn push_ai(&self, lines: &mut Vec<Line<'static>>, msg: &Message, bubble_width: usize) {
        lines.push(Line::from(vec![
            Span::styled(
                self.icons.sender(msg.sender),
                Style::default().fg(self.theme.ai),
            ),
            Span::raw(" "),
            Span::styled(
                msg.sender.label(),
                Style::default()
                    .fg(self.theme.ai)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" · ", Style::default().fg(self.theme.muted)),
            Span::styled(local_time(msg), Style::default().fg(self.theme.muted)),
        ]));

        let content_width = bubble_width.saturating_sub(AI_INDENT.len()).max(1);
        for row in wrap_message(&msg.content, content_width) {
            lines.push(Line::from(vec![
                Span::raw(AI_INDENT),
                Span::styled(row, Style::default().fg(self.theme.text)),
            ]));
        }
    }

    fn push_user(&self, lines: &mut Vec<Line<'static>>, msg: &Message, bubble_width: usize) {
        lines.push(
            Line::from(vec![
                Span::styled(local_time(msg), Style::default().fg(self.theme.muted)),
                Span::styled(" · ", Style::default().fg(self.theme.muted)),
                Span::styled(
                    msg.sender.label(),
                    Style::default()
                        .fg(self.theme.user)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(
                    self.icons.sender(msg.sender),
                    Style::default().fg(self.theme.user),
                ),
            ])
            .alignment(Alignment::Right),
        );

        // Pad rows to a common width so the bubble is flush right but the
        // text inside it stays left-aligned.
        let rows = wrap_message(&msg.content, bubble_width);
        let block_width = rows.iter().map(|r| visual_width(r)).max().unwrap_or(0);
        for row in rows {
            let pad = block_width.saturating_sub(visual_width(&row));
            lines.push(
                Line::from(Span::styled(
                    format!("{row}{}", " ".repeat(pad)),
                    Style::default().fg(self.theme.text),
                ))
                .alignment(Alignment::Right),
            );
        }
    }
}

fn local_time(msg: &Message) -> String {
    msg.timestamp.with_timezone(&Local).format("%H:%M").to_string()
}

impl StatefulWidget for MessageList<'_> {
    type State = MessageListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let lines = self.lines(usize::from(area.width));
        let viewport = usize::from(area.height);
        let max_offset = lines.len().saturating_sub(viewport);

        state.viewport = viewport;
        state.offset = state.offset.min(max_offset);

        let start = max_offset - state.offset;
        let visible: Vec<Line<'static>> = lines.into_iter().skip(start).take(viewport).collect();

        Paragraph::new(visible).render(area, buf);
    }
}
