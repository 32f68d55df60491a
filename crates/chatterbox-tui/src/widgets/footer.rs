//! Footer bar widget.
//!
//! Format: `✓ Transcript saved            [Enter] send │ [F1] help`
//!
//! The left side shows the current notification, if any. The right side
//! shows keybinding hints for the current state.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::app::{Notification, NotificationKind};
use crate::text::visual_width;
use crate::theme::Theme;

/// A single keybinding hint.
#[derive(Debug, Clone)]
pub struct KeyHint {
    /// The key or key combination (e.g., "Enter", "Ctrl+E").
    pub key: String,
    /// The action description (e.g., "send", "export").
    pub action: String,
}

impl KeyHint {
    /// Create a new key hint.
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Hints for the current chat state.
///
/// While the assistant is typing the input is disabled, so editing hints
/// are dropped. When scrolled away from the newest message, a jump hint
/// comes first.
#[must_use]
pub fn hints_for_state(typing: bool, following: bool) -> Vec<KeyHint> {
    let mut hints = Vec::new();

    if !following {
        hints.push(KeyHint::new("Ctrl+End", "latest"));
    }

    if !typing {
        hints.push(KeyHint::new("Enter", "send"));
        hints.push(KeyHint::new("Ctrl+J", "newline"));
    }

    hints.push(KeyHint::new("Ctrl+E", "export"));
    hints.push(KeyHint::new("Esc", "clear/quit"));
    hints.push(KeyHint::new("F1", "help"));

    hints
}

/// Footer bar widget.
pub struct Footer<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
    notification: Option<&'a Notification>,
}

impl<'a> Footer<'a> {
    /// Create a new footer widget.
    pub fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self {
            hints,
            theme,
            notification: None,
        }
    }

    /// Set the notification to display.
    #[must_use]
    pub fn notification(mut self, notification: Option<&'a Notification>) -> Self {
        self.notification = notification;
        self
    }
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut left_spans = Vec::new();
        let mut right_spans = Vec::new();

        if let Some(notification) = self.notification {
            let (mark, color) = match notification.kind {
                NotificationKind::Info => ("✓ ", self.theme.success),
                NotificationKind::Error => ("✗ ", self.theme.error),
            };
            left_spans.push(Span::styled(format!(" {mark}"), Style::default().fg(color)));
            left_spans.push(Span::styled(
                notification.message.clone(),
                Style::default().fg(color),
            ));
        }

        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                right_spans.push(Span::styled(" │ ", Style::default().fg(self.theme.muted)));
            }

            right_spans.push(Span::styled("[", Style::default().fg(self.theme.muted)));
            right_spans.push(Span::styled(
                hint.key.as_str(),
                Style::default().fg(self.theme.primary),
            ));
            right_spans.push(Span::styled("] ", Style::default().fg(self.theme.muted)));
            right_spans.push(Span::styled(
                hint.action.as_str(),
                Style::default().fg(self.theme.subtext),
            ));
        }
        right_spans.push(Span::raw(" "));

        let left_width: usize = left_spans.iter().map(|s| visual_width(&s.content)).sum();
        let right_width: usize = right_spans.iter().map(|s| visual_width(&s.content)).sum();
        let total_width = usize::from(area.width);

        // Hints give way to the notification on narrow terminals
        if left_width + right_width > total_width && !left_spans.is_empty() {
            right_spans.clear();
        }
        let right_width: usize = right_spans.iter().map(|s| visual_width(&s.content)).sum();

        let padding = total_width.saturating_sub(left_width + right_width);
        if padding > 0 {
            left_spans.push(Span::raw(" ".repeat(padding)));
        }
        left_spans.extend(right_spans);

        Paragraph::new(Line::from(left_spans))
            .style(Style::default().bg(self.theme.surface))
            .render(area, buf);
    }
}
