//! Screen layout and overlays.
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ header (title / subtitle)            │
//! │                                      │
//! │ message list                         │
//! │                                      │
//! │ input bar                            │
//! │ footer (notification / hints)        │
//! └──────────────────────────────────────┘
//! ```

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
    Frame,
};

use crate::app::App;
use crate::theme::{BorderSet, Theme};
use crate::widgets::{
    hints_for_state, Footer, Header, InputBar, MessageList, HEADER_HEIGHT,
};

/// Minimum terminal width for the chat layout.
pub const MIN_WIDTH: u16 = 30;

/// Minimum terminal height for the chat layout.
pub const MIN_HEIGHT: u16 = 10;

/// UI ticks per typing animation frame.
const TICKS_PER_FRAME: usize = 3;

/// Create a centered rect with fixed dimensions.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Draw the whole screen.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    frame.render_widget(
        Block::default().style(Style::default().bg(app.theme.base)),
        area,
    );

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_too_small(area, frame.buffer_mut(), &app.theme);
        return;
    }

    let [header_area, list_area, input_area, footer_area] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(1),
        Constraint::Length(InputBar::height_for(&app.input)),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(Header::new(&app.theme, app.icons), header_area);

    let list = MessageList::new(app.session.conversation(), &app.theme, app.icons)
        .tick(app.tick / TICKS_PER_FRAME);
    frame.render_stateful_widget(
        list,
        list_area.inner(Margin {
            horizontal: 1,
            vertical: 1,
        }),
        &mut app.messages,
    );

    frame.render_widget(
        InputBar::new(&app.input, &app.theme)
            .icons(app.icons)
            .borders(app.borders)
            .disabled(app.session.is_typing()),
        input_area,
    );

    let hints = hints_for_state(app.session.is_typing(), app.messages.is_following());
    frame.render_widget(
        Footer::new(&hints, &app.theme).notification(app.notification.as_ref()),
        footer_area,
    );

    if app.show_help {
        render_help_overlay(area, frame.buffer_mut(), &app.theme, app.borders);
    }
}

fn render_too_small(area: Rect, buf: &mut Buffer, theme: &Theme) {
    let text = format!("Terminal too small\nResize to at least {MIN_WIDTH}x{MIN_HEIGHT}");
    let rect = centered_fixed(area.width, 2, area);
    Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.error))
        .render(rect, buf);
}

/// Render the help overlay.
pub fn render_help_overlay(area: Rect, buf: &mut Buffer, theme: &Theme, borders: BorderSet) {
    let help_text = r"
  Chat
    Enter             Send message
    Shift+Enter       New line (also Ctrl+J)
    Esc               Clear input / quit

  Navigation
    Up/Down           History or scroll
    PgUp/PgDn         Scroll a page
    Ctrl+End          Jump to latest
    Ctrl+E            Export transcript
    F1                Toggle this help
    Ctrl+C            Quit

  [Press any key to close]
";

    let width = 50.min(area.width.saturating_sub(4));
    let height = 19.min(area.height.saturating_sub(2));
    let overlay_area = centered_fixed(width, height, area);

    Clear.render(overlay_area, buf);

    let block = Block::default()
        .title(" Help ")
        .title_style(
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_set(borders.active())
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.surface).fg(theme.text));

    Paragraph::new(help_text).block(block).render(overlay_area, buf);
}
