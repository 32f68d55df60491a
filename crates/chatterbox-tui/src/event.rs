//! Event handling for the chatterbox TUI.

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent,
    MouseEventKind,
};
use std::time::Duration;
use tokio::sync::mpsc;

/// Events that can occur in the TUI.
#[derive(Debug, Clone)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse event occurred.
    Mouse(MouseEvent),
    /// A tick event for UI updates.
    Tick,
    /// Terminal was resized.
    Resize(u16, u16),
    /// Text pasted while bracketed paste is enabled.
    Paste(String),
}

/// Event handler that runs in a background thread.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _tx: mpsc::UnboundedSender<Event>,
}

impl EventHandler {
    /// Create a new event handler with the specified tick rate.
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let tx_clone = tx.clone();

        // crossterm polling is blocking, so it gets its own thread
        std::thread::spawn(move || {
            let tick_rate = Duration::from_millis(tick_rate_ms);
            loop {
                let event = if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                            Some(Event::Key(key))
                        }
                        Ok(CrosstermEvent::Mouse(mouse)) => Some(Event::Mouse(mouse)),
                        Ok(CrosstermEvent::Resize(w, h)) => Some(Event::Resize(w, h)),
                        Ok(CrosstermEvent::Paste(text)) => Some(Event::Paste(text)),
                        _ => None,
                    }
                } else {
                    Some(Event::Tick)
                };

                if let Some(e) = event {
                    if tx_clone.send(e).is_err() {
                        break;
                    }
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Get the next event, waiting until one is available.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Action that can be performed in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Help,
    Back,
    Export,
    Submit,
    Newline,
    Insert(char),
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    /// Older history entry when the input is empty or already browsing,
    /// otherwise scroll.
    Up,
    /// Newer history entry while browsing history, otherwise scroll.
    Down,
    PageUp,
    PageDown,
    JumpToLatest,
    ScrollUp,
    ScrollDown,
    None,
}

/// Convert a key event to an action.
pub fn key_to_action(key: KeyEvent) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl {
        return match key.code {
            KeyCode::Char('c') => Action::Quit,
            KeyCode::Char('e') => Action::Export,
            KeyCode::Char('j') | KeyCode::Enter => Action::Newline,
            KeyCode::End => Action::JumpToLatest,
            KeyCode::Home => Action::CursorHome,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::SHIFT) => Action::Newline,
        KeyCode::Enter => Action::Submit,
        KeyCode::F(1) => Action::Help,
        KeyCode::Esc => Action::Back,
        KeyCode::Char(c) => Action::Insert(c),
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Delete => Action::Delete,
        KeyCode::Left => Action::CursorLeft,
        KeyCode::Right => Action::CursorRight,
        KeyCode::Home => Action::CursorHome,
        KeyCode::End => Action::CursorEnd,
        KeyCode::Up => Action::Up,
        KeyCode::Down => Action::Down,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        _ => Action::None,
    }
}

/// Convert a mouse event to an action.
pub fn mouse_to_action(mouse: MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollUp => Action::ScrollUp,
        MouseEventKind::ScrollDown => Action::ScrollDown,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_enter_submits() {
        assert_eq!(
            key_to_action(key(KeyCode::Enter, KeyModifiers::NONE)),
            Action::Submit
        );
    }

    #[test]
    fn test_newline_bindings() {
        assert_eq!(
            key_to_action(key(KeyCode::Enter, KeyModifiers::SHIFT)),
            Action::Newline
        );
        assert_eq!(
            key_to_action(key(KeyCode::Char('j'), KeyModifiers::CONTROL)),
            Action::Newline
        );
    }

    #[test]
    fn test_control_bindings() {
        assert_eq!(
            key_to_action(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
        assert_eq!(
            key_to_action(key(KeyCode::Char('e'), KeyModifiers::CONTROL)),
            Action::Export
        );
        assert_eq!(
            key_to_action(key(KeyCode::End, KeyModifiers::CONTROL)),
            Action::JumpToLatest
        );
        // Unbound control chords never become text
        assert_eq!(
            key_to_action(key(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            Action::None
        );
    }

    #[test]
    fn test_plain_chars_are_text() {
        // 'q' is text in a chat input, not quit
        assert_eq!(
            key_to_action(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            Action::Insert('q')
        );
        assert_eq!(
            key_to_action(key(KeyCode::Char('Q'), KeyModifiers::SHIFT)),
            Action::Insert('Q')
        );
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(key_to_action(key(KeyCode::F(1), KeyModifiers::NONE)), Action::Help);
        assert_eq!(key_to_action(key(KeyCode::Esc, KeyModifiers::NONE)), Action::Back);
        assert_eq!(
            key_to_action(key(KeyCode::PageUp, KeyModifiers::NONE)),
            Action::PageUp
        );
        assert_eq!(key_to_action(key(KeyCode::End, KeyModifiers::NONE)), Action::CursorEnd);
    }

    #[test]
    fn test_mouse_wheel() {
        let wheel = |kind| MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            mouse_to_action(wheel(MouseEventKind::ScrollUp)),
            Action::ScrollUp
        );
        assert_eq!(
            mouse_to_action(wheel(MouseEventKind::ScrollDown)),
            Action::ScrollDown
        );
        assert_eq!(mouse_to_action(wheel(MouseEventKind::Moved)), Action::None);
    }
}
