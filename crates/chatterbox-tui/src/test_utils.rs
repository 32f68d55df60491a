//! Test utilities for chatterbox-tui rendering tests.
//!
//! This module provides helper functions for creating test terminals,
//! rendering the app, and converting buffers to strings.

use crate::app::App;
use crate::ui;
use ratatui::{backend::TestBackend, Terminal};

pub use crate::headless::buffer_to_string;

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 80;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 24;

/// Create a test terminal with the default dimensions (80x24).
pub fn create_test_terminal() -> Terminal<TestBackend> {
    create_test_terminal_sized(TEST_WIDTH, TEST_HEIGHT)
}

/// Create a test terminal with custom dimensions.
pub fn create_test_terminal_sized(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// Create a test app with a seeded session.
pub fn create_test_app() -> App {
    App::new_for_test()
}

/// Draw the app on a default-sized test terminal and return the screen.
pub fn render_app_to_string(app: &mut App) -> String {
    let mut terminal = create_test_terminal();
    terminal
        .draw(|frame| ui::draw(frame, app))
        .expect("Failed to draw");
    buffer_to_string(terminal.backend().buffer())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;

    #[test]
    fn test_create_test_terminal() {
        let terminal = create_test_terminal();
        let size = terminal.size().unwrap();
        assert_eq!(size.width, TEST_WIDTH);
        assert_eq!(size.height, TEST_HEIGHT);
    }

    #[test]
    fn test_create_test_app() {
        let app = create_test_app();
        assert_eq!(app.session.conversation().len(), 1);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_buffer_to_string() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", ratatui::style::Style::default());
        buffer.set_string(0, 1, "World", ratatui::style::Style::default());

        let result = buffer_to_string(&buffer);
        assert_eq!(result, "Hello\nWorld\n");
    }
}
