//! Headless mode for the chatterbox TUI.
//!
//! Runs the TUI against a ratatui `TestBackend` instead of a real terminal,
//! enabling end-to-end tests and automation. Actions are sent via a channel
//! and the screen is captured after each render.

use crate::app::{App, UiConfig};
use crate::event::Action;
use crate::theme::IconMode;
use crate::ui;
use chatterbox_engine::Config;
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Default terminal dimensions for headless mode.
pub const DEFAULT_WIDTH: u16 = 80;
pub const DEFAULT_HEIGHT: u16 = 24;

/// State captured from the headless TUI after each render.
#[derive(Debug, Clone, Default)]
pub struct HeadlessState {
    /// Text contents of the terminal buffer.
    pub screen_contents: String,
    /// Number of messages in the conversation.
    pub message_count: usize,
    /// Whether the assistant is typing.
    pub typing: bool,
    /// Whether the TUI should quit.
    pub should_quit: bool,
    /// Whether help overlay is visible.
    pub show_help: bool,
}

/// Handle to control a headless TUI instance.
pub struct HeadlessHandle {
    action_tx: mpsc::UnboundedSender<Action>,
    state_rx: watch::Receiver<HeadlessState>,
}

impl HeadlessHandle {
    /// Send an action to the TUI.
    ///
    /// Returns `true` if the action was sent successfully.
    pub fn send_action(&self, action: Action) -> bool {
        self.action_tx.send(action).is_ok()
    }

    /// Type text into the input, one character at a time.
    pub fn type_text(&self, text: &str) -> bool {
        text.chars().all(|c| self.send_action(Action::Insert(c)))
    }

    /// Get the current state of the TUI.
    pub fn state(&self) -> HeadlessState {
        self.state_rx.borrow().clone()
    }

    /// Wait until a condition is met on the state.
    ///
    /// Returns the state when the condition is met, or `None` if timed out.
    pub async fn wait_for<F>(&mut self, condition: F, timeout: Duration) -> Option<HeadlessState>
    where
        F: Fn(&HeadlessState) -> bool,
    {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            let state = self.state();
            if condition(&state) {
                return Some(state);
            }

            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                return None;
            }

            match tokio::time::timeout(remaining, self.state_rx.changed()).await {
                Ok(Ok(())) => {}
                // Timed out, or the TUI task is gone
                _ => return None,
            }
        }
    }

    /// Wait for specific text to appear on screen.
    pub async fn wait_for_text(&mut self, text: &str, timeout: Duration) -> Option<HeadlessState> {
        self.wait_for(|s| s.screen_contents.contains(text), timeout)
            .await
    }

    /// Check if the TUI has quit.
    pub fn has_quit(&self) -> bool {
        self.state().should_quit
    }
}

/// Configuration for headless mode.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Terminal width.
    pub width: u16,
    /// Terminal height.
    pub height: u16,
    /// Tick rate in milliseconds.
    pub tick_rate_ms: u64,
    /// Chat configuration.
    pub chat: Config,
    /// Directory for transcript exports.
    pub export_dir: PathBuf,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tick_rate_ms: 50,
            chat: Config::default(),
            export_dir: std::env::temp_dir(),
        }
    }
}

/// Run the TUI in headless mode.
///
/// Returns a handle to control the TUI and a join handle for the background
/// task. Must be called from within a Tokio runtime.
///
/// # Example
///
/// ```ignore
/// let (mut handle, task) = run_tui_headless(HeadlessConfig::default());
///
/// handle.type_text("Hi");
/// handle.send_action(Action::Submit);
/// handle.wait_for(|s| s.message_count == 3, Duration::from_secs(5)).await;
///
/// handle.send_action(Action::Quit);
/// task.await.unwrap();
/// ```
pub fn run_tui_headless(
    config: HeadlessConfig,
) -> (HeadlessHandle, JoinHandle<Result<(), String>>) {
    let (action_tx, action_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(HeadlessState::default());

    let task = tokio::spawn(async move {
        run_headless_loop(config, action_rx, state_tx)
            .await
            .map_err(|e| e.to_string())
    });

    let handle = HeadlessHandle {
        action_tx,
        state_rx,
    };

    (handle, task)
}

async fn run_headless_loop(
    config: HeadlessConfig,
    mut action_rx: mpsc::UnboundedReceiver<Action>,
    state_tx: watch::Sender<HeadlessState>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let backend = TestBackend::new(config.width, config.height);
    let mut terminal = Terminal::new(backend)?;

    // ASCII icons keep the captured screen stable across fonts
    let ui_config = UiConfig {
        icons: IconMode::Ascii,
        ..UiConfig::default()
    };
    let mut app = App::new(&config.chat, &ui_config, config.export_dir);

    let tick_duration = Duration::from_millis(config.tick_rate_ms);

    loop {
        app.poll_replies();

        terminal.draw(|frame| ui::draw(frame, &mut app))?;

        let _ = state_tx.send(HeadlessState {
            screen_contents: buffer_to_string(terminal.backend().buffer()),
            message_count: app.session.conversation().len(),
            typing: app.is_typing(),
            should_quit: app.should_quit,
            show_help: app.show_help,
        });

        if app.should_quit {
            break;
        }

        // Wait for action or tick
        tokio::select! {
            action = action_rx.recv() => match action {
                Some(action) => app.handle_action(action),
                // Every handle is gone; nobody can quit us
                None => break,
            },
            () = tokio::time::sleep(tick_duration) => app.tick(),
        }
    }

    Ok(())
}

/// Convert a terminal buffer to a string representation.
///
/// Trailing whitespace is trimmed from each row.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                result.push_str(cell.symbol());
            }
        }
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    if result.ends_with('\n') {
        result.pop();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatterbox_engine::CANNED_REPLIES;

    fn seeded_config() -> HeadlessConfig {
        HeadlessConfig {
            chat: Config {
                seed: Some(3),
                ..Config::default()
            },
            ..HeadlessConfig::default()
        }
    }

    #[test]
    fn test_headless_state_default() {
        let state = HeadlessState::default();
        assert!(!state.should_quit);
        assert!(!state.show_help);
        assert!(state.screen_contents.is_empty());
    }

    #[test]
    fn test_headless_config_default() {
        let config = HeadlessConfig::default();
        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.tick_rate_ms, 50);
    }

    #[tokio::test(start_paused = true)]
    async fn test_headless_conversation_round_trip() {
        let (mut handle, task) = run_tui_headless(seeded_config());

        let state = handle
            .wait_for_text("AI Chat Assistant", Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(state.message_count, 1);

        assert!(handle.type_text("Hi"));
        assert!(handle.send_action(Action::Submit));

        let state = handle
            .wait_for(|s| s.typing, Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(state.message_count, 2);
        assert!(state.screen_contents.contains("AI is typing..."));

        let state = handle
            .wait_for(|s| s.message_count == 3, Duration::from_secs(5))
            .await
            .unwrap();
        assert!(!state.typing);
        assert!(CANNED_REPLIES
            .iter()
            .any(|reply| state.screen_contents.contains(&reply[..20])));

        handle.send_action(Action::Quit);
        handle
            .wait_for(|s| s.should_quit, Duration::from_secs(1))
            .await
            .unwrap();
        task.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_headless_help_overlay() {
        let (mut handle, task) = run_tui_headless(seeded_config());

        handle.send_action(Action::Help);
        let state = handle
            .wait_for(|s| s.show_help, Duration::from_secs(1))
            .await
            .unwrap();
        assert!(state.screen_contents.contains("Toggle this help"));

        handle.send_action(Action::Quit);
        task.await.unwrap().unwrap();
        assert!(handle.has_quit());
    }
}
