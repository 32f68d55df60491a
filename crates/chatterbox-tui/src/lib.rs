//! chatterbox-tui: Terminal UI for chatterbox
//!
//! This crate provides the TUI layer for chatterbox, including:
//! - The chat screen (header, message list, input bar, footer)
//! - Themes, icons, and ASCII fallback for `NO_COLOR`
//! - Headless mode for testing and automation

mod app;
mod event;
pub mod headless;
mod input;
#[cfg(test)]
pub mod test_utils;
mod text;
pub mod theme;
mod ui;
mod widgets;

pub use app::{App, Notification, NotificationKind, UiConfig};
pub use chatterbox_engine;
pub use event::{Action, Event, EventHandler};

use chatterbox_engine::Config;
use crossterm::{
    cursor::Show as ShowCursor,
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::path::PathBuf;
use tracing::info;

/// Event polling interval; also drives reply polling and animations.
const TICK_RATE_MS: u64 = 100;

/// Options for an interactive TUI session.
#[derive(Debug, Clone)]
pub struct TuiOptions {
    /// Chat configuration.
    pub config: Config,
    /// Icons and palette.
    pub ui: UiConfig,
    /// Directory transcripts are exported into.
    pub export_dir: PathBuf,
}

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen,
            ShowCursor
        );
    }
}

/// Run the TUI application.
///
/// This is the main entry point for the TUI. It sets up the terminal,
/// runs the event loop, and restores the terminal on exit.
pub async fn run_tui(options: TuiOptions) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&options.config, &options.ui, options.export_dir);
    info!(
        min_ms = options.config.reply_delay.min_ms,
        max_ms = options.config.reply_delay.max_ms,
        seeded = options.config.seed.is_some(),
        "chat session started"
    );

    let mut events = EventHandler::new(TICK_RATE_MS);

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    // Restore cursor before guard drops
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.poll_replies();

        terminal.draw(|frame| ui::draw(frame, app))?;

        if app.should_quit {
            break;
        }

        match events.next().await {
            Some(Event::Key(key)) => app.handle_action(event::key_to_action(key)),
            Some(Event::Mouse(mouse)) => app.handle_action(event::mouse_to_action(mouse)),
            Some(Event::Paste(text)) => app.paste(&text),
            Some(Event::Tick) => app.tick(),
            // Redrawn on the next iteration
            Some(Event::Resize(_, _)) => {}
            None => break,
        }
    }

    Ok(())
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
