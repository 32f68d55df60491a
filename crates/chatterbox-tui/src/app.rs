//! Application state for the chatterbox TUI.

use std::path::PathBuf;

use chatterbox_engine::{export_markdown, ChatSession, Config, Submission};
use tracing::{debug, info, warn};

use crate::event::Action;
use crate::input::TextInputState;
use crate::theme::{BorderSet, IconMode, IconSet, Theme, ThemeName};
use crate::widgets::MessageListState;

/// Lines scrolled per mouse wheel notch.
const WHEEL_STEP: usize = 3;

/// Ticks a notification stays visible.
const NOTIFICATION_TICKS: usize = 30;

/// UI configuration (from environment and command line).
#[derive(Debug, Clone, Default)]
pub struct UiConfig {
    /// Icon mode (Nerd, Unicode, or ASCII).
    pub icons: IconMode,
    /// Color palette.
    pub theme: ThemeName,
}

impl UiConfig {
    /// Create config from environment.
    ///
    /// `NO_COLOR` forces ASCII icons. Otherwise `CHATTERBOX_ICONS`
    /// (`nerd`, `unicode`, `ascii`) picks the icon mode.
    pub fn from_env() -> Self {
        let icons = if std::env::var_os("NO_COLOR").is_some() {
            IconMode::Ascii
        } else {
            std::env::var("CHATTERBOX_ICONS")
                .ok()
                .and_then(|v| IconMode::parse(&v))
                .unwrap_or_default()
        };
        Self {
            icons,
            theme: ThemeName::default(),
        }
    }

    /// Set the color palette.
    #[must_use]
    pub fn with_theme(mut self, theme: ThemeName) -> Self {
        self.theme = theme;
        self
    }
}

/// Severity of a footer notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Error,
}

/// A transient message shown in the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Info,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Error,
        }
    }
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// Whether the help overlay is visible.
    pub show_help: bool,

    /// The conversation and its simulated assistant.
    pub session: ChatSession,

    /// Message input.
    pub input: TextInputState,

    /// Scroll state of the message list.
    pub messages: MessageListState,

    pub theme: Theme,
    pub icons: IconSet,
    pub borders: BorderSet,

    /// Tick counter for animations.
    pub tick: usize,

    /// Notification message (cleared after some ticks).
    pub notification: Option<Notification>,

    /// Ticks remaining until notification is cleared.
    notification_ttl: usize,

    /// Directory transcripts are exported into.
    pub export_dir: PathBuf,
}

impl App {
    /// Create a new app instance.
    pub fn new(config: &Config, ui: &UiConfig, export_dir: PathBuf) -> Self {
        Self {
            should_quit: false,
            show_help: false,
            session: ChatSession::new(config),
            input: TextInputState::new(),
            messages: MessageListState::new(),
            theme: Theme::named(ui.theme),
            icons: IconSet::new(ui.icons),
            borders: BorderSet::new(ui.icons),
            tick: 0,
            notification: None,
            notification_ttl: 0,
            export_dir,
        }
    }

    /// Create an app with a seeded session and ASCII icons for testing.
    #[cfg(test)]
    pub fn new_for_test() -> Self {
        let config = Config {
            seed: Some(7),
            ..Config::default()
        };
        let ui = UiConfig {
            icons: IconMode::Ascii,
            theme: ThemeName::Mocha,
        };
        Self::new(&config, &ui, std::env::temp_dir())
    }

    /// Whether the assistant is typing (input disabled).
    pub fn is_typing(&self) -> bool {
        self.session.is_typing()
    }

    /// Handle an action.
    pub fn handle_action(&mut self, action: Action) {
        // Global actions
        match action {
            Action::Quit => {
                self.quit();
                return;
            }
            Action::Help => {
                self.show_help = !self.show_help;
                return;
            }
            Action::None => return,
            _ => {}
        }

        // If help is showing, any key closes it
        if self.show_help {
            self.show_help = false;
            return;
        }

        match action {
            Action::Back => {
                if self.input.is_empty() {
                    self.quit();
                } else {
                    self.input.clear();
                }
            }
            Action::Export => self.export_transcript(),
            Action::Up => {
                if self.can_edit()
                    && self.input.has_history()
                    && (self.input.is_empty() || self.input.is_browsing_history())
                {
                    self.input.history_prev();
                } else {
                    self.messages.scroll_up(1);
                }
            }
            Action::Down => {
                if self.can_edit() && self.input.is_browsing_history() {
                    self.input.history_next();
                } else {
                    self.messages.scroll_down(1);
                }
            }
            Action::PageUp => self.messages.page_up(),
            Action::PageDown => self.messages.page_down(),
            Action::ScrollUp => self.messages.scroll_up(WHEEL_STEP),
            Action::ScrollDown => self.messages.scroll_down(WHEEL_STEP),
            Action::JumpToLatest => self.messages.jump_to_latest(),
            _ if !self.can_edit() => {}
            Action::Submit => self.submit(),
            Action::Newline => self.input.insert('\n'),
            Action::Insert(c) => self.input.insert(c),
            Action::Backspace => self.input.backspace(),
            Action::Delete => self.input.delete(),
            Action::CursorLeft => self.input.move_left(),
            Action::CursorRight => self.input.move_right(),
            Action::CursorHome => self.input.move_home(),
            Action::CursorEnd => self.input.move_end(),
            Action::Quit | Action::Help | Action::None => {}
        }
    }

    /// Insert pasted text at the cursor. Terminal line endings become `\n`.
    pub fn paste(&mut self, text: &str) {
        if self.show_help || !self.can_edit() {
            return;
        }
        self.input.insert_str(&text.replace("\r\n", "\n").replace('\r', "\n"));
    }

    /// Input is disabled while the assistant is typing.
    fn can_edit(&self) -> bool {
        !self.is_typing()
    }

    /// Submit the input. It is cleared only when the session accepts it.
    fn submit(&mut self) {
        match self.session.submit(self.input.content()) {
            Submission::Accepted(id) => {
                self.input.submit();
                self.messages.jump_to_latest();
                debug!(%id, "submitted message");
            }
            Submission::Ignored(reason) => {
                debug!(?reason, "submission ignored");
            }
        }
    }

    /// Deliver a reply if one has arrived. Returns `true` if one was appended.
    pub fn poll_replies(&mut self) -> bool {
        if self.session.try_next_reply().is_some() {
            self.messages.jump_to_latest();
            true
        } else {
            false
        }
    }

    /// Advance animations and expire notifications.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);

        if self.notification_ttl > 0 {
            self.notification_ttl -= 1;
            if self.notification_ttl == 0 {
                self.notification = None;
            }
        }
    }

    /// Set a temporary notification message.
    fn set_notification(&mut self, notification: Notification) {
        self.notification = Some(notification);
        self.notification_ttl = NOTIFICATION_TICKS;
    }

    /// Export the conversation as Markdown into the export directory.
    fn export_transcript(&mut self) {
        match export_markdown(self.session.conversation(), &self.export_dir) {
            Ok(path) => {
                self.set_notification(Notification::info(format!(
                    "Exported to {}",
                    path.display()
                )));
            }
            Err(e) => {
                warn!(error = %e, dir = %self.export_dir.display(), "transcript export failed");
                self.set_notification(Notification::error(format!("Export failed: {e}")));
            }
        }
    }

    fn quit(&mut self) {
        info!(
            messages = self.session.conversation().len(),
            "leaving chat"
        );
        self.session.cancel_pending();
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatterbox_engine::{Sender, CANNED_REPLIES, TRANSCRIPT_FILE_NAME};
    use std::time::Duration;
    use tempfile::TempDir;

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_action(Action::Insert(c));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_paste_inserts_at_cursor() {
        let mut app = App::new_for_test();
        type_text(&mut app, "ab");
        app.handle_action(Action::CursorLeft);
        app.paste("one\r\ntwo\r");
        assert_eq!(app.input.content(), "aone\ntwo\nb");

        app.handle_action(Action::Submit);
        assert!(app.is_typing());
        app.paste("ignored");
        assert!(app.input.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_and_receive_reply() {
        let mut app = App::new_for_test();
        type_text(&mut app, "Hi");
        app.handle_action(Action::Submit);

        let conv = app.session.conversation();
        assert_eq!(conv.len(), 2);
        assert_eq!(conv.last().unwrap().content, "Hi");
        assert!(app.input.is_empty());
        assert!(app.is_typing());
        assert!(!app.poll_replies());

        tokio::time::sleep(Duration::from_millis(3000)).await;
        assert!(app.poll_replies());

        let last = app.session.conversation().last().unwrap();
        assert_eq!(last.sender, Sender::Ai);
        assert!(CANNED_REPLIES.contains(&last.content.as_str()));
        assert!(!app.is_typing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_submit_keeps_input() {
        let mut app = App::new_for_test();
        type_text(&mut app, "   ");
        app.handle_action(Action::Submit);

        assert_eq!(app.session.conversation().len(), 1);
        assert_eq!(app.input.content(), "   ");
        assert!(!app.is_typing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_input_disabled_while_typing() {
        let mut app = App::new_for_test();
        type_text(&mut app, "first");
        app.handle_action(Action::Submit);

        type_text(&mut app, "second");
        app.handle_action(Action::Submit);

        assert!(app.input.is_empty());
        assert_eq!(app.session.conversation().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_newline_inserted() {
        let mut app = App::new_for_test();
        type_text(&mut app, "a");
        app.handle_action(Action::Newline);
        type_text(&mut app, "b");
        app.handle_action(Action::Submit);

        assert_eq!(app.session.conversation().last().unwrap().content, "a\nb");
    }

    #[test]
    fn test_escape_clears_then_quits() {
        let mut app = App::new_for_test();
        type_text(&mut app, "draft");

        app.handle_action(Action::Back);
        assert!(app.input.is_empty());
        assert!(!app.should_quit);

        app.handle_action(Action::Back);
        assert!(app.should_quit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_cancels_pending_reply() {
        let mut app = App::new_for_test();
        type_text(&mut app, "Hi");
        app.handle_action(Action::Submit);
        assert!(app.session.has_pending_reply());

        app.handle_action(Action::Quit);
        assert!(app.should_quit);
        assert!(!app.session.has_pending_reply());
        assert!(!app.is_typing());
    }

    #[test]
    fn test_help_overlay_toggle() {
        let mut app = App::new_for_test();
        assert!(!app.show_help);

        app.handle_action(Action::Help);
        assert!(app.show_help);

        // Any key closes help without reaching the input
        app.handle_action(Action::Insert('x'));
        assert!(!app.show_help);
        assert!(app.input.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_up_recalls_history() {
        let mut app = App::new_for_test();
        type_text(&mut app, "Hi");
        app.handle_action(Action::Submit);
        tokio::time::sleep(Duration::from_millis(3000)).await;
        app.poll_replies();

        app.handle_action(Action::Up);
        assert_eq!(app.input.content(), "Hi");
        assert!(app.messages.is_following());

        app.handle_action(Action::Down);
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_up_scrolls_without_history() {
        let mut app = App::new_for_test();
        app.handle_action(Action::Up);
        assert!(!app.messages.is_following());

        app.handle_action(Action::JumpToLatest);
        assert!(app.messages.is_following());
    }

    #[tokio::test(start_paused = true)]
    async fn test_arrows_scroll_over_a_draft() {
        let mut app = App::new_for_test();
        type_text(&mut app, "Hi");
        app.handle_action(Action::Submit);
        tokio::time::sleep(Duration::from_millis(3000)).await;
        assert!(app.poll_replies());

        // A draft that is not a history entry keeps the arrows on the list.
        type_text(&mut app, "draft");
        app.handle_action(Action::Up);
        assert_eq!(app.input.content(), "draft");
        assert!(!app.messages.is_following());

        app.handle_action(Action::Down);
        assert_eq!(app.input.content(), "draft");
        assert!(app.messages.is_following());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_message_scrolls_to_latest() {
        let mut app = App::new_for_test();
        app.handle_action(Action::ScrollUp);
        assert!(!app.messages.is_following());

        type_text(&mut app, "Hi");
        app.handle_action(Action::Submit);
        assert!(app.messages.is_following());

        app.handle_action(Action::PageUp);
        tokio::time::sleep(Duration::from_millis(3000)).await;
        assert!(app.poll_replies());
        assert!(app.messages.is_following());
    }

    #[test]
    fn test_export_transcript() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new_for_test();
        app.export_dir = dir.path().to_path_buf();

        app.handle_action(Action::Export);

        let written = std::fs::read_to_string(dir.path().join(TRANSCRIPT_FILE_NAME)).unwrap();
        assert!(written.contains("Hello! I'm your AI assistant."));
        let notification = app.notification.as_ref().unwrap();
        assert_eq!(notification.kind, NotificationKind::Info);
        assert!(notification.message.starts_with("Exported to"));
    }

    #[test]
    fn test_export_failure_notifies() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        let mut app = App::new_for_test();
        app.export_dir = blocker;
        app.handle_action(Action::Export);

        let notification = app.notification.as_ref().unwrap();
        assert_eq!(notification.kind, NotificationKind::Error);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_notification_expires() {
        let mut app = App::new_for_test();
        app.set_notification(Notification::info("hello"));

        for _ in 0..NOTIFICATION_TICKS - 1 {
            app.tick();
        }
        assert!(app.notification.is_some());

        app.tick();
        assert!(app.notification.is_none());
    }

    #[test]
    fn test_ui_config_theme() {
        let ui = UiConfig::default().with_theme(ThemeName::Latte);
        assert_eq!(ui.theme, ThemeName::Latte);
    }
}
