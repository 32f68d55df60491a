//! UI widgets for the TUI.
//!
//! This module provides:
//! - [`Header`] - Title and subtitle at the top
//! - [`MessageList`] - Scrollable conversation with typing indicator
//! - [`InputBar`] - Message input, disabled while the assistant types
//! - [`Footer`] - Notifications and keybinding hints

mod footer;
mod header;
mod input_bar;
mod message_list;

pub use footer::{hints_for_state, Footer, KeyHint};
pub use header::{Header, HEADER_HEIGHT, SUBTITLE, TITLE};
pub use input_bar::{InputBar, PLACEHOLDER, TYPING_TEXT};
pub use message_list::{MessageList, MessageListState};
