//! Conversation store: the ordered message list plus the typing flag.
//!
//! The store is append-only. Insertion order is display order, and every
//! append is a scroll-to-latest signal for whatever view renders it.

use crate::message::Message;

/// Greeting shown as the first assistant message of every conversation.
pub const DEFAULT_GREETING: &str = "Hello! I'm your AI assistant. How can I help you today?";

/// Ordered, append-only list of messages.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    typing: bool,
}

impl Conversation {
    /// Create a conversation seeded with the default greeting.
    pub fn new() -> Self {
        Self::with_greeting(DEFAULT_GREETING)
    }

    /// Create a conversation whose first message is `greeting` from the assistant.
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::ai(greeting)],
            typing: false,
        }
    }

    /// All messages in display order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false in practice, since the greeting is never removed.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The most recent message.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Whether a reply is currently being "typed".
    pub fn is_typing(&self) -> bool {
        self.typing
    }

    /// Append a user message.
    ///
    /// Blank input (empty or whitespace-only) is a no-op and returns `None`.
    /// The content is stored as typed, without trimming.
    pub fn append_user_message(&mut self, text: &str) -> Option<&Message> {
        if text.trim().is_empty() {
            return None;
        }
        self.messages.push(Message::user(text));
        self.messages.last()
    }

    /// Append an assistant message and clear the typing flag.
    pub fn append_ai_message(&mut self, text: impl Into<String>) -> &Message {
        self.messages.push(Message::ai(text));
        self.typing = false;
        &self.messages[self.messages.len() - 1]
    }

    pub(crate) fn set_typing(&mut self, typing: bool) {
        self.typing = typing;
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
