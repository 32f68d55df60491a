//! Message types for a chatterbox conversation.
//!
//! Messages are immutable once created: the store only ever appends them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person typing into the input bar.
    User,
    /// The simulated assistant.
    Ai,
}

impl Sender {
    /// Display label used in transcripts and the message list.
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "You",
            Self::Ai => "Assistant",
        }
    }
}

/// Opaque unique message identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single message in the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier.
    pub id: MessageId,
    /// Message text, stored exactly as submitted.
    pub content: String,
    /// Author of the message.
    pub sender: Sender,
    /// Creation time.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Sender::User, content)
    }

    /// Create a new assistant message.
    pub fn ai(content: impl Into<String>) -> Self {
        Self::new(Sender::Ai, content)
    }

    fn new(sender: Sender, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            content: content.into(),
            sender,
            timestamp: Utc::now(),
        }
    }

    /// Whether the user wrote this message.
    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}
