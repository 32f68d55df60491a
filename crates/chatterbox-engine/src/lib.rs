//! chatterbox-engine: Headless core of the chatterbox chat app
//!
//! This crate provides everything that is not presentation:
//! - The append-only conversation store and its typing flag
//! - The response simulator that fabricates delayed canned replies
//! - The chat session that owns both and the pending reply timer
//! - Configuration and Markdown transcript export

pub mod config;
pub mod conversation;
pub mod message;
pub mod session;
pub mod simulator;
pub mod transcript;

// Re-export commonly used types
pub use config::{Config, ConfigError, ReplyDelay};
pub use conversation::{Conversation, DEFAULT_GREETING};
pub use message::{Message, MessageId, Sender};
pub use session::{ChatSession, IgnoreReason, Submission};
pub use simulator::{PendingReply, PlannedReply, ReplyReady, ResponseSimulator, CANNED_REPLIES};
pub use transcript::{export_markdown, render_markdown, TranscriptError, TRANSCRIPT_FILE_NAME};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
