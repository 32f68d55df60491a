//! Markdown transcript export.
//!
//! Export is one-way: transcripts are written for the user to keep and are
//! never read back.

use crate::conversation::Conversation;
use chrono::{Local, Utc};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name used for exported transcripts.
pub const TRANSCRIPT_FILE_NAME: &str = "chatterbox-transcript.md";

/// Render the conversation as Markdown, with local `HH:MM` timestamps.
pub fn render_markdown(conversation: &Conversation) -> String {
    let mut out = String::new();
    out.push_str("# Chatterbox Transcript\n\n");
    let _ = write!(
        out,
        "Exported: {}\n\n",
        Utc::now().with_timezone(&Local).format("%Y-%m-%d %H:%M")
    );
    out.push_str("---\n");

    for msg in conversation.messages() {
        let time = msg.timestamp.with_timezone(&Local).format("%H:%M");
        let _ = write!(out, "\n### {} ({time})\n\n", msg.sender.label());
        out.push_str(&msg.content);
        out.push('\n');
    }

    out
}

/// Write the transcript into `dir`, returning the path written.
pub fn export_markdown(conversation: &Conversation, dir: &Path) -> Result<PathBuf, TranscriptError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(TRANSCRIPT_FILE_NAME);
    std::fs::write(&path, render_markdown(conversation))?;
    info!(path = %path.display(), messages = conversation.len(), "transcript exported");
    Ok(path)
}

/// Errors that can occur while exporting a transcript.
#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::CANNED_REPLIES;
    use tempfile::TempDir;

    fn sample_conversation() -> Conversation {
        let mut conv = Conversation::new();
        conv.append_user_message("Hi");
        conv.append_ai_message(CANNED_REPLIES[2]);
        conv
    }

    #[test]
    fn test_render_markdown_layout() {
        let markdown = render_markdown(&sample_conversation());

        insta::with_settings!({filters => vec![
            (r"\d{4}-\d{2}-\d{2} \d{2}:\d{2}", "[datetime]"),
            (r"\d{2}:\d{2}", "[time]"),
        ]}, {
            insta::assert_snapshot!(markdown, @r"
            # Chatterbox Transcript

            Exported: [datetime]

            ---

            ### Assistant ([time])

            Hello! I'm your AI assistant. How can I help you today?

            ### You ([time])

            Hi

            ### Assistant ([time])

            Great point! I'd be happy to help you with that.
            ");
        });
    }

    #[test]
    fn test_multiline_content_kept_verbatim() {
        let mut conv = Conversation::new();
        conv.append_user_message("line one\nline two");
        let markdown = render_markdown(&conv);
        assert!(markdown.contains("line one\nline two\n"));
    }

    #[test]
    fn test_export_writes_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("exports");

        let path = export_markdown(&sample_conversation(), &target).unwrap();
        assert_eq!(path, target.join(TRANSCRIPT_FILE_NAME));

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# Chatterbox Transcript"));
        assert!(written.contains("### You"));
    }

    #[test]
    fn test_export_into_file_path_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();

        let err = export_markdown(&sample_conversation(), &blocker).unwrap_err();
        assert!(matches!(err, TranscriptError::Io(_)));
    }
}
