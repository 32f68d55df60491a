//! Editable state of the message input.
//!
//! The cursor is a character index, not a byte index, so multi-byte input
//! never splits a code point.

/// State for the message input, managing content, cursor, and history.
#[derive(Debug, Clone)]
pub struct TextInputState {
    content: String,
    /// Cursor position (character index).
    cursor: usize,
    /// Previously submitted inputs, oldest first.
    history: Vec<String>,
    /// Position while browsing history (`None` = editing fresh input).
    history_index: Option<usize>,
    /// Fresh input saved while browsing history.
    saved_input: String,
}

impl Default for TextInputState {
    fn default() -> Self {
        Self::new()
    }
}

impl TextInputState {
    /// Create a new empty input state.
    pub fn new() -> Self {
        Self {
            content: String::new(),
            cursor: 0,
            history: Vec::new(),
            history_index: None,
            saved_input: String::new(),
        }
    }

    /// Get the current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Cursor position as a character index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Check if the content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Whether there is any history to browse.
    pub fn has_history(&self) -> bool {
        !self.history.is_empty()
    }

    /// Whether the content is a recalled history entry.
    pub fn is_browsing_history(&self) -> bool {
        self.history_index.is_some()
    }

    fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_idx)
            .map_or(self.content.len(), |(i, _)| i)
    }

    /// Clear the content.
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
        self.history_index = None;
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, ch: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, ch);
        self.cursor += 1;
    }

    /// Insert a string at the cursor position.
    pub fn insert_str(&mut self, s: &str) {
        let at = self.byte_index(self.cursor);
        self.content.insert_str(at, s);
        self.cursor += s.chars().count();
    }

    /// Delete the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Delete the character at the cursor (delete).
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Move cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    /// Move cursor to start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end.
    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Take the content for submission, recording it in history.
    pub fn submit(&mut self) -> String {
        let content = std::mem::take(&mut self.content);
        self.cursor = 0;
        if !content.trim().is_empty() {
            self.history.push(content.clone());
        }
        self.history_index = None;
        self.saved_input.clear();
        content
    }

    /// Navigate to the previous (older) history entry.
    pub fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }

        let next = match self.history_index {
            None => {
                self.saved_input = self.content.clone();
                self.history.len() - 1
            }
            Some(0) => return,
            Some(i) => i - 1,
        };

        self.history_index = Some(next);
        self.content = self.history[next].clone();
        self.move_end();
    }

    /// Navigate to the next (newer) history entry, restoring fresh input at the end.
    pub fn history_next(&mut self) {
        let Some(current) = self.history_index else {
            return;
        };

        if current + 1 < self.history.len() {
            self.history_index = Some(current + 1);
            self.content = self.history[current + 1].clone();
        } else {
            self.history_index = None;
            self.content = std::mem::take(&mut self.saved_input);
        }
        self.move_end();
    }
}
