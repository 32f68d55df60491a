//! Message wrapping for the message list.

/// Wrap message content to `width` columns.
///
/// Explicit newlines are kept, and blank lines inside a message survive as
/// empty rows. Always returns at least one line.
pub fn wrap_message(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        lines.extend(
            textwrap::wrap(paragraph, width)
                .into_iter()
                .map(std::borrow::Cow::into_owned),
        );
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
