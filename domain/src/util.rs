//! Shared helpers.

use std::borrow::Cow;

/// Shorten `text` to at most `max_chars` characters for log lines, marking
/// the cut with `...`.
pub fn preview(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        None => Cow::Borrowed(text),
        Some((end, _)) => Cow::Owned(format!("{}...", &text[..end])),
    }
}
