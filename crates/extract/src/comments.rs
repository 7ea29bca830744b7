//! Line comment removal.

use crate::balance::ScanState;
use std::borrow::Cow;

/// Remove `#` line comments from a GraphQL document.
///
/// Everything from a `#` up to (not including) the next `\n` is dropped, so
/// line structure survives. A `#` inside a string literal is content, not a
/// comment start.
///
/// Returns the input unchanged (borrowed) when it contains no `#` at all.
#[must_use]
pub fn strip_comments(document: &str) -> Cow<'_, str> {
    if !document.contains('#') {
        return Cow::Borrowed(document);
    }

    let bytes = document.as_bytes();
    let mut out = String::with_capacity(document.len());
    let mut state = ScanState::Normal;
    let mut copied_from = 0;
    let mut index = 0;

    while index < bytes.len() {
        let byte = bytes[index];
        if byte == b'#' && state.is_structural() {
            out.push_str(&document[copied_from..index]);
            index = document[index..]
                .find('\n')
                .map_or(bytes.len(), |newline| index + newline);
            copied_from = index;
            continue;
        }
        state = state.step(byte);
        index += 1;
    }
    out.push_str(&document[copied_from..]);

    Cow::Owned(out)
}
