//! Brace balancing over GraphQL text.
//!
//! The scanner is a three-state machine ([`ScanState`]) that knows just
//! enough about string literals to ignore the braces inside them. It does
//! not understand block strings specially: `"""` toggles the string state
//! three times, which nets out to the same result.

/// Lexical state of the brace scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    /// Outside of any string literal.
    #[default]
    Normal,
    /// Inside a `"..."` string literal.
    InString,
    /// Inside a string literal, right after an unescaped `\`.
    Escaped,
}

impl ScanState {
    /// Advance the machine by one byte.
    ///
    /// Only ASCII bytes change state, so feeding the UTF-8 bytes of a `&str`
    /// one at a time is safe: continuation bytes never look like `"` or `\`.
    #[must_use]
    pub const fn step(self, byte: u8) -> Self {
        match (self, byte) {
            (Self::Normal, b'"') | (Self::InString, b'"') => self.toggle(),
            (Self::InString, b'\\') => Self::Escaped,
            (Self::Escaped, _) => Self::InString,
            _ => self,
        }
    }

    /// Whether a brace seen in this state counts toward nesting.
    #[must_use]
    pub const fn is_structural(self) -> bool {
        matches!(self, Self::Normal)
    }

    const fn toggle(self) -> Self {
        match self {
            Self::Normal => Self::InString,
            _ => Self::Normal,
        }
    }
}

/// A balanced `{ ... }` region found by [`balanced_block`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    /// Text strictly between the outer braces.
    pub body: &'a str,
    /// Byte offset of the opening `{`.
    pub open: usize,
    /// Byte offset of the matching `}`.
    pub close: usize,
}

impl Block<'_> {
    /// Byte offset just past the closing brace.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.close + 1
    }
}

/// Find the first `{` at or after `offset` and return the region up to its
/// matching `}`.
///
/// Returns `None` when there is no `{` at or after `offset`, when `offset`
/// is out of range or not on a character boundary, or when the text ends
/// before the block closes. None of these are errors: callers skip the
/// candidate and move on.
///
/// ```
/// use graphql_resource_extract::balanced_block;
///
/// let text = r#"query { search(q: "a{b}c") { results } }"#;
/// let block = balanced_block(text, 0).unwrap();
/// assert_eq!(block.body, r#" search(q: "a{b}c") { results } "#);
/// ```
#[must_use]
pub fn balanced_block(text: &str, offset: usize) -> Option<Block<'_>> {
    let tail = text.get(offset..)?;
    let open = offset + tail.find('{')?;
    let bytes = text.as_bytes();

    let mut state = ScanState::Normal;
    let mut depth: isize = 0;
    for (index, &byte) in bytes.iter().enumerate().skip(open) {
        if state.is_structural() {
            match byte {
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(Block {
                            body: &text[open + 1..index],
                            open,
                            close: index,
                        });
                    }
                }
                _ => {}
            }
        }
        state = state.step(byte);
    }

    tracing::trace!(open, "block never closes");
    None
}

/// Skip a parenthesized group starting at `start` (which must hold `(`).
///
/// Returns the offset just past the matching `)`, or `None` if the group is
/// unterminated. Strings are honored the same way as in [`balanced_block`].
pub(crate) fn skip_group(bytes: &[u8], start: usize, open: u8, close: u8) -> Option<usize> {
    debug_assert_eq!(bytes.get(start), Some(&open));

    let mut state = ScanState::Normal;
    let mut depth: isize = 0;
    for (index, &byte) in bytes.iter().enumerate().skip(start) {
        if state.is_structural() {
            if byte == open {
                depth += 1;
            } else if byte == close {
                depth -= 1;
                if depth == 0 {
                    return Some(index + 1);
                }
            }
        }
        state = state.step(byte);
    }
    None
}

/// Skip a string literal starting at `start` (which must hold `"`).
///
/// Returns the offset just past the closing quote, or the end of input for
/// an unterminated string.
pub(crate) fn skip_string(bytes: &[u8], start: usize) -> usize {
    let mut state = ScanState::Normal.step(bytes[start]);
    let mut index = start + 1;
    while index < bytes.len() {
        state = state.step(bytes[index]);
        index += 1;
        if state == ScanState::Normal {
            return index;
        }
    }
    bytes.len()
}
