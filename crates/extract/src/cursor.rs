//! Byte cursor shared by the block locator and the field strategies.

use crate::balance::{balanced_block, skip_group, skip_string};

/// Whether a byte can appear in a GraphQL name token.
pub(crate) const fn is_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Forward-only cursor over GraphQL text.
///
/// Every method leaves the position on a character boundary: the cursor only
/// ever stops next to an ASCII byte.
pub(crate) struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) const fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    pub(crate) const fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    /// Move past the current character.
    pub(crate) fn bump(&mut self) {
        if let Some(ch) = self.text[self.pos..].chars().next() {
            self.pos += ch.len_utf8();
        }
    }

    /// Skip whitespace and commas, which GraphQL treats as insignificant.
    pub(crate) fn skip_trivia(&mut self) {
        while self
            .peek()
            .is_some_and(|byte| byte.is_ascii_whitespace() || byte == b',')
        {
            self.pos += 1;
        }
    }

    /// Consume a name token at the current position, if there is one.
    pub(crate) fn eat_name(&mut self) -> Option<&'a str> {
        let bytes = self.text.as_bytes();
        let start = self.pos;
        while bytes.get(self.pos).copied().is_some_and(is_name_byte) {
            self.pos += 1;
        }
        (self.pos > start).then(|| &self.text[start..self.pos])
    }

    /// Skip a string literal starting at the current `"`.
    pub(crate) fn skip_string(&mut self) {
        self.pos = skip_string(self.text.as_bytes(), self.pos);
    }

    /// Skip a balanced `open ... close` group starting at the current byte.
    ///
    /// Returns `false` and leaves the cursor in place if the group never
    /// closes.
    pub(crate) fn skip_group(&mut self, open: u8, close: u8) -> bool {
        match skip_group(self.text.as_bytes(), self.pos, open, close) {
            Some(end) => {
                self.pos = end;
                true
            }
            None => false,
        }
    }

    /// Skip a parenthesized argument list, or just the `(` when it is
    /// unterminated.
    pub(crate) fn skip_arguments(&mut self) {
        if !self.skip_group(b'(', b')') {
            self.bump();
        }
    }

    /// Skip the `{ ... }` block starting at the current position. An
    /// unterminated block swallows the rest of the input.
    pub(crate) fn skip_block(&mut self) {
        self.pos = balanced_block(self.text, self.pos).map_or(self.text.len(), |block| block.end());
    }

    /// Skip any directives (`@name(args)`) at the current position.
    pub(crate) fn skip_directives(&mut self) {
        while self.peek() == Some(b'@') {
            self.pos += 1;
            self.eat_name();
            self.skip_trivia();
            if self.peek() == Some(b'(') {
                self.skip_arguments();
                self.skip_trivia();
            }
        }
    }

    pub(crate) fn set_pos(&mut self, pos: usize) {
        debug_assert!(self.text.is_char_boundary(pos));
        self.pos = pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eat_name() {
        let mut cursor = Cursor::new("user_1(id: 1)");
        assert_eq!(cursor.eat_name(), Some("user_1"));
        assert_eq!(cursor.peek(), Some(b'('));
        assert_eq!(cursor.eat_name(), None);
    }

    #[test]
    fn test_skip_trivia_includes_commas() {
        let mut cursor = Cursor::new(" ,\n\t, a");
        cursor.skip_trivia();
        assert_eq!(cursor.peek(), Some(b'a'));
    }

    #[test]
    fn test_skip_directives() {
        let mut cursor = Cursor::new("@include(if: $a) @skip(if: \")\") { x }");
        cursor.skip_directives();
        assert_eq!(cursor.peek(), Some(b'{'));
    }

    #[test]
    fn test_skip_unterminated_block() {
        let mut cursor = Cursor::new("{ a { b }");
        cursor.skip_block();
        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn test_bump_multibyte() {
        let mut cursor = Cursor::new("éa");
        cursor.bump();
        assert_eq!(cursor.eat_name(), Some("a"));
    }
}
