//! Top-level operation discovery.

use crate::balance::balanced_block;
use crate::cursor::{is_name_byte, Cursor};
use crate::keywords::is_keyword;
use serde::Serialize;

/// The kind of a top-level operation block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Introduced by the `query` keyword (named or not).
    Query,
    /// Introduced by the `mutation` keyword (named or not).
    Mutation,
    /// A bare `{ ... }` at the very start of the document, implicitly a query.
    Anonymous,
}

impl OperationKind {
    /// Recognize an operation keyword, case-insensitively.
    fn from_keyword(word: &str) -> Option<Self> {
        if word.eq_ignore_ascii_case("query") {
            Some(Self::Query)
        } else if word.eq_ignore_ascii_case("mutation") {
            Some(Self::Mutation)
        } else {
            None
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Query => write!(f, "query"),
            Self::Mutation => write!(f, "mutation"),
            Self::Anonymous => write!(f, "anonymous"),
        }
    }
}

/// One operation's selection set, without its outer braces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationBlock<'a> {
    pub kind: OperationKind,
    pub body: &'a str,
}

/// Collapse every whitespace run to a single space and trim both ends.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Find every top-level `query`, `mutation` and anonymous block, in
/// document order.
///
/// A `query` or `mutation` keyword opens a block when it is followed by an
/// optional name, optional variable definitions, optional directives and
/// then `{`. A keyword that names a type (`type Query`, `on Mutation`) or
/// an argument (`query: "..."`) opens nothing. Bodies of other definitions
/// (`subscription`, `fragment`, type system definitions) are skipped whole
/// and never reported. Blocks whose body is blank are dropped.
///
/// A block that never closes is dropped and scanning resumes just past its
/// `{`, so one malformed operation does not hide the ones around it.
#[must_use]
pub fn locate_operations(text: &str) -> Vec<OperationBlock<'_>> {
    let document_start = text.len() - text.trim_start().len();
    let mut cursor = Cursor::new(text);
    let mut blocks = Vec::new();
    let mut pending: Option<OperationKind> = None;
    let mut after_keyword = false;

    loop {
        cursor.skip_trivia();
        let Some(byte) = cursor.peek() else {
            break;
        };

        match byte {
            b'{' => {
                after_keyword = false;
                let start = cursor.pos();
                let kind = pending
                    .take()
                    .or_else(|| (start == document_start).then_some(OperationKind::Anonymous));

                let Some(block) = balanced_block(text, start) else {
                    tracing::trace!(
                        kind = ?kind,
                        offset = start,
                        "unterminated block, skipping its brace"
                    );
                    cursor.bump();
                    continue;
                };

                match kind {
                    Some(kind) if !block.body.trim().is_empty() => {
                        tracing::trace!(%kind, offset = start, "found operation block");
                        blocks.push(OperationBlock {
                            kind,
                            body: block.body,
                        });
                    }
                    Some(kind) => tracing::trace!(%kind, offset = start, "empty operation block"),
                    None => tracing::trace!(offset = start, "skipping non-operation block"),
                }
                cursor.set_pos(block.end());
            }
            // Variable definitions: defaults may contain `{`.
            b'(' => {
                after_keyword = false;
                cursor.skip_arguments();
            }
            b'"' => {
                after_keyword = false;
                cursor.skip_string();
            }
            byte if is_name_byte(byte) => {
                let word = cursor.eat_name().unwrap_or_default();
                let kind = OperationKind::from_keyword(word).filter(|_| !after_keyword);
                after_keyword = is_keyword(word);
                if let Some(kind) = kind {
                    if opens_block(&mut cursor) {
                        pending = Some(kind);
                        after_keyword = false;
                    }
                }
            }
            _ => {
                after_keyword = false;
                cursor.bump();
            }
        }
    }

    blocks
}

/// Whether an operation header (`Name($vars) @dirs`) follows the cursor and
/// ends at a `{`. On success the cursor is left on that `{`; otherwise it is
/// not moved.
fn opens_block(cursor: &mut Cursor<'_>) -> bool {
    let resume = cursor.pos();

    cursor.skip_trivia();
    if cursor.eat_name().is_some() {
        cursor.skip_trivia();
    }
    if cursor.peek() == Some(b'(') {
        if !cursor.skip_group(b'(', b')') {
            cursor.set_pos(resume);
            return false;
        }
        cursor.skip_trivia();
    }
    cursor.skip_directives();

    if cursor.peek() == Some(b'{') {
        true
    } else {
        cursor.set_pos(resume);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_bodies(text: &str) -> Vec<(OperationKind, &str)> {
        locate_operations(text)
            .into_iter()
            .map(|block| (block.kind, block.body))
            .collect()
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(
            normalize_whitespace("  query\n\tFoo  {\r\n a }  "),
            "query Foo { a }"
        );
        assert_eq!(normalize_whitespace(" \n "), "");
    }

    #[test]
    fn test_named_query() {
        assert_eq!(
            kinds_and_bodies("query Foo { a { b } }"),
            vec![(OperationKind::Query, " a { b } ")]
        );
    }

    #[test]
    fn test_keyword_without_name() {
        assert_eq!(
            kinds_and_bodies("mutation { a }"),
            vec![(OperationKind::Mutation, " a ")]
        );
    }

    #[test]
    fn test_keyword_is_case_insensitive() {
        assert_eq!(
            kinds_and_bodies("QUERY Foo { a } Mutation Bar { b }"),
            vec![(OperationKind::Query, " a "), (OperationKind::Mutation, " b ")]
        );
    }

    #[test]
    fn test_keyword_without_space_before_brace() {
        assert_eq!(
            kinds_and_bodies("query{a{b}}"),
            vec![(OperationKind::Query, "a{b}")]
        );
    }

    #[test]
    fn test_anonymous_block() {
        assert_eq!(
            kinds_and_bodies("{ viewer { id } }"),
            vec![(OperationKind::Anonymous, " viewer { id } ")]
        );
    }

    #[test]
    fn test_anonymous_only_at_document_start() {
        assert_eq!(
            kinds_and_bodies("query A { a } { b }"),
            vec![(OperationKind::Query, " a ")]
        );
    }

    #[test]
    fn test_multiple_operations_in_order() {
        assert_eq!(
            kinds_and_bodies("query A { a } mutation B { b } query C { c }"),
            vec![
                (OperationKind::Query, " a "),
                (OperationKind::Mutation, " b "),
                (OperationKind::Query, " c "),
            ]
        );
    }

    #[test]
    fn test_variable_defaults_with_braces() {
        assert_eq!(
            kinds_and_bodies("query Q($f: Filter = {a: 1}) @cached { items { id } }"),
            vec![(OperationKind::Query, " items { id } ")]
        );
    }

    #[test]
    fn test_field_named_query_does_not_open_block() {
        assert_eq!(
            kinds_and_bodies("{ search(query: \"x\") { id } }"),
            vec![(
                OperationKind::Anonymous,
                " search(query: \"x\") { id } "
            )]
        );
    }

    #[test]
    fn test_other_definitions_are_skipped() {
        let text = "fragment F on Query { query } subscription S { s } query Q { q }";
        assert_eq!(
            kinds_and_bodies(text),
            vec![(OperationKind::Query, " q ")]
        );
    }

    #[test]
    fn test_empty_blocks_are_dropped() {
        assert!(kinds_and_bodies("query A { } query B {}").is_empty());
    }

    #[test]
    fn test_unterminated_block_keeps_earlier_blocks() {
        assert_eq!(
            kinds_and_bodies("query A { a } mutation B { b { c }"),
            vec![(OperationKind::Query, " a ")]
        );
    }

    #[test]
    fn test_unterminated_block_does_not_hide_later_blocks() {
        assert_eq!(
            kinds_and_bodies("query A { a { id } mutation B { b { id } }"),
            vec![(OperationKind::Mutation, " b { id } ")]
        );
    }

    #[test]
    fn test_stray_token_between_operations() {
        assert_eq!(
            kinds_and_bodies("query A { a } junk query B { b }"),
            vec![(OperationKind::Query, " a "), (OperationKind::Query, " b ")]
        );
    }

    #[test]
    fn test_type_names_are_not_operations() {
        let text = "type Query { user: User } extend type Mutation { m: M } query Q { q }";
        assert_eq!(kinds_and_bodies(text), vec![(OperationKind::Query, " q ")]);
    }

    #[test]
    fn test_keyword_followed_by_colon_opens_nothing() {
        assert_eq!(
            kinds_and_bodies("{ a } x query: { b }"),
            vec![(OperationKind::Anonymous, " a ")]
        );
    }

    #[test]
    fn test_unterminated_variable_definitions_open_nothing() {
        assert!(kinds_and_bodies("query Q($a: Int { a }").is_empty());
    }

    #[test]
    fn test_no_braces() {
        assert!(kinds_and_bodies("query Foo").is_empty());
        assert!(kinds_and_bodies("").is_empty());
    }
}
