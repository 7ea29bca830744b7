//! Root field extraction.
//!
//! A block's root fields are found by an ordered list of [`FieldStrategy`]
//! implementations, from strictest to loosest. The first strategy that
//! yields anything wins; results are never merged across strategies.
//!
//! All strategies share the same rules:
//! - only names at nesting depth 0 of the block are considered
//! - keywords and directive references are excluded (see [`is_field_name`])
//! - an alias (`alias: field`) resolves to the field it aliases

use crate::balance::ScanState;
use crate::cursor::{is_name_byte, Cursor};
use crate::keywords::is_field_name;

/// One heuristic for finding the root fields of a selection set.
pub trait FieldStrategy {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Return the root field names of `block`, in scan order. An empty
    /// result means "try the next strategy".
    fn extract(&self, block: &str) -> Vec<String>;
}

/// Fields that carry their own selection set: `name(args) @dir { ... }`.
///
/// Leaf fields without braces are not matched.
pub struct SelectionPattern;

/// The leading name of every line that starts at depth 0.
pub struct LineScan;

/// Every name left after blanking out nested selection sets.
pub struct DepthCollapse;

/// The strategies tried by [`root_fields`], in order.
pub const STRATEGIES: &[&dyn FieldStrategy] = &[&SelectionPattern, &LineScan, &DepthCollapse];

/// Extract the root field names of one operation block.
///
/// `block` is the text between an operation's outer braces.
///
/// ```
/// use graphql_resource_extract::root_fields;
///
/// let fields = root_fields(" user(id: 1) { name } posts { title } ");
/// assert_eq!(fields, vec!["user", "posts"]);
/// ```
#[must_use]
pub fn root_fields(block: &str) -> Vec<String> {
    root_fields_with(block, STRATEGIES)
}

/// Like [`root_fields`], with an explicit strategy list.
#[must_use]
pub fn root_fields_with(block: &str, strategies: &[&dyn FieldStrategy]) -> Vec<String> {
    for strategy in strategies {
        let fields = strategy.extract(block);
        if !fields.is_empty() {
            tracing::trace!(
                strategy = strategy.name(),
                count = fields.len(),
                "root fields found"
            );
            return fields;
        }
    }

    tracing::trace!("no strategy found root fields");
    Vec::new()
}

impl FieldStrategy for SelectionPattern {
    fn name(&self) -> &'static str {
        "selection_pattern"
    }

    fn extract(&self, block: &str) -> Vec<String> {
        let mut cursor = Cursor::new(block);
        let mut fields = Vec::new();

        loop {
            cursor.skip_trivia();
            let Some(byte) = cursor.peek() else {
                break;
            };

            match byte {
                // A nested selection set that no field claimed.
                b'{' => cursor.skip_block(),
                b'(' => cursor.skip_arguments(),
                b'"' => cursor.skip_string(),
                b'@' | b'$' => {
                    cursor.bump();
                    cursor.eat_name();
                }
                b'.' => skip_spread(&mut cursor),
                byte if is_name_byte(byte) => {
                    let name = cursor.eat_name().unwrap_or_default();
                    cursor.skip_trivia();
                    if cursor.peek() == Some(b'(') {
                        cursor.skip_arguments();
                        cursor.skip_trivia();
                    }
                    cursor.skip_directives();
                    if cursor.peek() == Some(b'{') {
                        if is_field_name(name) {
                            fields.push(name.to_owned());
                        }
                        cursor.skip_block();
                    }
                }
                _ => cursor.bump(),
            }
        }

        fields
    }
}

/// Skip `...Name` or `... on Type`, leaving any inline selection set in
/// place.
fn skip_spread(cursor: &mut Cursor<'_>) {
    while cursor.peek() == Some(b'.') {
        cursor.bump();
    }
    cursor.skip_trivia();
    if cursor.eat_name() == Some("on") {
        cursor.skip_trivia();
        cursor.eat_name();
    }
}

impl FieldStrategy for LineScan {
    fn name(&self) -> &'static str {
        "line_scan"
    }

    fn extract(&self, block: &str) -> Vec<String> {
        let mut fields = Vec::new();
        let mut depth: isize = 0;
        let mut state = ScanState::Normal;

        for line in block.lines() {
            if depth == 0 && state.is_structural() {
                if let Some(name) = leading_field(line) {
                    fields.push(name.to_owned());
                }
            }

            for &byte in line.as_bytes() {
                if state.is_structural() {
                    match byte {
                        b'{' => depth += 1,
                        b'}' => depth -= 1,
                        _ => {}
                    }
                }
                state = state.step(byte);
            }
        }

        fields
    }
}

/// The field name a line starts with, if any.
fn leading_field(line: &str) -> Option<&str> {
    let mut cursor = Cursor::new(line);
    cursor.skip_trivia();
    let mut name = cursor.eat_name()?;

    cursor.skip_trivia();
    if cursor.peek() == Some(b':') {
        cursor.bump();
        cursor.skip_trivia();
        name = cursor.eat_name()?;
    }

    is_field_name(name).then_some(name)
}

impl FieldStrategy for DepthCollapse {
    fn name(&self) -> &'static str {
        "depth_collapse"
    }

    fn extract(&self, block: &str) -> Vec<String> {
        let collapsed = collapse_nested(block);
        let mut cursor = Cursor::new(&collapsed);
        let mut fields = Vec::new();

        loop {
            cursor.skip_trivia();
            let Some(byte) = cursor.peek() else {
                break;
            };

            match byte {
                b'(' => cursor.skip_arguments(),
                b'"' => cursor.skip_string(),
                b'@' | b'$' => {
                    cursor.bump();
                    cursor.eat_name();
                }
                byte if is_name_byte(byte) => {
                    let name = cursor.eat_name().unwrap_or_default();
                    cursor.skip_trivia();
                    if cursor.peek() == Some(b':') {
                        // alias; the aliased field follows
                        cursor.bump();
                        continue;
                    }
                    if is_field_name(name) {
                        fields.push(name.to_owned());
                    }
                }
                _ => cursor.bump(),
            }
        }

        fields
    }
}

/// Replace every region nested in `{ ... }` (braces included) with a single
/// space, leaving only depth-0 text. Stray closing braces become spaces too.
fn collapse_nested(block: &str) -> String {
    let mut out = String::with_capacity(block.len());
    let mut state = ScanState::Normal;
    let mut depth: usize = 0;
    let mut segment_start = 0;

    for (index, &byte) in block.as_bytes().iter().enumerate() {
        if state.is_structural() {
            match byte {
                b'{' => {
                    if depth == 0 {
                        out.push_str(&block[segment_start..index]);
                        out.push(' ');
                    }
                    depth += 1;
                }
                b'}' if depth > 0 => {
                    depth -= 1;
                    if depth == 0 {
                        segment_start = index + 1;
                    }
                }
                b'}' => {
                    out.push_str(&block[segment_start..index]);
                    out.push(' ');
                    segment_start = index + 1;
                }
                _ => {}
            }
        }
        state = state.step(byte);
    }

    if depth == 0 {
        out.push_str(&block[segment_start..]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_pattern_basic() {
        let fields = SelectionPattern.extract(" fieldA { x } fieldB(arg: 1) { y } ");
        assert_eq!(fields, vec!["fieldA", "fieldB"]);
    }

    #[test]
    fn test_selection_pattern_ignores_leaves_and_nested() {
        let fields = SelectionPattern.extract(" id user { posts { title } } name ");
        assert_eq!(fields, vec!["user"]);
    }

    #[test]
    fn test_selection_pattern_brace_in_arguments() {
        let fields = SelectionPattern.extract(" createThing(input: {a: 1}) { id } ");
        assert_eq!(fields, vec!["createThing"]);
    }

    #[test]
    fn test_selection_pattern_alias_resolves_to_field() {
        let fields = SelectionPattern.extract(" me: user(id: 1) { id } ");
        assert_eq!(fields, vec!["user"]);
    }

    #[test]
    fn test_selection_pattern_skips_directives() {
        let fields =
            SelectionPattern.extract(" user @include(if: $withUser) { id } @live posts { id } ");
        assert_eq!(fields, vec!["user", "posts"]);
    }

    #[test]
    fn test_selection_pattern_keyword_field() {
        let fields = SelectionPattern.extract(" on { x } type { y } real { z } ");
        assert_eq!(fields, vec!["real"]);
    }

    #[test]
    fn test_selection_pattern_inline_fragment_type_is_not_a_field() {
        let fields = SelectionPattern.extract(" ... on User { id } node { id } ");
        assert_eq!(fields, vec!["node"]);
    }

    #[test]
    fn test_line_scan_multiline() {
        let block = "\n  id\n  user {\n    name\n  }\n  total: count\n";
        assert_eq!(LineScan.extract(block), vec!["id", "user", "count"]);
    }

    #[test]
    fn test_line_scan_single_line_takes_leading_name() {
        assert_eq!(LineScan.extract(" id name "), vec!["id"]);
    }

    #[test]
    fn test_line_scan_skips_directive_and_spread_lines() {
        let block = "\n@client\n...Fields\nid\n";
        assert_eq!(LineScan.extract(block), vec!["id"]);
    }

    #[test]
    fn test_line_scan_ignores_braces_in_strings() {
        let block = "\nsearch(q: \"{\")\nid\n";
        assert_eq!(LineScan.extract(block), vec!["search", "id"]);
    }

    #[test]
    fn test_collapse_nested() {
        assert_eq!(collapse_nested("a { b { c } } d"), "a   d");
        assert_eq!(collapse_nested("a(q: \"{\") b"), "a(q: \"{\") b");
        assert_eq!(collapse_nested("a } b"), "a   b");
        assert_eq!(collapse_nested("a { b"), "a  ");
    }

    #[test]
    fn test_depth_collapse() {
        let fields = DepthCollapse.extract("...Frag user(id: $id) { name } alias: total @skip(if: true)");
        assert_eq!(fields, vec!["Frag", "user", "total"]);
    }

    #[test]
    fn test_fallback_order() {
        // No field has a selection set and the block starts with a spread,
        // so only depth collapse finds anything.
        assert_eq!(root_fields(" ...Frag id name "), vec!["Frag", "id", "name"]);
        // Leaf fields only: line scan takes the leading name.
        assert_eq!(root_fields(" id name "), vec!["id"]);
        // Selection sets present: the strict pattern wins.
        assert_eq!(root_fields(" id user { id } "), vec!["user"]);
    }

    #[test]
    fn test_custom_strategy_list() {
        let fields = root_fields_with(" id name ", &[&DepthCollapse]);
        assert_eq!(fields, vec!["id", "name"]);
        assert!(root_fields_with(" id name ", &[]).is_empty());
    }

    #[test]
    fn test_nothing_found() {
        assert!(root_fields(" @include(if: true) ").is_empty());
        assert!(root_fields("").is_empty());
    }
}
