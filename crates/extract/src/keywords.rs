//! Reserved words that are never reported as field names.

/// GraphQL keywords excluded from every extraction strategy.
///
/// Membership is case-insensitive.
pub const KEYWORDS: &[&str] = &[
    "query",
    "mutation",
    "subscription",
    "fragment",
    "on",
    "true",
    "false",
    "null",
    "type",
    "input",
    "interface",
    "union",
    "enum",
    "scalar",
    "schema",
    "extend",
    "implements",
    "directive",
];

/// Check if a word is a reserved GraphQL keyword (case-insensitive).
#[must_use]
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS
        .iter()
        .any(|keyword| keyword.eq_ignore_ascii_case(word))
}

/// Check if a token may be reported as a field name.
///
/// Rejects empty tokens, keywords and directive references (`@name`).
#[must_use]
pub fn is_field_name(token: &str) -> bool {
    !token.is_empty() && !token.starts_with('@') && !is_keyword(token)
}
