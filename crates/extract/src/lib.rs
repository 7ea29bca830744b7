//! Resource name extraction for GraphQL documents.
//!
//! Given the text of a GraphQL document, [`extract`] returns the root field
//! names of every top-level `query` and `mutation` operation. It is a
//! tolerant lexical scanner, not a parser: malformed input degrades to
//! partial or empty results and never produces an error.
//!
//! # Example
//!
//! ```
//! use graphql_resource_extract::extract;
//!
//! let extraction = extract(
//!     r#"
//!     query Dashboard($id: ID!) {
//!       user(id: $id) { name }
//!       notifications(first: 10) { edges { node { id } } }
//!     }
//!     mutation { markRead(id: "n1") { id } }
//!     "#,
//! );
//! assert_eq!(extraction.queries, vec!["user", "notifications"]);
//! assert_eq!(extraction.mutations, vec!["markRead"]);
//! ```
//!
//! # Limitations
//!
//! Fragments are not expanded and variables are not substituted. A spread
//! at the root of an operation contributes nothing when other root fields
//! have selection sets, and may surface as the fragment's name otherwise.

mod balance;
mod comments;
mod cursor;
mod fields;
mod keywords;
mod locate;

pub use balance::{balanced_block, Block, ScanState};
pub use comments::strip_comments;
pub use fields::{
    root_fields, root_fields_with, DepthCollapse, FieldStrategy, LineScan, SelectionPattern,
    STRATEGIES,
};
pub use keywords::{is_field_name, is_keyword, KEYWORDS};
pub use locate::{locate_operations, normalize_whitespace, OperationBlock, OperationKind};

use serde::Serialize;

/// Root field names found in a document, split by operation type.
///
/// Names appear in document order. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub queries: Vec<String>,
    pub mutations: Vec<String>,
}

impl Extraction {
    /// Check if no field names were found at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty() && self.mutations.is_empty()
    }
}

/// Extract the root field names of every top-level query and mutation.
///
/// Anonymous documents (`{ ... }` with no keyword) count as queries, but
/// only when the document has no `query` block of its own.
#[must_use]
pub fn extract(document: &str) -> Extraction {
    let stripped = strip_comments(document);
    let normalized = normalize_whitespace(&stripped);

    let mut extraction = Extraction::default();
    let mut anonymous = Vec::new();
    let mut has_query_block = false;

    for block in locate_operations(&normalized) {
        match block.kind {
            OperationKind::Query => {
                has_query_block = true;
                extraction.queries.extend(root_fields(block.body));
            }
            OperationKind::Mutation => extraction.mutations.extend(root_fields(block.body)),
            OperationKind::Anonymous => anonymous.push(block.body),
        }
    }

    if !has_query_block {
        for body in anonymous {
            extraction.queries.extend(root_fields(body));
        }
    }

    tracing::trace!(
        queries = extraction.queries.len(),
        mutations = extraction.mutations.len(),
        "extracted resource names"
    );
    extraction
}
