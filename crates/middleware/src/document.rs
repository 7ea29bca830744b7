//! Request body decoding.

use crate::Result;
use serde::Deserialize;
use std::borrow::Cow;

/// The JSON envelope GraphQL clients POST: `{ query, operationName, variables }`.
///
/// Unknown keys (such as `extensions`) are ignored. A missing or `null`
/// `query` reads as an empty document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub operation_name: Option<String>,
    /// Kept as raw JSON; some clients send an object, others a string.
    #[serde(default)]
    pub variables: Option<serde_json::Value>,
}

impl GraphQLRequest {
    /// Decode an envelope from a request body.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// The document text, empty when the envelope has none.
    #[must_use]
    pub fn query(&self) -> &str {
        self.query.as_deref().unwrap_or_default()
    }
}

/// The GraphQL document carried by a request body.
///
/// JSON envelopes yield their `query` field. Anything that does not decode
/// as an envelope (including `application/graphql` bodies) is taken as raw
/// GraphQL text, with invalid UTF-8 replaced.
#[must_use]
pub fn document_text(body: &[u8]) -> Cow<'_, str> {
    match GraphQLRequest::from_slice(body) {
        Ok(request) => Cow::Owned(request.query.unwrap_or_default()),
        Err(error) => {
            tracing::debug!(%error, "Body is not a JSON envelope, treating it as raw GraphQL");
            String::from_utf8_lossy(body)
        }
    }
}
