use crate::{MiddlewareError, Result};
use graphql_resource_config::{ResourceHeadersConfig, DEFAULT_MAX_BODY_BYTES};
use graphql_resource_extract::Extraction;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue, Method, Request};
use http_body::Body;

/// Content types whose bodies are inspected.
const GRAPHQL_CONTENT_TYPES: &[&str] = &["application/json", "application/graphql"];

/// Which requests to inspect and which headers to set on them.
#[derive(Debug, Clone)]
pub struct ResourceHeaders {
    query: HeaderName,
    mutation: HeaderName,
    max_body_bytes: usize,
}

impl Default for ResourceHeaders {
    fn default() -> Self {
        Self {
            query: HeaderName::from_static("x-graphql-queries"),
            mutation: HeaderName::from_static("x-graphql-mutations"),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ResourceHeaders {
    /// Build from a configuration, applying its defaults.
    pub fn from_config(config: &ResourceHeadersConfig) -> Result<Self> {
        Ok(Self {
            query: header_name(config.query_header())?,
            mutation: header_name(config.mutation_header())?,
            max_body_bytes: config.max_body_bytes(),
        })
    }

    #[must_use]
    pub const fn query_header(&self) -> &HeaderName {
        &self.query
    }

    #[must_use]
    pub const fn mutation_header(&self) -> &HeaderName {
        &self.mutation
    }

    #[must_use]
    pub const fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }

    /// Whether a request's body should be read and scanned.
    ///
    /// Only `POST` requests with a JSON or GraphQL content type qualify, and
    /// only when their declared length fits the body limit.
    pub fn should_inspect<B: Body>(&self, request: &Request<B>) -> bool {
        if request.method() != Method::POST {
            return false;
        }

        let content_type = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if !GRAPHQL_CONTENT_TYPES
            .iter()
            .any(|accepted| content_type.contains(accepted))
        {
            tracing::trace!(content_type = %content_type, "Skipping request: not a GraphQL content type");
            return false;
        }

        let declared = declared_length(request);
        if declared > self.max_body_bytes as u64 {
            tracing::debug!(
                declared,
                limit = self.max_body_bytes,
                "Skipping request: body exceeds limit"
            );
            return false;
        }

        true
    }

    /// The headers to set for an extraction: one per non-empty list, with
    /// the names joined by commas.
    #[must_use]
    pub fn values(&self, extraction: &Extraction) -> Vec<(HeaderName, HeaderValue)> {
        [
            (&self.query, &extraction.queries),
            (&self.mutation, &extraction.mutations),
        ]
        .into_iter()
        .filter(|(_, names)| !names.is_empty())
        .filter_map(|(header, names)| match HeaderValue::from_str(&names.join(",")) {
            Ok(value) => Some((header.clone(), value)),
            Err(error) => {
                tracing::warn!(%header, %error, "Dropping unrepresentable header value");
                None
            }
        })
        .collect()
    }

    /// Set the headers for an extraction, replacing any existing values.
    pub fn apply(&self, headers: &mut HeaderMap, extraction: &Extraction) {
        for (name, value) in self.values(extraction) {
            headers.insert(name, value);
        }
    }
}

fn header_name(name: &str) -> Result<HeaderName> {
    HeaderName::from_bytes(name.as_bytes()).map_err(|source| MiddlewareError::InvalidHeaderName {
        name: name.to_owned(),
        source,
    })
}

/// The larger of the body's size hint and its `Content-Length` header.
fn declared_length<B: Body>(request: &Request<B>) -> u64 {
    let hinted = request.body().size_hint().lower();
    let header = request
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(0);
    hinted.max(header)
}
