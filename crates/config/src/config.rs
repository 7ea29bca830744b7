use serde::{Deserialize, Serialize};

/// Header that carries query resource names when none is configured.
pub const DEFAULT_QUERY_HEADER: &str = "X-GraphQL-Queries";

/// Header that carries mutation resource names when none is configured.
pub const DEFAULT_MUTATION_HEADER: &str = "X-GraphQL-Mutations";

/// Largest request body buffered for extraction when none is configured (1 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Settings for the resource header middleware.
///
/// Every field is optional. Unset or empty header names fall back to
/// [`DEFAULT_QUERY_HEADER`] and [`DEFAULT_MUTATION_HEADER`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResourceHeadersConfig {
    /// Request header set to the comma-joined query field names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_header: Option<String>,

    /// Request header set to the comma-joined mutation field names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mutation_header: Option<String>,

    /// Bodies larger than this are forwarded without extraction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_body_bytes: Option<usize>,
}

impl ResourceHeadersConfig {
    #[must_use]
    pub fn with_query_header(mut self, name: impl Into<String>) -> Self {
        self.query_header = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_mutation_header(mut self, name: impl Into<String>) -> Self {
        self.mutation_header = Some(name.into());
        self
    }

    #[must_use]
    pub const fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = Some(limit);
        self
    }

    /// The effective query header name.
    #[must_use]
    pub fn query_header(&self) -> &str {
        non_empty(self.query_header.as_deref()).unwrap_or(DEFAULT_QUERY_HEADER)
    }

    /// The effective mutation header name.
    #[must_use]
    pub fn mutation_header(&self) -> &str {
        non_empty(self.mutation_header.as_deref()).unwrap_or(DEFAULT_MUTATION_HEADER)
    }

    /// The effective body size limit in bytes.
    #[must_use]
    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes.unwrap_or(DEFAULT_MAX_BODY_BYTES)
    }

    /// Check the effective settings, returning a message describing the
    /// first problem found.
    pub(crate) fn problems(&self) -> Option<String> {
        for (key, name) in [
            ("queryHeader", self.query_header()),
            ("mutationHeader", self.mutation_header()),
        ] {
            if http::HeaderName::from_bytes(name.as_bytes()).is_err() {
                return Some(format!("'{key}' is not a valid HTTP header name: {name:?}"));
            }
        }

        if self.query_header().eq_ignore_ascii_case(self.mutation_header()) {
            return Some(format!(
                "'queryHeader' and 'mutationHeader' must differ (both are {:?})",
                self.query_header()
            ));
        }

        if self.max_body_bytes == Some(0) {
            return Some(String::from("'maxBodyBytes' must be greater than zero"));
        }

        None
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
