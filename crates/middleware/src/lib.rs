//! Tower middleware that tags GraphQL requests with the resources they
//! address.
//!
//! For every `POST` request with a JSON or GraphQL body, the middleware
//! reads the document, extracts the root fields of its queries and
//! mutations with [`graphql_resource_extract::extract`], and sets them as
//! request headers before forwarding the request downstream:
//!
//! ```text
//! POST /graphql
//! Content-Type: application/json
//!
//! {"query": "query { user(id: 1) { name } posts { title } }"}
//! ```
//!
//! is forwarded with `X-GraphQL-Queries: user,posts`. The original body is
//! always restored, and requests the middleware cannot make sense of are
//! forwarded unchanged.
//!
//! ```no_run
//! use graphql_resource_config::ResourceHeadersConfig;
//! use graphql_resource_middleware::ResourceHeadersLayer;
//! use tower::ServiceBuilder;
//!
//! # fn wrap<S>(service: S) -> Result<(), Box<dyn std::error::Error>> {
//! let layer = ResourceHeadersLayer::from_config(&ResourceHeadersConfig::default())?;
//! let service = ServiceBuilder::new().layer(layer).service(service);
//! # let _ = service;
//! # Ok(())
//! # }
//! ```

mod document;
mod error;
mod headers;
mod layer;

pub use document::{document_text, GraphQLRequest};
pub use error::{MiddlewareError, Result};
pub use headers::ResourceHeaders;
pub use layer::{ResourceHeadersLayer, ResourceHeadersService, RestoredBody};
