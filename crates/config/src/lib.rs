//! Configuration for the GraphQL resource header middleware.
//!
//! The configuration names the two request headers that carry extracted
//! resource names and bounds the request bodies the middleware buffers.
//! It can be written as YAML, JSON or TOML:
//!
//! ```yaml
//! queryHeader: X-GraphQL-Queries
//! mutationHeader: X-GraphQL-Mutations
//! maxBodyBytes: 1048576
//! ```

mod config;
mod error;
mod loader;

pub use config::{
    ResourceHeadersConfig, DEFAULT_MAX_BODY_BYTES, DEFAULT_MUTATION_HEADER, DEFAULT_QUERY_HEADER,
};
pub use error::{ConfigError, Result};
pub use loader::{find_config, load_config, load_config_from_str, CONFIG_FILES};
