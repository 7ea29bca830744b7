use thiserror::Error;

pub type Result<T> = std::result::Result<T, MiddlewareError>;

#[derive(Debug, Error)]
pub enum MiddlewareError {
    #[error("Invalid header name {name:?}: {source}")]
    InvalidHeaderName {
        name: String,
        #[source]
        source: http::header::InvalidHeaderName,
    },

    #[error("Request body is not a GraphQL request envelope: {0}")]
    Envelope(#[from] serde_json::Error),
}
