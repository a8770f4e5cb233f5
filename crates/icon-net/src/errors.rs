use thiserror::Error;

/// Errors raised while constructing an [`HttpSource`](crate::HttpSource).
#[derive(Debug, Error)]
pub enum NetError {
    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("failed to build http client: {0}")]
    Client(String),
}
