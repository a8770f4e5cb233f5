use thiserror::Error;

use crate::key::CacheKey;

/// Failure outcome of a fetch. One retrieval outcome is shared by every
/// coalesced waiter, hence `Clone`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IconError {
    #[error("asset {key} not found{}", .status.map(|s| format!(" (status {s})")).unwrap_or_default())]
    NotFound { key: CacheKey, status: Option<u16> },
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl IconError {
    pub fn not_found(key: CacheKey) -> Self {
        IconError::NotFound { key, status: None }
    }

    pub fn not_found_with_status(key: CacheKey, status: u16) -> Self {
        IconError::NotFound {
            key,
            status: Some(status),
        }
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        IconError::Transport(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        IconError::Internal(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, IconError::NotFound { .. })
    }

    /// Transport failures may succeed on a later attempt; a missing asset will not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, IconError::Transport(_))
    }
}
