//! Retrieval collaborators consulted by the cache on a miss.
//!
//! The cache never inspects how a body is obtained; it only relies on a source
//! reporting a missing asset as [`IconError::NotFound`] and anything else as a
//! transport failure.

pub mod dir;
pub mod func;

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::IconError;
use crate::key::KeyParts;

pub use dir::DirSource;
pub use func::FnSource;

#[async_trait]
pub trait AssetSource: Send + Sync {
    /// Returns the complete textual body of the asset.
    async fn retrieve(&self, parts: &KeyParts) -> Result<String, IconError>;
}

pub type SourceHandle = Arc<dyn AssetSource + 'static>;

