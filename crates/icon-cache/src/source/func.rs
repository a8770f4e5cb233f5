use std::future::Future;

use async_trait::async_trait;

use super::AssetSource;
use crate::errors::IconError;
use crate::key::KeyParts;

/// Adapts an async closure into an [`AssetSource`].
pub struct FnSource<F> {
    f: F,
}

impl<F, Fut> FnSource<F>
where
    F: Fn(KeyParts) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, IconError>> + Send + 'static,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F, Fut> AssetSource for FnSource<F>
where
    F: Fn(KeyParts) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, IconError>> + Send + 'static,
{
    async fn retrieve(&self, parts: &KeyParts) -> Result<String, IconError> {
        (self.f)(parts.clone()).await
    }
}
