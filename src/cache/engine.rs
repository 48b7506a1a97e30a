//! Cache engine trait

use crate::error::Result;
use async_trait::async_trait;

/// Flat key-value collaborator backing the scalar cache.
#[async_trait]
pub trait CacheEngine: Send + Sync {
    /// Store `value` under `key`, overwriting any previous value.
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Fetch the value under `key`, or `None` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;
}
