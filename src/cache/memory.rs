//! In-memory cache engine

use crate::cache::engine::CacheEngine;
use crate::error::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory cache engine backed by a concurrent map
#[derive(Clone, Default)]
pub struct MemoryCache {
    data: Arc<DashMap<String, String>>,
}

impl MemoryCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of keys stored
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Clear all keys
    pub fn clear(&self) {
        self.data.clear();
    }
}

#[async_trait]
impl CacheEngine for MemoryCache {
    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.data.insert(key.to_string(), value);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.get(key).map(|entry| entry.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_overwrites() -> Result<()> {
        let cache = MemoryCache::new();
        cache.set("k", "one".to_string()).await?;
        cache.set("k", "two".to_string()).await?;
        assert_eq!(cache.get("k").await?, Some("two".to_string()));
        assert_eq!(cache.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_key() -> Result<()> {
        let cache = MemoryCache::new();
        assert_eq!(cache.get("absent").await?, None);
        Ok(())
    }
}
