//! Scalar KV cache over a pluggable cache engine.
//!
//! Values are serialized to JSON text on write and deserialized on read.
//! A missing key reads back as `Ok(None)`, never an error.

use crate::cache::engine::CacheEngine;
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::instrument;

/// Typed facade over a cache engine.
pub struct ScalarCache {
    engine: Box<dyn CacheEngine>,
}

impl std::fmt::Debug for ScalarCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalarCache").finish()
    }
}

impl ScalarCache {
    pub fn new(engine: Box<dyn CacheEngine>) -> Self {
        Self { engine }
    }

    /// Serialize `value` to JSON and store it under `key`, fully
    /// overwriting any previous value.
    #[instrument(skip(self, value))]
    pub async fn put<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let text = serde_json::to_string(value)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        self.engine.set(key, text).await
    }

    /// Deserialize and return the value stored under `key`, or `None`
    /// when the key is absent.
    #[instrument(skip(self))]
    pub async fn get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self.engine.get(key).await? {
            Some(text) => {
                let value = serde_json::from_str(&text)
                    .map_err(|e| Error::Serialization(e.to_string()))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }
}
