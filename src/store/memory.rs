//! In-memory document engine
//!
//! DashMap-backed engine with real revision tokens and conflict detection.
//! Serves as the reference implementation for tests and embedded use.

use crate::error::{Error, Result};
use crate::model::Record;
use crate::store::engine::{Document, DocumentEngine, Revision};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

type Collection = DashMap<String, Versioned>;

#[derive(Debug, Clone)]
struct Versioned {
    revision: Revision,
    payload: Vec<Record>,
}

/// In-memory document engine with optimistic concurrency
#[derive(Clone, Default)]
pub struct MemoryEngine {
    collections: Arc<DashMap<String, Collection>>,
}

impl MemoryEngine {
    /// Create a new empty engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of collections currently held
    pub fn collection_count(&self) -> usize {
        self.collections.len()
    }

    /// Check if the engine holds no collections
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Drop all collections and documents
    pub fn clear(&self) {
        self.collections.clear();
    }
}

#[async_trait]
impl DocumentEngine for MemoryEngine {
    #[instrument(skip(self))]
    async fn create_collection_if_absent(&self, collection: &str) -> Result<()> {
        self.collections
            .entry(collection.to_string())
            .or_default();
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let Some(coll) = self.collections.get(collection) else {
            return Ok(None);
        };
        Ok(coll.get(id).map(|doc| Document {
            id: id.to_string(),
            revision: Some(doc.revision),
            payload: doc.payload.clone(),
        }))
    }

    #[instrument(skip(self, payload))]
    async fn save_document(
        &self,
        collection: &str,
        id: &str,
        revision: Option<Revision>,
        payload: Vec<Record>,
    ) -> Result<Revision> {
        let coll = self.collections.get(collection).ok_or_else(|| {
            Error::Storage(format!("collection {collection:?} does not exist"))
        })?;

        let result = match coll.entry(id.to_string()) {
            Entry::Occupied(mut entry) => {
                // The supplied token must match the stored one exactly.
                if revision != Some(entry.get().revision) {
                    return Err(Error::Conflict {
                        collection: collection.to_string(),
                        id: id.to_string(),
                    });
                }
                let fresh = Revision::generate();
                entry.insert(Versioned {
                    revision: fresh,
                    payload,
                });
                debug!(collection, id, revision = %fresh, "updated document");
                Ok(fresh)
            }
            Entry::Vacant(entry) => {
                // A token for a document that no longer exists is stale too.
                if revision.is_some() {
                    return Err(Error::Conflict {
                        collection: collection.to_string(),
                        id: id.to_string(),
                    });
                }
                let fresh = Revision::generate();
                entry.insert(Versioned {
                    revision: fresh,
                    payload,
                });
                debug!(collection, id, revision = %fresh, "created document");
                Ok(fresh)
            }
        };
        result
    }

    #[instrument(skip(self))]
    async fn delete_document(&self, collection: &str, id: &str) -> Result<bool> {
        let Some(coll) = self.collections.get(collection) else {
            return Ok(false);
        };
        let removed = coll.remove(id).is_some();
        if removed {
            debug!(collection, id, "deleted document");
        }
        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn list_document_ids(&self, collection: &str) -> Result<Vec<String>> {
        let Some(coll) = self.collections.get(collection) else {
            return Ok(Vec::new());
        };
        let mut ids: Vec<String> = coll.iter().map(|doc| doc.key().clone()).collect();
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Value;

    fn record(id: i32) -> Record {
        let mut map = Record::new();
        map.insert("id".to_string(), Value::from(id));
        map
    }

    #[tokio::test]
    async fn test_basic_ops() -> Result<()> {
        let engine = MemoryEngine::new();
        engine.create_collection_if_absent("users").await?;

        let rev = engine
            .save_document("users", "alice", None, vec![record(1)])
            .await?;

        let doc = engine.get_document("users", "alice").await?.unwrap();
        assert_eq!(doc.revision, Some(rev));
        assert_eq!(doc.payload, vec![record(1)]);

        assert!(engine.delete_document("users", "alice").await?);
        assert_eq!(engine.get_document("users", "alice").await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_collection_is_not_an_error() -> Result<()> {
        let engine = MemoryEngine::new();
        assert_eq!(engine.get_document("nope", "x").await?, None);
        assert!(!engine.delete_document("nope", "x").await?);
        assert!(engine.list_document_ids("nope").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_save_into_missing_collection_fails() {
        let engine = MemoryEngine::new();
        let result = engine.save_document("nope", "x", None, vec![]).await;
        assert!(matches!(result, Err(Error::Storage(_))));
    }

    #[tokio::test]
    async fn test_stale_revision_is_rejected() -> Result<()> {
        let engine = MemoryEngine::new();
        engine.create_collection_if_absent("users").await?;

        let r0 = engine
            .save_document("users", "alice", None, vec![record(1)])
            .await?;
        let r1 = engine
            .save_document("users", "alice", Some(r0), vec![record(2)])
            .await?;

        // A write with the superseded token must not apply.
        let stale = engine
            .save_document("users", "alice", Some(r0), vec![record(3)])
            .await;
        assert!(matches!(stale, Err(Error::Conflict { .. })));

        let doc = engine.get_document("users", "alice").await?.unwrap();
        assert_eq!(doc.revision, Some(r1));
        assert_eq!(doc.payload, vec![record(2)]);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_without_token_conflicts_when_present() -> Result<()> {
        let engine = MemoryEngine::new();
        engine.create_collection_if_absent("users").await?;
        engine
            .save_document("users", "alice", None, vec![record(1)])
            .await?;

        let result = engine
            .save_document("users", "alice", None, vec![record(2)])
            .await;
        assert!(matches!(result, Err(Error::Conflict { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_document_ids_sorted() -> Result<()> {
        let engine = MemoryEngine::new();
        engine.create_collection_if_absent("users").await?;
        for id in ["carol", "alice", "bob"] {
            engine.save_document("users", id, None, vec![]).await?;
        }
        assert_eq!(
            engine.list_document_ids("users").await?,
            vec!["alice", "bob", "carol"]
        );
        Ok(())
    }
}
