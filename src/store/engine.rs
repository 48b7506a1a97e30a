//! Document engine trait

use crate::error::Result;
use crate::model::Record;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque optimistic-concurrency token.
///
/// A new token is assigned by the engine on every successful write. The
/// token read with a document must be supplied unchanged on the next write
/// to the same id; a stale token makes the write fail with a conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Revision(Uuid);

impl Revision {
    /// Mint a fresh token. Engines call this on every accepted write.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored document: id, concurrency token, array-valued payload.
///
/// `revision` is absent only for a document that has never been written;
/// documents returned by an engine always carry the token of their last
/// accepted write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub revision: Option<Revision>,
    pub payload: Vec<Record>,
}

/// Document engine trait
///
/// The external document store collaborator: collections of documents,
/// each document a sequence of records guarded by a revision token.
#[async_trait]
pub trait DocumentEngine: Send + Sync {
    /// Create a collection if it does not already exist. Idempotent.
    async fn create_collection_if_absent(&self, collection: &str) -> Result<()>;

    /// Fetch a document. An absent collection or id yields `None`.
    async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Write a document under optimistic concurrency.
    ///
    /// `revision` must match the currently stored token, or be `None` when
    /// the id does not exist yet. A mismatch fails with
    /// [`Error::Conflict`](crate::error::Error::Conflict) and leaves the
    /// stored document unchanged.
    async fn save_document(
        &self,
        collection: &str,
        id: &str,
        revision: Option<Revision>,
        payload: Vec<Record>,
    ) -> Result<Revision>;

    /// Remove a document. Returns whether one was present; an absent
    /// collection or id yields `false`, never an error.
    async fn delete_document(&self, collection: &str, id: &str) -> Result<bool>;

    /// List all document ids in a collection, empty if the collection is
    /// absent.
    async fn list_document_ids(&self, collection: &str) -> Result<Vec<String>>;
}
