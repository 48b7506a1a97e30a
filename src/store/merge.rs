//! Merge-on-write document operations.
//!
//! Every operation is a fresh read-modify-write round trip: read the
//! current payload, merge new record(s) by a caller-chosen dedup key,
//! optionally sort, and write the whole payload back under the engine's
//! revision token. No state is cached between calls.
//!
//! A write that loses a race to a concurrent writer surfaces as
//! [`Error::Conflict`](crate::error::Error::Conflict); the attempted
//! update does not apply and the caller decides whether to retry.

use crate::error::{Error, Result};
use crate::model::{DocKey, Record, SortOrder, Value};
use crate::store::engine::{DocumentEngine, Revision};
use tracing::{instrument, warn};

/// Main merge-store interface over a pluggable document engine.
pub struct MergeStore {
    engine: Box<dyn DocumentEngine>,
}

impl std::fmt::Debug for MergeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MergeStore").finish()
    }
}

impl MergeStore {
    pub fn new(engine: Box<dyn DocumentEngine>) -> Self {
        Self { engine }
    }

    /// Unconditionally overwrite the document's payload.
    ///
    /// The current revision is read first so the write carries a valid
    /// concurrency token; the collection is created on first use. If
    /// another writer updates the document between the read and the write,
    /// the engine rejects the write and `Error::Conflict` is returned with
    /// the store state unchanged.
    #[instrument(skip(self, payload))]
    pub async fn put(&self, key: &DocKey, payload: Vec<Record>) -> Result<Revision> {
        self.engine
            .create_collection_if_absent(key.collection())
            .await?;
        let revision = self
            .engine
            .get_document(key.collection(), key.id())
            .await?
            .and_then(|doc| doc.revision);
        match self
            .engine
            .save_document(key.collection(), key.id(), revision, payload)
            .await
        {
            Err(err) if err.is_conflict() => {
                warn!(key = %key, "could not update, document update conflict");
                Err(err)
            }
            other => other,
        }
    }

    /// Current payload, or empty when the collection or id does not exist.
    #[instrument(skip(self))]
    pub async fn get(&self, key: &DocKey) -> Result<Vec<Record>> {
        Ok(self
            .engine
            .get_document(key.collection(), key.id())
            .await?
            .map(|doc| doc.payload)
            .unwrap_or_default())
    }

    /// Remove the document. Returns whether one was present; a missing
    /// collection or id yields `false`, never an error.
    #[instrument(skip(self))]
    pub async fn delete(&self, key: &DocKey) -> Result<bool> {
        self.engine
            .delete_document(key.collection(), key.id())
            .await
    }

    /// Merge a single record into the payload.
    ///
    /// The record is appended only if no stored record already carries the
    /// same `sort_key` value. Identity is equality of that value alone: a
    /// colliding record is dropped whole, not merged field by field.
    #[instrument(skip(self, record))]
    pub async fn add_one(
        &self,
        key: &DocKey,
        record: Record,
        sort_key: &str,
        order: Option<SortOrder>,
    ) -> Result<Revision> {
        let incoming = sort_value(&record, sort_key)?;
        let mut payload = self.get(key).await?;
        let existing = key_values(&payload, sort_key);
        if !existing.contains(&incoming) {
            payload.push(record);
        }
        if let Some(order) = order {
            sort_payload(&mut payload, sort_key, order);
        }
        self.put(key, payload).await
    }

    /// Merge a batch of records into the payload.
    ///
    /// Dedup is evaluated against the `sort_key` values present before this
    /// call only: two incoming records carrying the same new value are both
    /// appended. Only collisions with pre-existing records are dropped.
    #[instrument(skip(self, records))]
    pub async fn add_all(
        &self,
        key: &DocKey,
        records: Vec<Record>,
        sort_key: &str,
        order: Option<SortOrder>,
    ) -> Result<Revision> {
        let mut payload = self.get(key).await?;
        let existing = key_values(&payload, sort_key);
        for record in records {
            let incoming = sort_value(&record, sort_key)?;
            if !existing.contains(&incoming) {
                payload.push(record);
            }
        }
        if let Some(order) = order {
            sort_payload(&mut payload, sort_key, order);
        }
        self.put(key, payload).await
    }

    /// Replace the payload entirely, optionally sorted. No dedup.
    #[instrument(skip(self, records))]
    pub async fn replace_all(
        &self,
        key: &DocKey,
        records: Vec<Record>,
        sort_key: &str,
        order: Option<SortOrder>,
    ) -> Result<Revision> {
        let mut payload = records;
        if let Some(order) = order {
            sort_payload(&mut payload, sort_key, order);
        }
        self.put(key, payload).await
    }

    /// All document ids in a collection, empty if the collection is absent.
    #[instrument(skip(self))]
    pub async fn list_ids(&self, collection: &str) -> Result<Vec<String>> {
        self.engine.list_document_ids(collection).await
    }
}

/// Sort-key value of an incoming record. A missing field is an argument
/// error: without it the record has no dedup identity.
fn sort_value(record: &Record, sort_key: &str) -> Result<Value> {
    record.get(sort_key).cloned().ok_or_else(|| {
        Error::InvalidArgument(format!("record is missing sort key field {sort_key:?}"))
    })
}

/// Sort-key values of the stored payload. A stored record without the
/// field contributes `Null` so it still participates in dedup.
fn key_values(payload: &[Record], sort_key: &str) -> Vec<Value> {
    payload
        .iter()
        .map(|record| record.get(sort_key).cloned().unwrap_or(Value::Null))
        .collect()
}

fn sort_payload(payload: &mut [Record], sort_key: &str, order: SortOrder) {
    payload.sort_by(|a, b| {
        let a = a.get(sort_key).unwrap_or(&Value::Null);
        let b = b.get(sort_key).unwrap_or(&Value::Null);
        match order {
            SortOrder::Ascending => a.collate(b),
            SortOrder::Descending => b.collate(a),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, Value)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_sort_value_requires_field() {
        let rec = record(&[("name", Value::from("a"))]);
        assert!(sort_value(&rec, "name").is_ok());
        assert!(matches!(
            sort_value(&rec, "ts"),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_sort_payload_descending() {
        let mut payload = vec![
            record(&[("k", Value::from(3))]),
            record(&[("k", Value::from(1))]),
            record(&[("k", Value::from(2))]),
        ];
        sort_payload(&mut payload, "k", SortOrder::Descending);
        let ks: Vec<f64> = payload.iter().map(|r| r["k"].as_f64().unwrap()).collect();
        assert_eq!(ks, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_missing_field_sorts_first() {
        let mut payload = vec![
            record(&[("k", Value::from(1))]),
            record(&[("other", Value::from(9))]),
        ];
        sort_payload(&mut payload, "k", SortOrder::Ascending);
        // Null collates before any number.
        assert!(!payload[0].contains_key("k"));
    }
}
