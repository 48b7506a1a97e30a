//! Document store layer
//!
//! # Architecture
//!
//! The store is a thin facade over a pluggable document engine:
//!
//! ```text
//! MergeStore (read-merge-write, dedup, sort)
//!   └─→ DocumentEngine (collections → documents with revision tokens)
//!        └─→ MemoryEngine | remote backends
//! ```
//!
//! The `DocumentEngine` trait covers exactly what the merge logic needs:
//! collection creation, single-document get/save/delete under optimistic
//! concurrency, and id listing. `MemoryEngine` is the in-process reference
//! implementation.

pub mod engine;
pub mod memory;
pub mod merge;

pub use engine::{Document, DocumentEngine, Revision};
pub use memory::MemoryEngine;
pub use merge::MergeStore;
