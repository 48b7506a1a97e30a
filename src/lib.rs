// DocMerge - merge-on-write document store access layer
// Uniform insert/retrieve/delete/merge operations over pluggable document
// and cache backends

#![warn(rust_2018_idioms)]

pub mod cache;
pub mod config;
pub mod model;
pub mod store;

// Re-exports for convenience
pub use cache::{CacheEngine, MemoryCache, ScalarCache};
pub use model::{DocKey, Record, SortOrder, Value};
pub use store::{Document, DocumentEngine, MemoryEngine, MergeStore, Revision};

/// DocMerge error types
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum Error {
        #[error("Storage error: {0}")]
        Storage(String),

        #[error("Document update conflict: {collection}/{id}")]
        Conflict { collection: String, id: String },

        #[error("Invalid key: {0}")]
        InvalidKey(String),

        #[error("Invalid argument: {0}")]
        InvalidArgument(String),

        #[error("Serialization error: {0}")]
        Serialization(String),
    }

    impl Error {
        /// Whether this error is an optimistic-write collision.
        pub fn is_conflict(&self) -> bool {
            matches!(self, Error::Conflict { .. })
        }
    }

    pub type Result<T> = std::result::Result<T, Error>;
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
