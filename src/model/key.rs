//! Composite document keys.
//!
//! A document is addressed by a two-part key encoded on the wire as
//! `"<collection>/<id>"`. Keys are parsed and validated once at the
//! boundary; malformed input (missing, empty, or extra segments) is
//! rejected with an explicit error instead of being silently mis-split.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Separator between the collection and document id segments.
pub const KEY_SEPARATOR: char = '/';

/// Parsed composite key addressing one document in one collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocKey {
    collection: String,
    id: String,
}

impl DocKey {
    /// Build a key from its two parts.
    ///
    /// Both segments must be non-empty and must not contain the separator.
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Result<Self> {
        let collection = collection.into();
        let id = id.into();
        for segment in [&collection, &id] {
            if segment.is_empty() {
                return Err(Error::InvalidKey("key segment is empty".to_string()));
            }
            if segment.contains(KEY_SEPARATOR) {
                return Err(Error::InvalidKey(format!(
                    "key segment {segment:?} contains separator {KEY_SEPARATOR:?}"
                )));
            }
        }
        Ok(Self { collection, id })
    }

    /// Parse the wire encoding `"<collection>/<id>"`.
    pub fn parse(key: &str) -> Result<Self> {
        key.parse()
    }

    /// Collection (database) segment of the key.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Document id segment of the key.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl FromStr for DocKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut segments = s.split(KEY_SEPARATOR);
        match (segments.next(), segments.next(), segments.next()) {
            (Some(collection), Some(id), None) if !collection.is_empty() && !id.is_empty() => {
                Ok(Self {
                    collection: collection.to_string(),
                    id: id.to_string(),
                })
            }
            _ => Err(Error::InvalidKey(format!(
                "expected \"<collection>{KEY_SEPARATOR}<id>\", got {s:?}"
            ))),
        }
    }
}

impl fmt::Display for DocKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.collection, KEY_SEPARATOR, self.id)
    }
}
