//! Value - the JSON-like payload data type.
//!
//! A `Value` represents any field value that can appear in a stored record.
//! It's JSON-compatible with serde serialization and carries a total
//! collation order so payloads can be deduplicated and sorted by an
//! arbitrary field.
//!
//! # Supported Types
//!
//! - **Null**: Absence of a value
//! - **Bool**: true or false
//! - **Number**: f64 floating point numbers
//! - **String**: UTF-8 encoded text
//! - **Array**: Ordered list of values
//! - **Object**: Key-value map (like JSON object)

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// A record stored in a document payload: an open mapping from field name
/// to value. Only the caller-designated sort/dedup key is interpreted by
/// the merge store; everything else is opaque.
pub type Record = HashMap<String, Value>;

/// Ordering applied to a payload before it is written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Value represents a field value in a stored record.
///
/// JSON-compatible via serde's untagged representation, so payloads
/// round-trip as plain JSON through any backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(HashMap<String, Value>),
}

impl Value {
    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get as string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Rank used for cross-type collation: null < bool < number < string
    /// < array < object, matching CouchDB view collation.
    fn type_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    /// Total collation order over values.
    ///
    /// Values of different types order by type rank. Within a type, numbers
    /// use `total_cmp`, arrays compare element-wise then by length, and
    /// objects compare their entries in key order.
    pub fn collate(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Array(a), Value::Array(b)) => {
                for (x, y) in a.iter().zip(b.iter()) {
                    let ord = x.collate(y);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                a.len().cmp(&b.len())
            }
            (Value::Object(a), Value::Object(b)) => {
                let mut a_entries: Vec<_> = a.iter().collect();
                let mut b_entries: Vec<_> = b.iter().collect();
                a_entries.sort_by(|x, y| x.0.cmp(y.0));
                b_entries.sort_by(|x, y| x.0.cmp(y.0));
                for ((ka, va), (kb, vb)) in a_entries.iter().zip(b_entries.iter()) {
                    let ord = ka.cmp(kb).then_with(|| va.collate(vb));
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                a_entries.len().cmp(&b_entries.len())
            }
            _ => self.type_rank().cmp(&other.type_rank()),
        }
    }
}

// Conversions
impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(0.0)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => {
                Value::Object(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Number(n) => serde_json::Value::Number(
                serde_json::Number::from_f64(n).unwrap_or_else(|| serde_json::Number::from(0)),
            ),
            Value::String(s) => serde_json::Value::String(s),
            Value::Array(arr) => {
                serde_json::Value::Array(arr.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Object(obj) => serde_json::Value::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}
