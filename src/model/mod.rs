//! Data model: payload values and document addressing.
//!
//! A document's payload is a sequence of [`Record`]s, each an open mapping
//! from field name to [`Value`]. Documents are addressed by a parsed
//! [`DocKey`], constructed once at the boundary from the wire encoding
//! `"<collection>/<id>"`.

pub mod key;
pub mod value;

pub use key::{DocKey, KEY_SEPARATOR};
pub use value::{Record, SortOrder, Value};
