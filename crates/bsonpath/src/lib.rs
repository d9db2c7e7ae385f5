//! Dot-path accessor, comparator, and Extended JSON codec for BSON
//! documents.
//!
//! The engine operates on a single opaque byte buffer holding one encoded
//! document. Everything is a pure, synchronous function over that immutable
//! input: [`RawDocument::parse`] validates the structural header,
//! [`RawDocument::find`] resolves a dotted path without materializing
//! intermediate structure, typed getters convert a located leaf with
//! mismatch-means-absent semantics, [`ejson`] converts to and from the
//! canonical and relaxed Extended JSON text forms, and [`compare`] /
//! [`hash`] provide the primitives an ordered or hashed index needs.
//!
//! Nothing here mutates a document, and no operation reads past the
//! validated length, so every call is safe on untrusted input and from any
//! number of threads at once.
//!
//! # Example
//!
//! ```
//! use bsonpath::{ejson, RawDocument};
//!
//! let bytes = ejson::parse(
//!     r#"{"d":{"recordId":"R1","payload":{"vector":[21,17,19]}}}"#,
//! )?;
//! let doc = RawDocument::parse(&bytes)?;
//!
//! assert_eq!(doc.get_str("d.recordId")?, Some("R1"));
//! assert_eq!(doc.get_i32("d.payload.vector.1")?, Some(17));
//! // Wrong type is absence, not an error:
//! assert_eq!(doc.get_i32("d.recordId")?, None);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod compare;
pub mod decimal128;
pub mod document;
pub mod dotpath;
pub mod ejson;
pub mod extract;
pub mod hash;

pub use compare::{binary_equal, compare, equal};
pub use decimal128::{Decimal128, Decimal128Error};
pub use document::{CorruptDocument, RawDocument, RawElement, Tag, ValueRef};
pub use ejson::{EjsonEncoderOptions, EjsonParseError};
pub use extract::CalendarTime;
pub use hash::hash;

/// Engine version, matching the original accessor surface it replaces.
pub const ENGINE_VERSION: &str = "2.1";

/// Returns the engine version string.
pub fn version() -> &'static str {
    ENGINE_VERSION
}
