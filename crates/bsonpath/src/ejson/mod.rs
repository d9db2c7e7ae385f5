//! Extended JSON (canonical and relaxed) text codec.
//!
//! Two textual renderings of the binary format: canonical preserves the
//! exact wire type of every scalar through `$type` wrapper objects; relaxed
//! favors readable bare numbers and ISO dates at some re-parse ambiguity
//! cost (an Int64 and a Double may read back differently). [`parse`]
//! accepts either form.

mod decoder;
mod encoder;
mod error;
mod text;

pub use decoder::parse;
pub use encoder::{
    document_to_value, to_canonical_string, to_relaxed_string, to_string, EjsonEncoderOptions,
};
pub use error::EjsonParseError;
