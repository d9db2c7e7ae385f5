//! Error type for structurally invalid documents.

use bsonpath_buffers::BufferError;
use thiserror::Error;

/// A document whose binary structure is invalid.
///
/// Structural corruption is always fatal: the engine refuses to navigate
/// bytes it cannot prove are in bounds. Logical absence (missing key, wrong
/// type) is never reported through this type.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CorruptDocument {
    #[error("document shorter than the minimal header")]
    Truncated,
    #[error("declared length {0} does not fit the buffer")]
    BadLength(i32),
    #[error("missing document terminator")]
    MissingTerminator,
    #[error("element data runs past the document end")]
    Overrun,
    #[error("terminator before the declared document end")]
    UnexpectedTerminator,
    #[error("unknown type tag 0x{0:02x}")]
    UnknownTag(u8),
    #[error("element key is not valid UTF-8")]
    InvalidKey,
    #[error("malformed string payload")]
    InvalidString,
    #[error("boolean byte must be 0x00 or 0x01, got 0x{0:02x}")]
    InvalidBoolean(u8),
}

impl From<BufferError> for CorruptDocument {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::EndOfBuffer => CorruptDocument::Overrun,
            BufferError::InvalidUtf8 => CorruptDocument::InvalidString,
        }
    }
}
