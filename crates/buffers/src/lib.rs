//! Binary buffer utilities for bsonpath.
//!
//! The document format this workspace operates on is little-endian and is
//! routinely handed to us from untrusted sources, so every read is
//! bounds-checked and reported through [`BufferError`] instead of panicking.
//!
//! # Overview
//!
//! - [`Reader`] - Reads little-endian binary data from a byte slice with
//!   cursor tracking
//! - [`Writer`] - Writes little-endian binary data to an auto-growing buffer
//!
//! # Example
//!
//! ```
//! use bsonpath_buffers::{Reader, Writer};
//!
//! let mut writer = Writer::new();
//! writer.u8(0x01);
//! writer.i32_le(0x0203);
//! writer.utf8("hello");
//! let data = writer.flush();
//!
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.u8(), Ok(0x01));
//! assert_eq!(reader.i32_le(), Ok(0x0203));
//! assert_eq!(reader.utf8(5), Ok("hello"));
//! ```

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

/// Error type for buffer operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// Attempted to read past the end of the buffer.
    EndOfBuffer,
    /// Invalid UTF-8 sequence.
    InvalidUtf8,
}

impl std::fmt::Display for BufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferError::EndOfBuffer => write!(f, "end of buffer"),
            BufferError::InvalidUtf8 => write!(f, "invalid UTF-8 sequence"),
        }
    }
}

impl std::error::Error for BufferError {}
