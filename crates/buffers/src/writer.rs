//! Little-endian binary writer over an auto-growing buffer.

/// A binary writer that appends little-endian data to a growable buffer.
///
/// Length-prefixed formats often need to patch a size field after the fact;
/// [`Writer::patch_i32_le`] writes back into an already-emitted slot.
///
/// # Example
///
/// ```
/// use bsonpath_buffers::Writer;
///
/// let mut writer = Writer::new();
/// let slot = writer.len();
/// writer.i32_le(0);
/// writer.utf8("hi");
/// writer.patch_i32_le(slot, writer.len() as i32);
/// assert_eq!(writer.flush(), vec![6, 0, 0, 0, b'h', b'i']);
/// ```
#[derive(Debug, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates a writer with a pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Clears the buffer for reuse.
    pub fn reset(&mut self) {
        self.buf.clear();
    }

    /// Consumes the writer and returns the written bytes.
    pub fn flush(self) -> Vec<u8> {
        self.buf
    }

    /// Writes a single byte.
    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.buf.push(val);
    }

    /// Writes raw bytes.
    pub fn bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes a signed 32-bit integer (little-endian).
    #[inline]
    pub fn i32_le(&mut self, val: i32) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Writes a signed 64-bit integer (little-endian).
    #[inline]
    pub fn i64_le(&mut self, val: i64) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Writes a 64-bit floating point number (little-endian).
    #[inline]
    pub fn f64_le(&mut self, val: f64) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Writes the UTF-8 bytes of a string, with no length prefix.
    pub fn utf8(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
    }

    /// Overwrites 4 bytes at `at` with a little-endian 32-bit integer.
    ///
    /// The slot must already have been written. Out-of-range offsets are
    /// ignored rather than panicking; callers always patch a slot they
    /// recorded with [`Writer::len`] before emitting it.
    pub fn patch_i32_le(&mut self, at: usize, val: i32) {
        if let Some(slot) = self.buf.get_mut(at..at + 4) {
            slot.copy_from_slice(&val.to_le_bytes());
        }
    }
}
