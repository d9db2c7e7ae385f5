//! Binary document model: validated zero-copy views over the wire encoding.
//!
//! A document is a little-endian, length-prefixed, NUL-terminated sequence
//! of type-tagged `(key, value)` elements. [`RawDocument::parse`] performs
//! the structural header check once; everything downstream (navigation,
//! extraction, serialization) walks the validated span and never reads a
//! byte past the declared length.

mod error;
mod tags;
mod value;

pub use error::CorruptDocument;
pub use tags::Tag;
pub use value::ValueRef;

use std::str;

use bsonpath_buffers::Reader;

use crate::decimal128::Decimal128;

/// Minimal encoding: 4-byte length prefix plus the terminator.
const MIN_DOCUMENT_LEN: usize = 5;

/// A validated, borrowed view of one encoded document.
///
/// The view covers exactly the declared span; sub-documents returned during
/// navigation are views into the same buffer, not copies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawDocument<'a> {
    data: &'a [u8],
}

impl<'a> RawDocument<'a> {
    /// Validates the header of an encoded document and returns a view of it.
    ///
    /// Checks that the leading little-endian int32 length fits the buffer
    /// and that the byte at `length - 1` is the 0x00 terminator. Everything
    /// else is validated lazily while iterating.
    pub fn parse(buf: &'a [u8]) -> Result<RawDocument<'a>, CorruptDocument> {
        if buf.len() < MIN_DOCUMENT_LEN {
            return Err(CorruptDocument::Truncated);
        }
        let declared = i32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
        if declared < MIN_DOCUMENT_LEN as i32 || declared as usize > buf.len() {
            return Err(CorruptDocument::BadLength(declared));
        }
        let len = declared as usize;
        if buf[len - 1] != 0x00 {
            return Err(CorruptDocument::MissingTerminator);
        }
        Ok(RawDocument {
            data: &buf[..len],
        })
    }

    /// The exact encoded bytes of this document, header and terminator
    /// included.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Total encoded length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the document holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.len() == MIN_DOCUMENT_LEN
    }

    /// Iterates the elements in encoded order.
    ///
    /// Element payloads are skipped by width, not decoded; call
    /// [`RawElement::value`] to decode one. Iteration stops at the first
    /// structural error and yields it.
    pub fn iter(&self) -> Elements<'a> {
        Elements {
            reader: Reader::from_slice(self.data, 4, self.data.len() - 1),
            failed: false,
        }
    }
}

/// One element of a document: key, tag, and the undecoded payload span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawElement<'a> {
    /// The element key. Compared byte-for-byte during navigation.
    pub key: &'a str,
    tag: Tag,
    payload: &'a [u8],
}

impl<'a> RawElement<'a> {
    /// The element's type tag.
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Decodes the payload into a borrowed value.
    pub fn value(&self) -> Result<ValueRef<'a>, CorruptDocument> {
        let mut r = Reader::new(self.payload);
        Ok(match self.tag {
            Tag::Double => ValueRef::Double(r.f64_le()?),
            Tag::String => {
                let n = r.i32_le()? as usize;
                let bytes = r.buf(n)?;
                if bytes[n - 1] != 0x00 {
                    return Err(CorruptDocument::InvalidString);
                }
                let s = str::from_utf8(&bytes[..n - 1])
                    .map_err(|_| CorruptDocument::InvalidString)?;
                ValueRef::Str(s)
            }
            Tag::Document => ValueRef::Document(RawDocument::parse(self.payload)?),
            Tag::Array => ValueRef::Array(RawDocument::parse(self.payload)?),
            Tag::Binary => {
                let n = r.i32_le()? as usize;
                let subtype = r.u8()?;
                let data = r.buf(n)?;
                ValueRef::Binary { subtype, data }
            }
            Tag::Boolean => match r.u8()? {
                0x00 => ValueRef::Bool(false),
                0x01 => ValueRef::Bool(true),
                byte => return Err(CorruptDocument::InvalidBoolean(byte)),
            },
            Tag::DateTime => ValueRef::DateTime(r.i64_le()?),
            Tag::Null => ValueRef::Null,
            Tag::Int32 => ValueRef::Int32(r.i32_le()?),
            Tag::Int64 => ValueRef::Int64(r.i64_le()?),
            Tag::Decimal128 => {
                let bytes = r.buf(16)?;
                let mut raw = [0u8; 16];
                raw.copy_from_slice(bytes);
                ValueRef::Decimal128(Decimal128::from_bytes(raw))
            }
        })
    }
}

/// Iterator over a document's elements.
pub struct Elements<'a> {
    reader: Reader<'a>,
    failed: bool,
}

impl<'a> Iterator for Elements<'a> {
    type Item = Result<RawElement<'a>, CorruptDocument>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.reader.remaining() == 0 {
            return None;
        }
        match read_element(&mut self.reader) {
            Ok(element) => Some(Ok(element)),
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

fn read_element<'a>(r: &mut Reader<'a>) -> Result<RawElement<'a>, CorruptDocument> {
    let tag_byte = r.u8()?;
    if tag_byte == 0x00 {
        // The declared length promised more elements than the terminator
        // allows; the span and the content disagree.
        return Err(CorruptDocument::UnexpectedTerminator);
    }
    let tag = Tag::from_byte(tag_byte).ok_or(CorruptDocument::UnknownTag(tag_byte))?;
    let key_bytes = r.cstr()?;
    let key = str::from_utf8(key_bytes).map_err(|_| CorruptDocument::InvalidKey)?;
    let payload = read_payload(r, tag)?;
    Ok(RawElement { key, tag, payload })
}

/// Computes the payload span of an element without decoding it.
fn read_payload<'a>(r: &mut Reader<'a>, tag: Tag) -> Result<&'a [u8], CorruptDocument> {
    let span = match tag {
        Tag::Double | Tag::DateTime | Tag::Int64 => r.buf(8),
        Tag::Int32 => r.buf(4),
        Tag::Decimal128 => r.buf(16),
        Tag::Boolean => r.buf(1),
        Tag::Null => r.buf(0),
        Tag::String => {
            let n = r.peek_i32_le()?;
            if n < 1 {
                return Err(CorruptDocument::InvalidString);
            }
            r.buf(4 + n as usize)
        }
        Tag::Binary => {
            let n = r.peek_i32_le()?;
            if n < 0 {
                return Err(CorruptDocument::BadLength(n));
            }
            r.buf(4 + 1 + n as usize)
        }
        Tag::Document | Tag::Array => {
            let n = r.peek_i32_le()?;
            if n < MIN_DOCUMENT_LEN as i32 {
                return Err(CorruptDocument::BadLength(n));
            }
            r.buf(n as usize)
        }
    };
    span.map_err(CorruptDocument::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ejson;

    fn encode(text: &str) -> Vec<u8> {
        ejson::parse(text).expect("valid ejson")
    }

    #[test]
    fn test_parse_empty_document() {
        let bytes = [5u8, 0, 0, 0, 0];
        let doc = RawDocument::parse(&bytes).unwrap();
        assert!(doc.is_empty());
        assert!(doc.iter().next().is_none());
    }

    #[test]
    fn test_parse_rejects_short_buffer() {
        assert_eq!(
            RawDocument::parse(&[4, 0, 0, 0]),
            Err(CorruptDocument::Truncated)
        );
    }

    #[test]
    fn test_parse_rejects_bad_length() {
        // Declared length larger than the buffer.
        assert_eq!(
            RawDocument::parse(&[6, 0, 0, 0, 0]),
            Err(CorruptDocument::BadLength(6))
        );
        // Negative declared length.
        assert_eq!(
            RawDocument::parse(&[0xff, 0xff, 0xff, 0xff, 0]),
            Err(CorruptDocument::BadLength(-1))
        );
    }

    #[test]
    fn test_parse_rejects_missing_terminator() {
        assert_eq!(
            RawDocument::parse(&[5, 0, 0, 0, 1]),
            Err(CorruptDocument::MissingTerminator)
        );
    }

    #[test]
    fn test_truncating_any_valid_document_fails() {
        let bytes = encode(r#"{"a":1,"b":{"c":"deep"},"d":[1,2.5,null]}"#);
        let truncated = &bytes[..bytes.len() - 1];
        assert!(RawDocument::parse(truncated).is_err());
    }

    #[test]
    fn test_iterates_elements_in_order() {
        let bytes = encode(r#"{"a":1,"b":"x","c":true}"#);
        let doc = RawDocument::parse(&bytes).unwrap();
        let keys: Vec<&str> = doc.iter().map(|el| el.unwrap().key).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_decodes_scalar_values() {
        let bytes = encode(r#"{"i":7,"l":{"$numberLong":"4294967296"},"f":1.5,"s":"hi","t":true,"n":null}"#);
        let doc = RawDocument::parse(&bytes).unwrap();
        let values: Vec<ValueRef> = doc.iter().map(|el| el.unwrap().value().unwrap()).collect();
        assert_eq!(
            values,
            vec![
                ValueRef::Int32(7),
                ValueRef::Int64(4294967296),
                ValueRef::Double(1.5),
                ValueRef::Str("hi"),
                ValueRef::Bool(true),
                ValueRef::Null,
            ]
        );
    }

    #[test]
    fn test_unknown_tag_is_corrupt() {
        // {"a": <tag 0x7f>} hand-assembled: tag, key "a", no payload.
        let bytes = [8u8, 0, 0, 0, 0x7f, b'a', 0, 0];
        let doc = RawDocument::parse(&bytes).unwrap();
        assert_eq!(
            doc.iter().next().unwrap(),
            Err(CorruptDocument::UnknownTag(0x7f))
        );
    }

    #[test]
    fn test_early_terminator_is_corrupt() {
        // Declared length 9 but a terminator byte right after the header.
        let bytes = [9u8, 0, 0, 0, 0x00, 0x0a, b'a', 0, 0];
        let doc = RawDocument::parse(&bytes).unwrap();
        assert_eq!(
            doc.iter().next().unwrap(),
            Err(CorruptDocument::UnexpectedTerminator)
        );
    }

    #[test]
    fn test_string_length_lie_is_corrupt() {
        // String claims 100 payload bytes inside a 13-byte document.
        let mut bytes = vec![13u8, 0, 0, 0, 0x02, b'a', 0];
        bytes.extend_from_slice(&100i32.to_le_bytes());
        bytes.extend_from_slice(&[b'x', 0]);
        let doc = RawDocument::parse(&bytes).unwrap();
        assert_eq!(doc.iter().next().unwrap(), Err(CorruptDocument::Overrun));
    }

    #[test]
    fn test_bad_boolean_byte_is_corrupt() {
        let bytes = [9u8, 0, 0, 0, 0x08, b'a', 0, 0x02, 0];
        let doc = RawDocument::parse(&bytes).unwrap();
        let element = doc.iter().next().unwrap().unwrap();
        assert_eq!(element.value(), Err(CorruptDocument::InvalidBoolean(0x02)));
    }

    #[test]
    fn test_nested_views_share_the_buffer() {
        let bytes = encode(r#"{"outer":{"inner":42}}"#);
        let doc = RawDocument::parse(&bytes).unwrap();
        let element = doc.iter().next().unwrap().unwrap();
        let ValueRef::Document(inner) = element.value().unwrap() else {
            panic!("expected a document");
        };
        let range = bytes.as_ptr_range();
        assert!(range.contains(&inner.as_bytes().as_ptr()));
    }

    #[test]
    fn test_iteration_stops_after_error() {
        let bytes = [8u8, 0, 0, 0, 0x7f, b'a', 0, 0];
        let doc = RawDocument::parse(&bytes).unwrap();
        let mut iter = doc.iter();
        assert!(iter.next().unwrap().is_err());
        assert!(iter.next().is_none());
    }
}
