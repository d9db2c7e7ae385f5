//! Dot-path navigation.
//!
//! A dotpath is a `.`-separated sequence of keys naming a nested value,
//! resolved without materializing any intermediate structure. There is no
//! escaping: a literal `.` inside a key is not addressable, and segments
//! compare byte-for-byte, case-sensitively.
//!
//! Arrays get no special treatment. Their elements carry the keys
//! `"0"`, `"1"`, … on the wire, so `payload.vector.1` is an ordinary key
//! lookup at every level; a numeral with no matching key is an ordinary
//! miss.

use crate::document::{CorruptDocument, RawDocument, ValueRef};

impl<'a> RawDocument<'a> {
    /// Resolves a dotpath to a value view.
    ///
    /// At each level the elements are scanned linearly and the first key
    /// match wins. A missing segment, or an intermediate match that is not
    /// a document or array, resolves to `Ok(None)` immediately. Cost is
    /// proportional to the siblings scanned along the path, not to the
    /// document size.
    ///
    /// Structural corruption encountered during the scan is an error;
    /// absence never is.
    pub fn find(&self, dotpath: &str) -> Result<Option<ValueRef<'a>>, CorruptDocument> {
        let mut current = *self;
        let mut segments = dotpath.split('.').peekable();
        while let Some(segment) = segments.next() {
            let mut matched = None;
            for element in current.iter() {
                let element = element?;
                if element.key == segment {
                    matched = Some(element.value()?);
                    break;
                }
            }
            let Some(value) = matched else {
                return Ok(None);
            };
            if segments.peek().is_none() {
                return Ok(Some(value));
            }
            match value {
                ValueRef::Document(doc) | ValueRef::Array(doc) => current = doc,
                _ => return Ok(None),
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ejson;

    fn encode(text: &str) -> Vec<u8> {
        ejson::parse(text).expect("valid ejson")
    }

    const NESTED: &str = r#"{"d":{"recordId":"R1","payload":{"vector":[21,17,19]}},"top":1}"#;

    #[test]
    fn test_top_level_lookup() {
        let bytes = encode(NESTED);
        let doc = RawDocument::parse(&bytes).unwrap();
        assert_eq!(doc.find("top").unwrap(), Some(ValueRef::Int32(1)));
    }

    #[test]
    fn test_nested_lookup() {
        let bytes = encode(NESTED);
        let doc = RawDocument::parse(&bytes).unwrap();
        assert_eq!(
            doc.find("d.recordId").unwrap(),
            Some(ValueRef::Str("R1"))
        );
    }

    #[test]
    fn test_array_index_is_a_key_lookup() {
        let bytes = encode(NESTED);
        let doc = RawDocument::parse(&bytes).unwrap();
        assert_eq!(
            doc.find("d.payload.vector.1").unwrap(),
            Some(ValueRef::Int32(17))
        );
        // Same result as descending to the array and looking up key "1".
        let Some(ValueRef::Array(vector)) = doc.find("d.payload.vector").unwrap() else {
            panic!("expected an array");
        };
        assert_eq!(vector.find("1").unwrap(), Some(ValueRef::Int32(17)));
    }

    #[test]
    fn test_missing_segment() {
        let bytes = encode(NESTED);
        let doc = RawDocument::parse(&bytes).unwrap();
        assert_eq!(doc.find("d.missing").unwrap(), None);
        assert_eq!(doc.find("missing.recordId").unwrap(), None);
    }

    #[test]
    fn test_scalar_with_remaining_segments() {
        let bytes = encode(NESTED);
        let doc = RawDocument::parse(&bytes).unwrap();
        assert_eq!(doc.find("d.recordId.deeper").unwrap(), None);
        assert_eq!(doc.find("top.x").unwrap(), None);
    }

    #[test]
    fn test_out_of_range_and_negative_indices_miss() {
        let bytes = encode(NESTED);
        let doc = RawDocument::parse(&bytes).unwrap();
        assert_eq!(doc.find("d.payload.vector.3").unwrap(), None);
        assert_eq!(doc.find("d.payload.vector.-1").unwrap(), None);
    }

    #[test]
    fn test_case_sensitive() {
        let bytes = encode(NESTED);
        let doc = RawDocument::parse(&bytes).unwrap();
        assert_eq!(doc.find("d.RecordId").unwrap(), None);
    }

    #[test]
    fn test_first_occurrence_wins() {
        // Duplicate keys are legal on the wire; hand-assemble {"a":1,"a":2}.
        let mut bytes = vec![0u8; 4];
        for value in [1i32, 2] {
            bytes.push(0x10);
            bytes.extend_from_slice(b"a\0");
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        bytes.push(0);
        let total = bytes.len() as i32;
        bytes[0..4].copy_from_slice(&total.to_le_bytes());
        let doc = RawDocument::parse(&bytes).unwrap();
        assert_eq!(doc.find("a").unwrap(), Some(ValueRef::Int32(1)));
    }

    #[test]
    fn test_empty_path_is_a_miss() {
        let bytes = encode(NESTED);
        let doc = RawDocument::parse(&bytes).unwrap();
        assert_eq!(doc.find("").unwrap(), None);
    }

    #[test]
    fn test_corruption_mid_scan_is_fatal() {
        // Clobber the nested document's terminator while the outer header
        // stays consistent, so the damage is only found while scanning.
        let bytes = encode(r#"{"d":{"x":1}}"#);
        let mut broken = bytes.clone();
        let at = broken.len() - 2;
        broken[at] = 0x7f;
        let doc = RawDocument::parse(&broken).unwrap();
        assert!(doc.find("d.x").is_err());
    }
}
