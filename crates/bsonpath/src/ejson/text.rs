//! Scalar-to-text rendering of a single leaf.
//!
//! Deliberately different from whole-document serialization, and kept that
//! way: strings pass through unquoted, dates print as bare ISO-8601 instead
//! of a `$date` wrapper, and binaries print as escaped hex rather than
//! base64. Subtrees fall back to relaxed document text.

use crate::document::{CorruptDocument, RawDocument, ValueRef};
use crate::extract::CalendarTime;

use super::encoder::to_relaxed_string;

impl RawDocument<'_> {
    /// Renders the leaf at `dotpath` as plain text.
    ///
    /// Boolean and Null leaves have no text rendering and resolve to
    /// `Ok(None)`, exactly like an absent path.
    pub fn as_text(&self, dotpath: &str) -> Result<Option<String>, CorruptDocument> {
        let Some(value) = self.find(dotpath)? else {
            return Ok(None);
        };
        Ok(match value {
            ValueRef::Str(s) => Some(s.to_owned()),
            ValueRef::Double(value) => Some(format!("{value:.6}")),
            ValueRef::Int32(value) => Some(value.to_string()),
            ValueRef::Int64(value) => Some(value.to_string()),
            ValueRef::Decimal128(value) => Some(value.to_string()),
            ValueRef::DateTime(millis) => {
                Some(CalendarTime::from_epoch_millis(millis).to_iso8601())
            }
            ValueRef::Binary { data, .. } => Some(hex_escape(data)),
            // Subtrees render as relaxed document text; an array leaf keeps
            // its wire shape and comes out as an object with numeral keys.
            ValueRef::Document(doc) | ValueRef::Array(doc) => {
                Some(to_relaxed_string(&doc)?)
            }
            ValueRef::Bool(_) | ValueRef::Null => None,
        })
    }
}

fn hex_escape(data: &[u8]) -> String {
    let mut out = String::with_capacity(2 + data.len() * 2);
    out.push_str("\\x");
    for byte in data {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}
