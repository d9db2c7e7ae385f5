//! Type-directed extraction.
//!
//! One getter per host type, all following the same contract: resolve the
//! dotpath, check the tag, convert. A leaf of the wrong type is an absent
//! result, never an error, so getters compose safely inside predicates.
//! Only structural corruption is fatal.

mod datetime;

pub use datetime::CalendarTime;
pub(crate) use datetime::parse_iso8601;

use crate::decimal128::Decimal128;
use crate::document::{CorruptDocument, RawDocument, ValueRef};

impl<'a> RawDocument<'a> {
    /// String leaf as a borrowed `&str`.
    pub fn get_str(&self, dotpath: &str) -> Result<Option<&'a str>, CorruptDocument> {
        Ok(match self.find(dotpath)? {
            Some(ValueRef::Str(s)) => Some(s),
            _ => None,
        })
    }

    /// String leaf as an owned `String`.
    pub fn get_string(&self, dotpath: &str) -> Result<Option<String>, CorruptDocument> {
        Ok(self.get_str(dotpath)?.map(str::to_owned))
    }

    /// Double leaf.
    pub fn get_f64(&self, dotpath: &str) -> Result<Option<f64>, CorruptDocument> {
        Ok(match self.find(dotpath)? {
            Some(ValueRef::Double(value)) => Some(value),
            _ => None,
        })
    }

    /// Int32 leaf. An Int64 holding the same number is still absent; no
    /// widening or narrowing happens here.
    pub fn get_i32(&self, dotpath: &str) -> Result<Option<i32>, CorruptDocument> {
        Ok(match self.find(dotpath)? {
            Some(ValueRef::Int32(value)) => Some(value),
            _ => None,
        })
    }

    /// Int64 leaf.
    pub fn get_i64(&self, dotpath: &str) -> Result<Option<i64>, CorruptDocument> {
        Ok(match self.find(dotpath)? {
            Some(ValueRef::Int64(value)) => Some(value),
            _ => None,
        })
    }

    /// Boolean leaf.
    pub fn get_bool(&self, dotpath: &str) -> Result<Option<bool>, CorruptDocument> {
        Ok(match self.find(dotpath)? {
            Some(ValueRef::Bool(value)) => Some(value),
            _ => None,
        })
    }

    /// Binary leaf, copied into an owned buffer. The subtype byte is
    /// dropped; callers that need it can match on [`ValueRef::Binary`].
    pub fn get_binary(&self, dotpath: &str) -> Result<Option<Vec<u8>>, CorruptDocument> {
        Ok(match self.find(dotpath)? {
            Some(ValueRef::Binary { data, .. }) => Some(data.to_vec()),
            _ => None,
        })
    }

    /// DateTime leaf as UTC calendar fields.
    pub fn get_datetime(&self, dotpath: &str) -> Result<Option<CalendarTime>, CorruptDocument> {
        Ok(match self.find(dotpath)? {
            Some(ValueRef::DateTime(millis)) => Some(CalendarTime::from_epoch_millis(millis)),
            _ => None,
        })
    }

    /// Decimal128 leaf. The value's canonical string (`to_string`) is the
    /// exact-precision bridge into an arbitrary-precision host type.
    pub fn get_decimal128(&self, dotpath: &str) -> Result<Option<Decimal128>, CorruptDocument> {
        Ok(match self.find(dotpath)? {
            Some(ValueRef::Decimal128(value)) => Some(value),
            _ => None,
        })
    }

    /// Document or Array leaf, copied out as a standalone encoded document.
    pub fn get_document(&self, dotpath: &str) -> Result<Option<Vec<u8>>, CorruptDocument> {
        Ok(match self.find(dotpath)? {
            Some(ValueRef::Document(doc)) | Some(ValueRef::Array(doc)) => {
                Some(doc.as_bytes().to_vec())
            }
            _ => None,
        })
    }
}
