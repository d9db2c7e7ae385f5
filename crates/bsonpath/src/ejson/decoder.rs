//! Extended JSON text to binary document.
//!
//! This is the only path by which external text becomes storage-ready
//! bytes. Canonical and relaxed spellings are both accepted, in any mix.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use bsonpath_buffers::Writer;
use serde_json::{Map, Number, Value};

use crate::decimal128::{Decimal128, Decimal128Error};
use crate::document::Tag;
use crate::extract::parse_iso8601;

use super::EjsonParseError;

/// Parses Extended JSON text into an encoded document.
pub fn parse(text: &str) -> Result<Vec<u8>, EjsonParseError> {
    let json: Value = serde_json::from_str(text)?;
    let Value::Object(map) = json else {
        return Err(EjsonParseError::TopLevelNotObject);
    };
    let mut writer = Writer::with_capacity(text.len());
    write_document(&mut writer, &map)?;
    Ok(writer.flush())
}

fn write_document(w: &mut Writer, map: &Map<String, Value>) -> Result<(), EjsonParseError> {
    let start = w.len();
    w.i32_le(0);
    for (key, value) in map {
        write_element(w, key, value)?;
    }
    w.u8(0x00);
    w.patch_i32_le(start, (w.len() - start) as i32);
    Ok(())
}

fn write_array(w: &mut Writer, items: &[Value]) -> Result<(), EjsonParseError> {
    let start = w.len();
    w.i32_le(0);
    for (index, item) in items.iter().enumerate() {
        write_element(w, &index.to_string(), item)?;
    }
    w.u8(0x00);
    w.patch_i32_le(start, (w.len() - start) as i32);
    Ok(())
}

fn write_element(w: &mut Writer, key: &str, value: &Value) -> Result<(), EjsonParseError> {
    if key.as_bytes().contains(&0x00) {
        return Err(EjsonParseError::NulInKey);
    }
    match value {
        Value::Null => {
            write_header(w, Tag::Null, key);
        }
        Value::Bool(value) => {
            write_header(w, Tag::Boolean, key);
            w.u8(*value as u8);
        }
        Value::Number(number) => write_number(w, key, number)?,
        Value::String(s) => {
            write_header(w, Tag::String, key);
            write_string_payload(w, s);
        }
        Value::Array(items) => {
            write_header(w, Tag::Array, key);
            write_array(w, items)?;
        }
        Value::Object(map) => match unwrap_extended(map)? {
            Some(Extended::Int32(value)) => {
                write_header(w, Tag::Int32, key);
                w.i32_le(value);
            }
            Some(Extended::Int64(value)) => {
                write_header(w, Tag::Int64, key);
                w.i64_le(value);
            }
            Some(Extended::Double(value)) => {
                write_header(w, Tag::Double, key);
                w.f64_le(value);
            }
            Some(Extended::Decimal(value)) => {
                write_header(w, Tag::Decimal128, key);
                w.bytes(&value.to_bytes());
            }
            Some(Extended::Date(millis)) => {
                write_header(w, Tag::DateTime, key);
                w.i64_le(millis);
            }
            Some(Extended::Binary { subtype, data }) => {
                write_header(w, Tag::Binary, key);
                w.i32_le(data.len() as i32);
                w.u8(subtype);
                w.bytes(&data);
            }
            None => {
                write_header(w, Tag::Document, key);
                write_document(w, map)?;
            }
        },
    }
    Ok(())
}

fn write_header(w: &mut Writer, tag: Tag, key: &str) {
    w.u8(tag.byte());
    w.utf8(key);
    w.u8(0x00);
}

fn write_string_payload(w: &mut Writer, s: &str) {
    w.i32_le(s.len() as i32 + 1);
    w.utf8(s);
    w.u8(0x00);
}

fn write_number(w: &mut Writer, key: &str, number: &Number) -> Result<(), EjsonParseError> {
    if let Some(value) = number.as_i64() {
        if (i32::MIN as i64..=i32::MAX as i64).contains(&value) {
            write_header(w, Tag::Int32, key);
            w.i32_le(value as i32);
        } else {
            write_header(w, Tag::Int64, key);
            w.i64_le(value);
        }
    } else if let Some(value) = number.as_u64() {
        return Err(EjsonParseError::IntegerOutOfRange(value));
    } else if let Some(value) = number.as_f64() {
        write_header(w, Tag::Double, key);
        w.f64_le(value);
    }
    Ok(())
}

/// A scalar recovered from a `$`-wrapper object.
enum Extended {
    Int32(i32),
    Int64(i64),
    Double(f64),
    Decimal(Decimal128),
    Date(i64),
    Binary { subtype: u8, data: Vec<u8> },
}

/// Recognizes `$`-wrapper objects.
///
/// Only the exact wrapper spellings convert; any other `$`-prefixed key is
/// an ordinary document key. A recognized wrapper with a malformed payload
/// or extra sibling keys is an error, not a silent document.
fn unwrap_extended(map: &Map<String, Value>) -> Result<Option<Extended>, EjsonParseError> {
    let Some((key, payload)) = map.iter().next() else {
        return Ok(None);
    };
    let wrapper: &'static str = match key.as_str() {
        "$numberInt" => "$numberInt",
        "$numberLong" => "$numberLong",
        "$numberDouble" => "$numberDouble",
        "$numberDecimal" => "$numberDecimal",
        "$date" => "$date",
        "$binary" => "$binary",
        _ => return Ok(None),
    };
    if map.len() != 1 {
        return Err(EjsonParseError::ExtraKeys(wrapper));
    }
    let extended = match wrapper {
        "$numberInt" => Extended::Int32(
            payload
                .as_str()
                .and_then(|s| s.parse().ok())
                .ok_or(EjsonParseError::InvalidInt32)?,
        ),
        "$numberLong" => Extended::Int64(
            payload
                .as_str()
                .and_then(|s| s.parse().ok())
                .ok_or(EjsonParseError::InvalidInt64)?,
        ),
        "$numberDouble" => Extended::Double(
            payload
                .as_str()
                .and_then(parse_double_literal)
                .ok_or(EjsonParseError::InvalidDouble)?,
        ),
        "$numberDecimal" => {
            let text = payload
                .as_str()
                .ok_or(EjsonParseError::InvalidDecimal128(Decimal128Error::InvalidFormat))?;
            Extended::Decimal(text.parse::<Decimal128>()?)
        }
        "$date" => Extended::Date(date_payload(payload)?),
        "$binary" => {
            let (subtype, data) = binary_payload(payload)?;
            Extended::Binary { subtype, data }
        }
        _ => return Ok(None),
    };
    Ok(Some(extended))
}

fn parse_double_literal(s: &str) -> Option<f64> {
    match s {
        "NaN" => Some(f64::NAN),
        "Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        _ => s.parse().ok(),
    }
}

fn date_payload(payload: &Value) -> Result<i64, EjsonParseError> {
    match payload {
        Value::String(s) => parse_iso8601(s).ok_or(EjsonParseError::InvalidDate),
        Value::Number(number) => number.as_i64().ok_or(EjsonParseError::InvalidDate),
        Value::Object(inner) => {
            if inner.len() != 1 {
                return Err(EjsonParseError::InvalidDate);
            }
            inner
                .get("$numberLong")
                .and_then(Value::as_str)
                .and_then(|s| s.parse().ok())
                .ok_or(EjsonParseError::InvalidDate)
        }
        _ => Err(EjsonParseError::InvalidDate),
    }
}

fn binary_payload(payload: &Value) -> Result<(u8, Vec<u8>), EjsonParseError> {
    let Value::Object(inner) = payload else {
        return Err(EjsonParseError::InvalidBinary);
    };
    if inner.len() != 2 {
        return Err(EjsonParseError::InvalidBinary);
    }
    let encoded = inner
        .get("base64")
        .and_then(Value::as_str)
        .ok_or(EjsonParseError::InvalidBinary)?;
    let subtype_hex = inner
        .get("subType")
        .and_then(Value::as_str)
        .ok_or(EjsonParseError::InvalidBinary)?;
    if subtype_hex.is_empty() || subtype_hex.len() > 2 {
        return Err(EjsonParseError::InvalidBinary);
    }
    let subtype =
        u8::from_str_radix(subtype_hex, 16).map_err(|_| EjsonParseError::InvalidBinary)?;
    let data = BASE64
        .decode(encoded)
        .map_err(|_| EjsonParseError::InvalidBinary)?;
    Ok((subtype, data))
}
