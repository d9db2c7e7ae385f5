//! Document to Extended JSON text.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::{Map, Number, Value};

use crate::document::{CorruptDocument, RawDocument, ValueRef};
use crate::extract::CalendarTime;

/// Serialization options.
///
/// Canonical mode wraps every non-string scalar in its `$type` object so the
/// exact wire type survives a round-trip. Relaxed mode (the default) favors
/// plain JSON numbers and ISO dates.
#[derive(Debug, Clone, Copy, Default)]
pub struct EjsonEncoderOptions {
    pub canonical: bool,
}

/// Serializes a document in canonical form.
pub fn to_canonical_string(doc: &RawDocument) -> Result<String, CorruptDocument> {
    to_string(doc, &EjsonEncoderOptions { canonical: true })
}

/// Serializes a document in relaxed form.
pub fn to_relaxed_string(doc: &RawDocument) -> Result<String, CorruptDocument> {
    to_string(doc, &EjsonEncoderOptions { canonical: false })
}

/// Serializes a document with the given options.
pub fn to_string(
    doc: &RawDocument,
    options: &EjsonEncoderOptions,
) -> Result<String, CorruptDocument> {
    Ok(document_to_value(doc, options)?.to_string())
}

/// Maps a document to a `serde_json::Value`, keys in encoded order.
pub fn document_to_value(
    doc: &RawDocument,
    options: &EjsonEncoderOptions,
) -> Result<Value, CorruptDocument> {
    let mut map = Map::new();
    for element in doc.iter() {
        let element = element?;
        if map.contains_key(element.key) {
            // Duplicate keys cannot survive in JSON; keep the first, the
            // same occurrence a lookup would resolve.
            continue;
        }
        map.insert(
            element.key.to_owned(),
            value_to_json(&element.value()?, options)?,
        );
    }
    Ok(Value::Object(map))
}

fn array_to_value(
    doc: &RawDocument,
    options: &EjsonEncoderOptions,
) -> Result<Value, CorruptDocument> {
    let mut items = Vec::new();
    for element in doc.iter() {
        let element = element?;
        items.push(value_to_json(&element.value()?, options)?);
    }
    Ok(Value::Array(items))
}

fn value_to_json(
    value: &ValueRef,
    options: &EjsonEncoderOptions,
) -> Result<Value, CorruptDocument> {
    Ok(match value {
        ValueRef::Double(value) => double_to_json(*value, options),
        ValueRef::Str(s) => Value::String((*s).to_owned()),
        ValueRef::Document(doc) => document_to_value(doc, options)?,
        ValueRef::Array(doc) => array_to_value(doc, options)?,
        ValueRef::Binary { subtype, data } => wrap(
            "$binary",
            Value::Object(Map::from_iter([
                ("base64".to_owned(), Value::String(BASE64.encode(data))),
                ("subType".to_owned(), Value::String(format!("{subtype:02x}"))),
            ])),
        ),
        ValueRef::Bool(value) => Value::Bool(*value),
        ValueRef::DateTime(millis) => date_to_json(*millis, options),
        ValueRef::Null => Value::Null,
        ValueRef::Int32(value) => {
            if options.canonical {
                wrap("$numberInt", Value::String(value.to_string()))
            } else {
                Value::Number(Number::from(*value))
            }
        }
        ValueRef::Int64(value) => {
            if options.canonical {
                wrap("$numberLong", Value::String(value.to_string()))
            } else {
                Value::Number(Number::from(*value))
            }
        }
        ValueRef::Decimal128(value) => {
            wrap("$numberDecimal", Value::String(value.to_string()))
        }
    })
}

fn double_to_json(value: f64, options: &EjsonEncoderOptions) -> Value {
    if !options.canonical {
        if let Some(number) = Number::from_f64(value) {
            return Value::Number(number);
        }
    }
    wrap("$numberDouble", Value::String(format_double(value)))
}

fn format_double(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else if value == f64::INFINITY {
        "Infinity".to_owned()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_owned()
    } else {
        value.to_string()
    }
}

fn date_to_json(millis: i64, options: &EjsonEncoderOptions) -> Value {
    if !options.canonical {
        let fields = CalendarTime::from_epoch_millis(millis);
        if millis >= 0 && fields.year <= 9999 {
            return wrap("$date", Value::String(fields.to_iso8601()));
        }
    }
    wrap("$date", Value::Number(Number::from(millis)))
}

fn wrap(key: &str, payload: Value) -> Value {
    Value::Object(Map::from_iter([(key.to_owned(), payload)]))
}
