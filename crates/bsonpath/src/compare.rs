//! Total order, value equality, and representation equality.
//!
//! [`compare`] defines a strict total order over whole documents, fit for
//! ordered-index keys: a fixed rank orders dissimilar type classes, all four
//! numeric types compare by numeric value regardless of width, and
//! documents compare element-wise in encoded order. [`equal`] is
//! `compare == Equal`; [`binary_equal`] is raw byte identity. The two
//! equalities differ: `Int32(5)` equals `Int64(5)` by value but not by
//! representation.

use std::cmp::Ordering;

use crate::decimal128::{compare_finite, Decimal128, DecimalClass};
use crate::document::{CorruptDocument, RawDocument, ValueRef};

/// Total order over two encoded documents.
pub fn compare(a: &[u8], b: &[u8]) -> Result<Ordering, CorruptDocument> {
    let doc_a = RawDocument::parse(a)?;
    let doc_b = RawDocument::parse(b)?;
    compare_documents(&doc_a, &doc_b)
}

/// Value-semantic equality: `compare(a, b) == Equal`.
pub fn equal(a: &[u8], b: &[u8]) -> Result<bool, CorruptDocument> {
    Ok(compare(a, b)? == Ordering::Equal)
}

/// Representation equality: byte-for-byte identical encodings.
pub fn binary_equal(a: &[u8], b: &[u8]) -> bool {
    a == b
}

/// Element-wise order: keys byte-wise first, then values; a strict prefix
/// sorts before the longer document.
fn compare_documents(
    a: &RawDocument<'_>,
    b: &RawDocument<'_>,
) -> Result<Ordering, CorruptDocument> {
    let mut elements_a = a.iter();
    let mut elements_b = b.iter();
    loop {
        match (
            elements_a.next().transpose()?,
            elements_b.next().transpose()?,
        ) {
            (None, None) => return Ok(Ordering::Equal),
            (None, Some(_)) => return Ok(Ordering::Less),
            (Some(_), None) => return Ok(Ordering::Greater),
            (Some(ea), Some(eb)) => {
                let keys = ea.key.as_bytes().cmp(eb.key.as_bytes());
                if keys != Ordering::Equal {
                    return Ok(keys);
                }
                let values = compare_values(&ea.value()?, &eb.value()?)?;
                if values != Ordering::Equal {
                    return Ok(values);
                }
            }
        }
    }
}

/// Rank of a value's type class. Numerics share a rank and fall through to
/// numeric comparison.
fn type_rank(value: &ValueRef<'_>) -> u8 {
    match value {
        ValueRef::Null => 0,
        ValueRef::Double(_)
        | ValueRef::Int32(_)
        | ValueRef::Int64(_)
        | ValueRef::Decimal128(_) => 1,
        ValueRef::Str(_) => 2,
        ValueRef::Document(_) => 3,
        ValueRef::Array(_) => 4,
        ValueRef::Binary { .. } => 5,
        ValueRef::Bool(_) => 6,
        ValueRef::DateTime(_) => 7,
    }
}

fn compare_values(
    a: &ValueRef<'_>,
    b: &ValueRef<'_>,
) -> Result<Ordering, CorruptDocument> {
    let ranks = type_rank(a).cmp(&type_rank(b));
    if ranks != Ordering::Equal {
        return Ok(ranks);
    }
    Ok(match (*a, *b) {
        (ValueRef::Null, ValueRef::Null) => Ordering::Equal,
        (ValueRef::Str(sa), ValueRef::Str(sb)) => sa.as_bytes().cmp(sb.as_bytes()),
        (ValueRef::Bool(ba), ValueRef::Bool(bb)) => ba.cmp(&bb),
        (ValueRef::DateTime(ta), ValueRef::DateTime(tb)) => ta.cmp(&tb),
        (
            ValueRef::Binary {
                subtype: sta,
                data: da,
            },
            ValueRef::Binary {
                subtype: stb,
                data: db,
            },
        ) => da.cmp(db).then(sta.cmp(&stb)),
        (ValueRef::Document(da), ValueRef::Document(db))
        | (ValueRef::Array(da), ValueRef::Array(db)) => {
            return compare_documents(&da, &db);
        }
        (na, nb) => {
            // Same rank and none of the above: both numeric.
            compare_numeric(&Numeric::of(&na), &Numeric::of(&nb))
        }
    })
}

/// Numeric view of a value for cross-width comparison.
enum Numeric {
    Int(i64),
    Float(f64),
    Decimal(Decimal128),
}

impl Numeric {
    fn of(value: &ValueRef<'_>) -> Numeric {
        match value {
            ValueRef::Int32(v) => Numeric::Int(*v as i64),
            ValueRef::Int64(v) => Numeric::Int(*v),
            ValueRef::Double(v) => Numeric::Float(*v),
            ValueRef::Decimal128(v) => Numeric::Decimal(*v),
            // compare_values only builds Numeric for rank-1 values.
            _ => Numeric::Int(0),
        }
    }
}

fn compare_numeric(a: &Numeric, b: &Numeric) -> Ordering {
    match (a, b) {
        (Numeric::Int(ia), Numeric::Int(ib)) => ia.cmp(ib),
        (Numeric::Float(fa), Numeric::Float(fb)) => compare_f64(*fa, *fb),
        (Numeric::Int(i), Numeric::Float(f)) => compare_i64_f64(*i, *f),
        (Numeric::Float(f), Numeric::Int(i)) => compare_i64_f64(*i, *f).reverse(),
        (Numeric::Decimal(da), Numeric::Decimal(db)) => compare_decimal(da, db),
        (Numeric::Decimal(d), Numeric::Int(i)) => compare_decimal_i64(d, *i),
        (Numeric::Int(i), Numeric::Decimal(d)) => compare_decimal_i64(d, *i).reverse(),
        // Decimal versus Double goes through the double's value; the exact
        // bridge is reserved for integers and decimals.
        (Numeric::Decimal(d), Numeric::Float(f)) => compare_f64(d.to_f64(), *f),
        (Numeric::Float(f), Numeric::Decimal(d)) => compare_f64(*f, d.to_f64()),
    }
}

/// Total order on doubles: NaN sorts below every number, negative and
/// positive zero are equal.
fn compare_f64(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Exact order of an i64 against a double; no precision is lost to an
/// intermediate cast.
fn compare_i64_f64(int: i64, float: f64) -> Ordering {
    const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
    if float.is_nan() {
        return Ordering::Greater;
    }
    if float == f64::INFINITY {
        return Ordering::Less;
    }
    if float == f64::NEG_INFINITY {
        return Ordering::Greater;
    }
    let trunc = float.trunc();
    if trunc >= TWO_POW_63 {
        return Ordering::Less;
    }
    if trunc < -TWO_POW_63 {
        return Ordering::Greater;
    }
    // In range, and integral: the cast is exact.
    let trunc_int = trunc as i64;
    match int.cmp(&trunc_int) {
        Ordering::Equal => {
            let fraction = float - trunc;
            if fraction > 0.0 {
                Ordering::Less
            } else if fraction < 0.0 {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        }
        order => order,
    }
}

fn compare_decimal(a: &Decimal128, b: &Decimal128) -> Ordering {
    match (a.class(), b.class()) {
        (DecimalClass::NaN, DecimalClass::NaN) => Ordering::Equal,
        (DecimalClass::NaN, _) => Ordering::Less,
        (_, DecimalClass::NaN) => Ordering::Greater,
        (DecimalClass::Infinity { negative: na }, DecimalClass::Infinity { negative: nb }) => {
            nb.cmp(&na)
        }
        (DecimalClass::Infinity { negative }, _) => {
            if negative {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
        (_, DecimalClass::Infinity { negative }) => {
            if negative {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        }
        (
            DecimalClass::Finite {
                negative: na,
                coefficient: ca,
                exponent: ea,
            },
            DecimalClass::Finite {
                negative: nb,
                coefficient: cb,
                exponent: eb,
            },
        ) => compare_finite(na, ca, ea, nb, cb, eb),
    }
}

fn compare_decimal_i64(decimal: &Decimal128, int: i64) -> Ordering {
    match decimal.class() {
        DecimalClass::NaN => Ordering::Less,
        DecimalClass::Infinity { negative } => {
            if negative {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
        DecimalClass::Finite {
            negative,
            coefficient,
            exponent,
        } => compare_finite(
            negative,
            coefficient,
            exponent,
            int < 0,
            int.unsigned_abs() as u128,
            0,
        ),
    }
}
