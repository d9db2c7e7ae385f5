//! Error type for Extended JSON parsing.

use thiserror::Error;

use crate::decimal128::Decimal128Error;

/// Malformed Extended JSON input.
#[derive(Debug, Error)]
pub enum EjsonParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("top-level value must be an object")]
    TopLevelNotObject,
    #[error("document key may not contain NUL")]
    NulInKey,
    #[error("integer {0} does not fit a 64-bit value")]
    IntegerOutOfRange(u64),
    #[error("invalid $numberInt wrapper")]
    InvalidInt32,
    #[error("invalid $numberLong wrapper")]
    InvalidInt64,
    #[error("invalid $numberDouble wrapper")]
    InvalidDouble,
    #[error("invalid $numberDecimal wrapper: {0}")]
    InvalidDecimal128(#[from] Decimal128Error),
    #[error("invalid $date wrapper")]
    InvalidDate,
    #[error("invalid $binary wrapper")]
    InvalidBinary,
    #[error("invalid {0} wrapper: extra keys not allowed")]
    ExtraKeys(&'static str),
}
