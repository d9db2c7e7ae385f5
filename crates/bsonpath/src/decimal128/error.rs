//! Error type for the decimal string bridge.

use thiserror::Error;

/// A decimal string that cannot be represented exactly as a decimal128.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Decimal128Error {
    #[error("invalid decimal string")]
    InvalidFormat,
    #[error("more than 34 significant digits")]
    TooManyDigits,
    #[error("decimal exponent out of range")]
    ExponentOutOfRange,
}
