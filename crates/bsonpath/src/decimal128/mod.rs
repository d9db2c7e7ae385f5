//! IEEE 754-2008 decimal128 values (binary integer decimal encoding).
//!
//! The engine never does decimal arithmetic; it decodes the 16-byte wire
//! payload, renders the canonical decimal string (the bridge handed to the
//! host's arbitrary-precision numeric type), parses that string form back,
//! and compares values exactly for the document comparator.

mod error;

pub use error::Decimal128Error;

use std::fmt;
use std::str::FromStr;

const EXPONENT_BIAS: i32 = 6176;
const EXPONENT_MIN: i32 = -6176;
const EXPONENT_MAX: i32 = 6111;
const MAX_DIGITS: usize = 34;
/// 10^34 - 1, the widest canonical coefficient.
const MAX_COEFFICIENT: u128 = 9_999_999_999_999_999_999_999_999_999_999_999;

/// A decimal128 value in its 16-byte little-endian wire encoding.
///
/// Equality on this type is representation equality of the raw bytes;
/// numeric comparison lives in the document comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decimal128 {
    bytes: [u8; 16],
}

/// A decoded decimal128: the three value classes of the encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DecimalClass {
    NaN,
    Infinity {
        negative: bool,
    },
    Finite {
        negative: bool,
        coefficient: u128,
        exponent: i32,
    },
}

impl Decimal128 {
    /// Wraps the 16 wire bytes (little-endian).
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self { bytes }
    }

    /// The 16 wire bytes (little-endian).
    pub fn to_bytes(self) -> [u8; 16] {
        self.bytes
    }

    /// Positive or negative infinity.
    pub fn infinity(negative: bool) -> Self {
        let mut high: u64 = 0b11110 << 58;
        if negative {
            high |= 1 << 63;
        }
        Self::from_halves(high, 0)
    }

    /// The (quiet, unsigned) NaN encoding.
    pub fn nan() -> Self {
        Self::from_halves(0b11111 << 58, 0)
    }

    /// Builds a finite value from sign, coefficient, and decimal exponent.
    pub fn from_parts(
        negative: bool,
        coefficient: u128,
        exponent: i32,
    ) -> Result<Self, Decimal128Error> {
        if coefficient > MAX_COEFFICIENT {
            return Err(Decimal128Error::TooManyDigits);
        }
        if !(EXPONENT_MIN..=EXPONENT_MAX).contains(&exponent) {
            return Err(Decimal128Error::ExponentOutOfRange);
        }
        let biased = (exponent + EXPONENT_BIAS) as u64;
        // The coefficient is at most 10^34 - 1 < 2^113, so its top 64-bit
        // half always fits under the 14-bit exponent field.
        let mut high = ((coefficient >> 64) as u64) | (biased << 49);
        if negative {
            high |= 1 << 63;
        }
        Ok(Self::from_halves(high, coefficient as u64))
    }

    fn from_halves(high: u64, low: u64) -> Self {
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&low.to_le_bytes());
        bytes[8..].copy_from_slice(&high.to_le_bytes());
        Self { bytes }
    }

    fn low64(&self) -> u64 {
        u64::from_le_bytes([
            self.bytes[0],
            self.bytes[1],
            self.bytes[2],
            self.bytes[3],
            self.bytes[4],
            self.bytes[5],
            self.bytes[6],
            self.bytes[7],
        ])
    }

    fn high64(&self) -> u64 {
        u64::from_le_bytes([
            self.bytes[8],
            self.bytes[9],
            self.bytes[10],
            self.bytes[11],
            self.bytes[12],
            self.bytes[13],
            self.bytes[14],
            self.bytes[15],
        ])
    }

    /// Decodes sign, coefficient, and exponent out of the bit fields.
    pub(crate) fn class(&self) -> DecimalClass {
        let high = self.high64();
        let low = self.low64();
        let negative = high >> 63 == 1;
        let combination = ((high >> 58) & 0x1f) as u8;
        if combination >> 3 == 0b11 {
            return match combination {
                0b11110 => DecimalClass::Infinity { negative },
                0b11111 => DecimalClass::NaN,
                _ => {
                    // Large-coefficient form: the implied (100)2 prefix puts
                    // the coefficient past 34 digits, which is non-canonical
                    // and reads as zero.
                    let exponent = ((high >> 47) & 0x3fff) as i32 - EXPONENT_BIAS;
                    DecimalClass::Finite {
                        negative,
                        coefficient: 0,
                        exponent,
                    }
                }
            };
        }
        let exponent = ((high >> 49) & 0x3fff) as i32 - EXPONENT_BIAS;
        let coefficient =
            (((high & 0x0001_ffff_ffff_ffff) as u128) << 64) | low as u128;
        let coefficient = if coefficient > MAX_COEFFICIENT {
            0
        } else {
            coefficient
        };
        DecimalClass::Finite {
            negative,
            coefficient,
            exponent,
        }
    }

    /// Whether this is the NaN class.
    pub fn is_nan(&self) -> bool {
        self.class() == DecimalClass::NaN
    }

    /// Nearest binary double. Used only where a comparison against a Double
    /// is requested; the string bridge stays exact.
    pub(crate) fn to_f64(&self) -> f64 {
        match self.class() {
            DecimalClass::NaN => f64::NAN,
            DecimalClass::Infinity { negative: true } => f64::NEG_INFINITY,
            DecimalClass::Infinity { negative: false } => f64::INFINITY,
            DecimalClass::Finite {
                negative,
                coefficient,
                exponent,
            } => {
                let magnitude = coefficient as f64 * 10f64.powi(exponent);
                if negative {
                    -magnitude
                } else {
                    magnitude
                }
            }
        }
    }
}

impl fmt::Display for Decimal128 {
    /// Canonical decimal string: `NaN`, `[-]Infinity`, scientific form when
    /// the scientific exponent is below -6 or the raw exponent is positive,
    /// plain form with an inserted radix point otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.class() {
            DecimalClass::NaN => write!(f, "NaN"),
            DecimalClass::Infinity { negative } => {
                write!(f, "{}Infinity", if negative { "-" } else { "" })
            }
            DecimalClass::Finite {
                negative,
                coefficient,
                exponent,
            } => {
                let sign = if negative { "-" } else { "" };
                let digits = coefficient.to_string();
                let ndigits = digits.len() as i32;
                let scientific_exponent = ndigits - 1 + exponent;
                if scientific_exponent < -6 || exponent > 0 {
                    write!(f, "{sign}{}", &digits[..1])?;
                    if ndigits > 1 {
                        write!(f, ".{}", &digits[1..])?;
                    }
                    write!(f, "E{scientific_exponent:+}")
                } else if exponent == 0 {
                    write!(f, "{sign}{digits}")
                } else {
                    let radix = ndigits + exponent;
                    if radix > 0 {
                        let (int_part, frac_part) = digits.split_at(radix as usize);
                        write!(f, "{sign}{int_part}.{frac_part}")
                    } else {
                        write!(f, "{sign}0.{}{digits}", "0".repeat(-radix as usize))
                    }
                }
            }
        }
    }
}

impl FromStr for Decimal128 {
    type Err = Decimal128Error;

    /// Parses the canonical string form: optional sign, digits with an
    /// optional radix point, optional `E±exp`; `Infinity`/`Inf` and `NaN`
    /// in any case. Values that cannot be represented exactly are errors.
    fn from_str(s: &str) -> Result<Self, Decimal128Error> {
        let (negative, rest) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        if rest.eq_ignore_ascii_case("infinity") || rest.eq_ignore_ascii_case("inf") {
            return Ok(Self::infinity(negative));
        }
        if rest.eq_ignore_ascii_case("nan") {
            return Ok(Self::nan());
        }
        let (mantissa, exp_part) = match rest.find(['e', 'E']) {
            Some(at) => (&rest[..at], Some(&rest[at + 1..])),
            None => (rest, None),
        };
        let mut exponent: i64 = match exp_part {
            Some(text) => text
                .parse()
                .map_err(|_| Decimal128Error::InvalidFormat)?,
            None => 0,
        };
        let (int_digits, frac_digits) = match mantissa.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (mantissa, ""),
        };
        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(Decimal128Error::InvalidFormat);
        }
        let mut digits: Vec<u8> = Vec::with_capacity(int_digits.len() + frac_digits.len());
        for byte in int_digits.bytes().chain(frac_digits.bytes()) {
            if !byte.is_ascii_digit() {
                return Err(Decimal128Error::InvalidFormat);
            }
            digits.push(byte - b'0');
        }
        exponent = exponent.saturating_sub(frac_digits.len() as i64);

        let leading_zeros = digits.iter().take_while(|&&d| d == 0).count();
        digits.drain(..leading_zeros);
        // Fold trailing zeros into the exponent where the value would
        // otherwise be too wide or too small to encode.
        while digits.len() > MAX_DIGITS && digits.last() == Some(&0) {
            digits.pop();
            exponent = exponent.saturating_add(1);
        }
        if digits.len() > MAX_DIGITS {
            return Err(Decimal128Error::TooManyDigits);
        }
        while exponent < EXPONENT_MIN as i64 && digits.last() == Some(&0) {
            digits.pop();
            exponent = exponent.saturating_add(1);
        }
        while exponent > EXPONENT_MAX as i64 && digits.len() < MAX_DIGITS {
            digits.push(0);
            exponent -= 1;
        }
        if digits.is_empty() {
            // Zero absorbs any leftover exponent range error.
            exponent = exponent.clamp(EXPONENT_MIN as i64, EXPONENT_MAX as i64);
        }
        if !((EXPONENT_MIN as i64)..=(EXPONENT_MAX as i64)).contains(&exponent) {
            return Err(Decimal128Error::ExponentOutOfRange);
        }
        let mut coefficient: u128 = 0;
        for digit in digits {
            coefficient = coefficient * 10 + digit as u128;
        }
        Self::from_parts(negative, coefficient, exponent as i32)
    }
}

/// Exact order between two finite decimals given as sign/coefficient/exponent.
pub(crate) fn compare_finite(
    lhs_negative: bool,
    lhs_coefficient: u128,
    lhs_exponent: i32,
    rhs_negative: bool,
    rhs_coefficient: u128,
    rhs_exponent: i32,
) -> std::cmp::Ordering {
    use std::cmp::Ordering;

    // Zeros compare equal regardless of sign or exponent.
    match (lhs_coefficient == 0, rhs_coefficient == 0) {
        (true, true) => return Ordering::Equal,
        (true, false) => {
            return if rhs_negative {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        }
        (false, true) => {
            return if lhs_negative {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
        (false, false) => {}
    }
    if lhs_negative != rhs_negative {
        return if lhs_negative {
            Ordering::Less
        } else {
            Ordering::Greater
        };
    }
    let magnitude = compare_magnitude(
        lhs_coefficient,
        lhs_exponent,
        rhs_coefficient,
        rhs_exponent,
    );
    if lhs_negative {
        magnitude.reverse()
    } else {
        magnitude
    }
}

/// Order of `lhs_c * 10^lhs_e` versus `rhs_c * 10^rhs_e`, both nonzero.
fn compare_magnitude(
    lhs_coefficient: u128,
    lhs_exponent: i32,
    rhs_coefficient: u128,
    rhs_exponent: i32,
) -> std::cmp::Ordering {
    use std::cmp::Ordering;

    if lhs_exponent == rhs_exponent {
        return lhs_coefficient.cmp(&rhs_coefficient);
    }
    // Scale the side with the larger exponent down to the smaller one. If
    // the scaled coefficient overflows u128 it is necessarily larger: the
    // other coefficient is below 10^35 while the overflow implies at least
    // 2^128.
    if lhs_exponent > rhs_exponent {
        let shift = (lhs_exponent - rhs_exponent) as u32;
        match checked_scale(lhs_coefficient, shift) {
            Some(scaled) => scaled.cmp(&rhs_coefficient),
            None => Ordering::Greater,
        }
    } else {
        let shift = (rhs_exponent - lhs_exponent) as u32;
        match checked_scale(rhs_coefficient, shift) {
            Some(scaled) => lhs_coefficient.cmp(&scaled),
            None => Ordering::Less,
        }
    }
}

fn checked_scale(coefficient: u128, shift: u32) -> Option<u128> {
    let factor = 10u128.checked_pow(shift)?;
    coefficient.checked_mul(factor)
}
