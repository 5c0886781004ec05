//! Fixed-point decimal used for every exchange rate and threshold.
//!
//! A [`Dec`] is an `i128` count of 10^-18 units, so every value carries exactly
//! [`PRECISION`] fractional digits at any magnitude up to [`Dec::MAX`].
//! Products and quotients are computed on wide integers and rounded back to
//! 18 places with banker's rounding, so two nodes computing from the same
//! inputs always agree bit for bit. There is no floating point anywhere in the
//! oracle.
//!
//! The `checked_*` methods return `None` on overflow. The operator traits
//! panic on overflow, like the primitive integer operators; consensus code
//! uses the checked forms.

use num_bigint::{BigInt, Sign};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use crate::error::OracleError;

/// Number of fractional digits carried by [`Dec`].
pub const PRECISION: u32 = 18;

const ONE_RAW: i128 = 1_000_000_000_000_000_000;

/// An exact base-10 fixed-point number with 18 fractional digits.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dec(i128);

/// `num / den` rounded half to even. `den` must be non-zero.
fn round_div(num: BigInt, den: BigInt) -> BigInt {
    let (num, den) = if den.sign() == Sign::Minus {
        (-num, -den)
    } else {
        (num, den)
    };
    let quotient = &num / &den;
    let remainder = &num % &den;
    let twice = remainder.magnitude() * 2u32;
    let round_away = match twice.cmp(den.magnitude()) {
        Ordering::Less => false,
        Ordering::Greater => true,
        Ordering::Equal => &quotient % 2i32 != BigInt::from(0),
    };
    if !round_away {
        quotient
    } else if num.sign() == Sign::Minus {
        quotient - 1i32
    } else {
        quotient + 1i32
    }
}

fn pow10(exp: u32) -> BigInt {
    BigInt::from(10u32).pow(exp)
}

impl Dec {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(ONE_RAW);
    /// Largest representable value, about 1.7 * 10^20.
    pub const MAX: Self = Self(i128::MAX);
    pub const MIN: Self = Self(i128::MIN);

    fn from_big(value: BigInt) -> Option<Self> {
        i128::try_from(value).ok().map(Self)
    }

    pub fn from_int(value: i64) -> Self {
        Self(i128::from(value) * ONE_RAW)
    }

    pub fn from_u64(value: u64) -> Self {
        Self(i128::from(value) * ONE_RAW)
    }

    /// `value * 10^-prec`, e.g. `with_prec(15, 1) == 1.5`.
    ///
    /// Precision above 18 digits is rounded away.
    pub fn with_prec(value: i64, prec: u32) -> Self {
        if prec <= PRECISION {
            return Self(i128::from(value) * 10i128.pow(PRECISION - prec));
        }
        let rounded = round_div(BigInt::from(value), pow10(prec - PRECISION));
        // |value| / 10^k never exceeds |value|, which always fits.
        Self::from_big(rounded).unwrap_or_default()
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Absolute value, saturating at [`Dec::MAX`].
    pub fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn checked_mul(self, other: Self) -> Option<Self> {
        let product = BigInt::from(self.0) * BigInt::from(other.0);
        Self::from_big(round_div(product, BigInt::from(ONE_RAW)))
    }

    /// Division; `None` when `other` is zero or the quotient overflows.
    pub fn checked_quo(self, other: Self) -> Option<Self> {
        if other.is_zero() {
            return None;
        }
        let scaled = BigInt::from(self.0) * BigInt::from(ONE_RAW);
        Self::from_big(round_div(scaled, BigInt::from(other.0)))
    }

    /// Multiplication by an integer; `None` on overflow.
    pub fn mul_int(self, factor: i64) -> Option<Self> {
        self.0.checked_mul(i128::from(factor)).map(Self)
    }

    /// Division by an integer; `None` when `divisor` is zero.
    pub fn quo_int(self, divisor: i64) -> Option<Self> {
        if divisor == 0 {
            return None;
        }
        Self::from_big(round_div(BigInt::from(self.0), BigInt::from(divisor)))
    }

    /// Arithmetic mean of two values, rounded half to even. Never overflows.
    pub fn midpoint(self, other: Self) -> Self {
        let (a, b) = (self.0, other.0);
        let floor = (a >> 1) + (b >> 1) + (a & b & 1);
        let halfway = (a ^ b) & 1 == 1;
        if halfway && floor & 1 == 1 {
            Self(floor + 1)
        } else {
            Self(floor)
        }
    }

    /// A value from a count of 10^-18 units.
    pub const fn from_raw(raw: i128) -> Self {
        Self(raw)
    }

    /// The value as a count of 10^-18 units.
    pub fn to_raw(&self) -> i128 {
        self.0
    }
}

impl From<u64> for Dec {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl Add for Dec {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        match self.checked_add(rhs) {
            Some(sum) => sum,
            None => panic!("decimal overflow: {self} + {rhs}"),
        }
    }
}

impl Sub for Dec {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        match self.checked_sub(rhs) {
            Some(difference) => difference,
            None => panic!("decimal overflow: {self} - {rhs}"),
        }
    }
}

impl Mul for Dec {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        match self.checked_mul(rhs) {
            Some(product) => product,
            None => panic!("decimal overflow: {self} * {rhs}"),
        }
    }
}

impl Neg for Dec {
    type Output = Self;
    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl FromStr for Dec {
    type Err = OracleError;

    /// Plain decimal notation: optional sign, digits, optional fraction.
    /// Digits past the 18th fractional place are rounded half to even.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| OracleError::Serialization(format!("invalid decimal '{s}': {reason}"));

        let trimmed = s.trim();
        let (negative, unsigned) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("no digits"));
        }
        if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid("unexpected character"));
        }

        let digits = format!("{}{fraction}", if whole.is_empty() { "0" } else { whole });
        let mut value: BigInt = digits
            .parse()
            .map_err(|e| invalid(&format!("{e}")))?;
        if negative {
            value = -value;
        }

        let scale = u32::try_from(fraction.len()).map_err(|_| invalid("too many digits"))?;
        let raw = if scale <= PRECISION {
            value * pow10(PRECISION - scale)
        } else {
            round_div(value, pow10(scale - PRECISION))
        };
        Self::from_big(raw).ok_or_else(|| invalid("out of range"))
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let one = ONE_RAW as u128;
        write!(f, "{sign}{}.{:018}", magnitude / one, magnitude % one)
    }
}

impl fmt::Debug for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dec({self})")
    }
}

impl Serialize for Dec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Dec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DecVisitor;

        impl de::Visitor<'_> for DecVisitor {
            type Value = Dec;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a decimal string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Dec, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(DecVisitor)
    }
}
