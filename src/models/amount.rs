//! Amount type for ledger entries
//!
//! Stores an exact decimal so that sums do not depend on the order entries
//! are added in. Amounts are signed: negative values are corrections and
//! refunds and are always valid.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// Currency symbol used when no settings are at hand
pub const DEFAULT_CURRENCY_SYMBOL: &str = "¥";

/// Marker printed in front of negative amounts
pub const DEFAULT_NEGATIVE_MARKER: &str = "△";

/// Largest magnitude an amount may have, in whole currency units
///
/// Sums over any realistic number of entries stay far inside the range of
/// `Decimal`, so ledger arithmetic cannot overflow.
pub const MAX_AMOUNT_UNITS: i64 = 1_000_000_000_000_000;

/// A signed monetary amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// Create a zero amount
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Wrap an existing decimal
    pub const fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    /// Create an amount from a whole number of currency units
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// Get the underlying decimal
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Check if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Get the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Parse an amount from raw input text
    ///
    /// Accepts plain decimals ("1200", "-500", "10.5", "+3") and scientific
    /// notation ("1e3"). Empty text, anything non-numeric, and non-finite
    /// values are rejected.
    pub fn parse(s: &str) -> Result<Self, AmountParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AmountParseError::Empty);
        }

        // rust_decimal tolerates digit separators; numeric input does not
        if trimmed.contains('_') {
            return Err(AmountParseError::NotNumeric(trimmed.to_string()));
        }

        let value = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| AmountParseError::NotNumeric(trimmed.to_string()))?;
        Self::within_range(value)
    }

    /// Accept a decimal only if its magnitude is at most [`MAX_AMOUNT_UNITS`]
    pub fn within_range(value: Decimal) -> Result<Self, AmountParseError> {
        if value.abs() > Decimal::from(MAX_AMOUNT_UNITS) {
            return Err(AmountParseError::OutOfRange(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Format with a currency symbol and negative marker
    ///
    /// Negative amounts are shown as the marker followed by the absolute
    /// value, e.g. `△¥500`. The integer part is grouped by thousands and
    /// fractional digits appear only when non-zero.
    pub fn format_with_symbol(&self, symbol: &str, negative_marker: &str) -> String {
        let magnitude = self.0.abs().normalize().to_string();
        let (int_part, frac_part) = match magnitude.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (magnitude.as_str(), None),
        };

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if self.is_negative() { negative_marker } else { "" };
        match frac_part {
            Some(frac) => format!("{}{}{}.{}", sign, symbol, grouped, frac),
            None => format!("{}{}{}", sign, symbol, grouped),
        }
    }

    /// Plain numeric text without grouping or currency, for CSV output
    pub fn to_plain_string(&self) -> String {
        self.0.normalize().to_string()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol(DEFAULT_CURRENCY_SYMBOL, DEFAULT_NEGATIVE_MARKER))
    }
}

impl FromStr for Amount {
    type Err = AmountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, a| acc + a)
    }
}

impl<'a> std::iter::Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, a| acc + *a)
    }
}

// Persisted records carry amounts as JSON numbers: whole values are written
// as integers, anything else as a float.
impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.fract().is_zero() {
            if let Some(whole) = self.0.to_i64() {
                return serializer.serialize_i64(whole);
            }
        }
        match self.0.to_f64() {
            Some(value) => serializer.serialize_f64(value),
            None => Err(serde::ser::Error::custom(format!(
                "amount {} cannot be represented as a number",
                self.0
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a finite number")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        Amount::within_range(Decimal::from(v)).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        Amount::within_range(Decimal::from(v)).map_err(E::custom)
    }

    // Decode from the shortest text that round-trips the float, so a stored
    // 0.30000000000000004 is written back unchanged.
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
        if !v.is_finite() {
            return Err(E::custom(format!("amount {} is not a finite number", v)));
        }
        let value = Decimal::from_str(&v.to_string())
            .ok()
            .or_else(|| Decimal::from_f64_retain(v))
            .ok_or_else(|| E::custom(AmountParseError::OutOfRange(v.to_string())))?;
        Amount::within_range(value).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        Amount::parse(v).map_err(E::custom)
    }
}

/// Error type for amount parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountParseError {
    Empty,
    NotNumeric(String),
    OutOfRange(String),
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountParseError::Empty => write!(f, "Amount is empty"),
            AmountParseError::NotNumeric(s) => write!(f, "Amount is not a number: {}", s),
            AmountParseError::OutOfRange(s) => {
                write!(f, "Amount {} exceeds {} in magnitude", s, MAX_AMOUNT_UNITS)
            }
        }
    }
}

impl std::error::Error for AmountParseError {}
