//! Exact currency arithmetic and unit parsing for siacoin amounts.
//!
//! All amounts are held in hastings, the smallest indivisible unit of the
//! siacoin. One siacoin (SC) is 10^24 hastings. Amount strings may carry an
//! SI-style unit suffix (`pS` through `TS`, or `H` for raw hastings); a bare
//! literal is an integer hastings count. Siafund balances use the same type
//! with a raw count in place of the hastings scaling.

use std::fmt;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Decimal digits between one hasting and one siacoin.
pub const COIN_EXPONENT: u32 = 24;

/// A recognized amount unit: its suffix and power-of-ten exponent relative
/// to one siacoin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    pub suffix: &'static str,
    pub exponent: i32,
}

/// Supported units, smallest to largest. Suffixes are matched exactly
/// (case-sensitive).
pub const UNITS: [Unit; 9] = [
    Unit { suffix: "pS", exponent: -12 },
    Unit { suffix: "nS", exponent: -9 },
    Unit { suffix: "uS", exponent: -6 },
    Unit { suffix: "mS", exponent: -3 },
    Unit { suffix: "SC", exponent: 0 },
    Unit { suffix: "KS", exponent: 3 },
    Unit { suffix: "MS", exponent: 6 },
    Unit { suffix: "GS", exponent: 9 },
    Unit { suffix: "TS", exponent: 12 },
];

/// Errors from parsing an amount string. All variants are recoverable; the
/// caller can re-prompt for input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseCurrencyError {
    #[error("empty amount")]
    Empty,

    #[error("invalid numeric literal: {0:?}")]
    InvalidNumber(String),

    #[error("unrecognized unit suffix: {0:?}")]
    UnknownUnit(String),

    #[error("amount cannot be negative")]
    Negative,

    #[error("hastings are indivisible, fractional amounts need a unit suffix")]
    FractionalHastings,
}

/// An exact, non-negative amount of hastings (or a raw siafund count).
///
/// Backed by an arbitrary-precision unsigned integer, so arithmetic never
/// overflows and no rounding is introduced anywhere. The type cannot go
/// negative; net deltas carry their sign out-of-band (see
/// [`NetAmount`](crate::domain::flow::NetAmount)).
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Currency(BigUint);

impl Currency {
    pub fn zero() -> Self {
        Currency(BigUint::zero())
    }

    /// An exact hastings count.
    pub fn from_hastings(hastings: impl Into<BigUint>) -> Self {
        Currency(hastings.into())
    }

    /// `n` whole siacoins, i.e. `n * 10^24` hastings.
    pub fn siacoins(n: u64) -> Self {
        Currency(BigUint::from(n) * ten_pow(COIN_EXPONENT))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// The underlying hastings count.
    pub fn hastings(&self) -> &BigUint {
        &self.0
    }

    /// `self - other`, or `None` if the result would be negative.
    pub fn checked_sub(&self, other: &Currency) -> Option<Currency> {
        if self.0 < other.0 {
            None
        } else {
            Some(Currency(&self.0 - &other.0))
        }
    }

    /// Raw decimal hastings string, the form the daemon speaks on the wire
    /// and the `Exact: ... H` balance line. Also the display form for
    /// siafund counts.
    pub fn to_hastings_string(&self) -> String {
        self.0.to_str_radix(10)
    }

    /// Decimal siacoin string: the hastings count divided by 10^24, with
    /// trailing zero fraction digits trimmed and no unit suffix. `"0"` for
    /// zero. Re-parses exactly via [`Currency::parse_coins`].
    pub fn to_coins_string(&self) -> String {
        let base = ten_pow(COIN_EXPONENT);
        let int = &self.0 / &base;
        let frac = &self.0 % &base;
        if frac.is_zero() {
            return int.to_str_radix(10);
        }
        let frac_digits = format!("{:0>width$}", frac.to_str_radix(10), width = COIN_EXPONENT as usize);
        format!("{}.{}", int.to_str_radix(10), frac_digits.trim_end_matches('0'))
    }

    /// Parse an amount with an optional unit suffix.
    ///
    /// A bare literal is an integer hastings count; an explicit `H` suffix
    /// means the same. Other recognized suffixes are listed in [`UNITS`] and
    /// scale the (exact decimal) literal accordingly, e.g. `"1.23KS"`.
    /// Digits finer than one hasting truncate.
    pub fn parse_amount(s: &str) -> Result<Currency, ParseCurrencyError> {
        Self::parse_with_default(s, None)
    }

    /// Parse a bare decimal denominated in siacoins, the inverse of
    /// [`Currency::to_coins_string`]. Explicit unit suffixes are still
    /// honored.
    pub fn parse_coins(s: &str) -> Result<Currency, ParseCurrencyError> {
        Self::parse_with_default(s, Some(0))
    }

    /// `default_exponent` is the siacoin-relative exponent assumed for a
    /// suffixless literal; `None` means a suffixless literal is a whole
    /// hastings count.
    fn parse_with_default(
        s: &str,
        default_exponent: Option<i32>,
    ) -> Result<Currency, ParseCurrencyError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseCurrencyError::Empty);
        }
        if s.starts_with('-') {
            return Err(ParseCurrencyError::Negative);
        }

        for unit in &UNITS {
            if let Some(num) = s.strip_suffix(unit.suffix) {
                let scale = (COIN_EXPONENT as i32 + unit.exponent) as u32;
                return parse_scaled_decimal(num, scale).map(Currency);
            }
        }
        if let Some(num) = s.strip_suffix('H') {
            return parse_hastings_literal(num).map(Currency);
        }

        // No recognized suffix. A trailing alphabetic run is an unknown
        // unit; otherwise fall back to the default denomination.
        let trailing: String = s
            .chars()
            .rev()
            .take_while(|c| c.is_ascii_alphabetic())
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        if !trailing.is_empty() {
            return Err(ParseCurrencyError::UnknownUnit(trailing));
        }

        match default_exponent {
            Some(exponent) => {
                let scale = (COIN_EXPONENT as i32 + exponent) as u32;
                parse_scaled_decimal(s, scale).map(Currency)
            }
            None => parse_hastings_literal(s).map(Currency),
        }
    }
}

/// 10^exp as a big integer.
pub(crate) fn ten_pow(exp: u32) -> BigUint {
    num_traits::pow(BigUint::from(10u32), exp as usize)
}

/// Parse `num` as an exact decimal and scale it by 10^scale, truncating any
/// digits finer than the result's unit.
fn parse_scaled_decimal(num: &str, scale: u32) -> Result<BigUint, ParseCurrencyError> {
    let (int_part, frac_part) = match num.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (num, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(ParseCurrencyError::InvalidNumber(num.to_string()));
    }
    if !is_digits(int_part) || !is_digits(frac_part) {
        return Err(ParseCurrencyError::InvalidNumber(num.to_string()));
    }

    let scale = scale as usize;
    let mut digits = String::with_capacity(int_part.len() + scale);
    digits.push_str(int_part);
    if frac_part.len() >= scale {
        digits.push_str(&frac_part[..scale]);
    } else {
        digits.push_str(frac_part);
        for _ in 0..scale - frac_part.len() {
            digits.push('0');
        }
    }

    if digits.is_empty() {
        // e.g. ".1" with scale 0: everything truncated away
        return Ok(BigUint::zero());
    }
    BigUint::parse_bytes(digits.as_bytes(), 10)
        .ok_or_else(|| ParseCurrencyError::InvalidNumber(num.to_string()))
}

/// Parse a whole hastings count. Hastings are indivisible, so a decimal
/// point is rejected rather than scaled.
fn parse_hastings_literal(num: &str) -> Result<BigUint, ParseCurrencyError> {
    if num.is_empty() {
        return Err(ParseCurrencyError::InvalidNumber(num.to_string()));
    }
    if is_digits(num) {
        return BigUint::parse_bytes(num.as_bytes(), 10)
            .ok_or_else(|| ParseCurrencyError::InvalidNumber(num.to_string()));
    }
    match num.split_once('.') {
        Some((int_part, frac_part)) if is_digits(int_part) && is_digits(frac_part) => {
            Err(ParseCurrencyError::FractionalHastings)
        }
        _ => Err(ParseCurrencyError::InvalidNumber(num.to_string())),
    }
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_coins_string())
    }
}

impl FromStr for Currency {
    type Err = ParseCurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::parse_amount(s)
    }
}

impl Add for Currency {
    type Output = Currency;

    fn add(self, rhs: Currency) -> Currency {
        Currency(self.0 + rhs.0)
    }
}

impl AddAssign<Currency> for Currency {
    fn add_assign(&mut self, rhs: Currency) {
        self.0 += rhs.0;
    }
}

impl AddAssign<&Currency> for Currency {
    fn add_assign(&mut self, rhs: &Currency) {
        self.0 += &rhs.0;
    }
}

impl Sub for Currency {
    type Output = Currency;

    /// # Panics
    ///
    /// Panics if `rhs > self`. A currency value cannot go negative;
    /// compare with [`Ord::cmp`] or use [`Currency::checked_sub`] first.
    fn sub(self, rhs: Currency) -> Currency {
        match self.checked_sub(&rhs) {
            Some(diff) => diff,
            None => panic!(
                "currency underflow: cannot subtract {} H from {} H",
                rhs.to_hastings_string(),
                self.to_hastings_string()
            ),
        }
    }
}

impl Sub for &Currency {
    type Output = Currency;

    /// # Panics
    ///
    /// Panics if `rhs > self`, like the owned implementation.
    fn sub(self, rhs: &Currency) -> Currency {
        match self.checked_sub(rhs) {
            Some(diff) => diff,
            None => panic!(
                "currency underflow: cannot subtract {} H from {} H",
                rhs.to_hastings_string(),
                self.to_hastings_string()
            ),
        }
    }
}

// The daemon speaks currency values as decimal strings, so that is the
// serde representation.
impl Serialize for Currency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hastings_string())
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        BigUint::parse_bytes(s.as_bytes(), 10)
            .map(Currency)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid currency value {s:?}")))
    }
}
