//! # Money Module
//!
//! Provides the `Money` type for handling receipt amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats:                                                           │
//! │    6.35 % 0.25 = 0.0999999999999997  ❌ WRONG!                          │
//! │                                                                         │
//! │  Receipt rules ask exact questions:                                     │
//! │    "Is the total a round dollar amount?"                                │
//! │    "Is the total a multiple of 0.25?"                                   │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "6.25" → 625 cents → 625 % 25 == 0 ✅                                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Amounts arrive as decimal strings with exactly two fractional digits
//! (`"6.49"`) and are serialized back the same way.
//!
//! ```rust
//! use receipt_core::money::Money;
//!
//! let price: Money = "6.49".parse().unwrap();
//! assert_eq!(price.cents(), 649);
//! assert_eq!(price.to_string(), "6.49");
//!
//! assert!("6.4".parse::<Money>().is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// Signed so that a parsed `"-1.00"` can be represented and rejected by
/// validation with a precise message instead of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use receipt_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.to_string(), "10.99");
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks whether the amount has no cents, e.g. `10.00`.
    #[inline]
    pub const fn is_round_dollar(&self) -> bool {
        self.cents_part() == 0
    }

    /// Checks whether the amount is an exact multiple of `step_cents`.
    ///
    /// ```rust
    /// use receipt_core::money::Money;
    ///
    /// assert!(Money::from_cents(625).is_multiple_of(25));
    /// assert!(!Money::from_cents(649).is_multiple_of(25));
    /// ```
    #[inline]
    pub const fn is_multiple_of(&self, step_cents: i64) -> bool {
        step_cents != 0 && self.0 % step_cents == 0
    }

    /// Divides by `divisor_cents`, rounding up for positive amounts.
    ///
    /// Used for percentage rules expressed in cents: 20% of a price in
    /// dollars, rounded up, is `ceil(cents / 500)`.
    ///
    /// ```rust
    /// use receipt_core::money::Money;
    ///
    /// // $12.25 × 0.2 = 2.45 → 3
    /// assert_eq!(Money::from_cents(1225).div_ceil(500), 3);
    /// // $12.00 × 0.2 = 2.4 → 3
    /// assert_eq!(Money::from_cents(1200).div_ceil(500), 3);
    /// // $10.00 × 0.2 = 2.0 → 2
    /// assert_eq!(Money::from_cents(1000).div_ceil(500), 2);
    /// ```
    pub fn div_ceil(&self, divisor_cents: i64) -> i64 {
        let quotient = self.0 / divisor_cents;
        if self.0 % divisor_cents > 0 {
            quotient + 1
        } else {
            quotient
        }
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Reasons a decimal amount string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMoneyError {
    #[error("amount is empty")]
    Empty,

    #[error("amount must have exactly two decimal places")]
    DecimalPlaces,

    #[error("amount must contain only digits and a decimal point")]
    InvalidDigit,

    #[error("amount is too large")]
    Overflow,
}

impl FromStr for Money {
    type Err = ParseMoneyError;

    /// Parses `"[-]D+.DD"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseMoneyError::Empty);
        }

        let (negative, unsigned) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (major, minor) = unsigned
            .split_once('.')
            .ok_or(ParseMoneyError::DecimalPlaces)?;

        if minor.len() != 2 {
            return Err(ParseMoneyError::DecimalPlaces);
        }
        if major.is_empty()
            || !major.bytes().all(|b| b.is_ascii_digit())
            || !minor.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(ParseMoneyError::InvalidDigit);
        }

        let major: i64 = major.parse().map_err(|_| ParseMoneyError::Overflow)?;
        let minor: i64 = minor.parse().map_err(|_| ParseMoneyError::InvalidDigit)?;

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or(ParseMoneyError::Overflow)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

impl TryFrom<String> for Money {
    type Error = ParseMoneyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Money> for String {
    fn from(money: Money) -> Self {
        money.to_string()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders the wire format, e.g. `6.49` or `-5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_amounts() {
        assert_eq!("6.49".parse::<Money>().unwrap().cents(), 649);
        assert_eq!("0.25".parse::<Money>().unwrap().cents(), 25);
        assert_eq!("100.00".parse::<Money>().unwrap().cents(), 10000);
        assert_eq!(" 35.35 ".parse::<Money>().unwrap().cents(), 3535);
        assert_eq!("-5.50".parse::<Money>().unwrap().cents(), -550);
    }

    #[test]
    fn test_parse_rejects_wrong_decimal_places() {
        assert_eq!("6".parse::<Money>(), Err(ParseMoneyError::DecimalPlaces));
        assert_eq!("6.4".parse::<Money>(), Err(ParseMoneyError::DecimalPlaces));
        assert_eq!("6.499".parse::<Money>(), Err(ParseMoneyError::DecimalPlaces));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!("".parse::<Money>(), Err(ParseMoneyError::Empty));
        assert_eq!("abc.de".parse::<Money>(), Err(ParseMoneyError::InvalidDigit));
        assert_eq!(".49".parse::<Money>(), Err(ParseMoneyError::InvalidDigit));
        assert_eq!("1,000.00".parse::<Money>(), Err(ParseMoneyError::InvalidDigit));
        assert_eq!("+1.00".parse::<Money>(), Err(ParseMoneyError::InvalidDigit));
        assert_eq!(
            "99999999999999999999.00".parse::<Money>(),
            Err(ParseMoneyError::Overflow)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(649).to_string(), "6.49");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
    }

    #[test]
    fn test_round_dollar_and_quarter() {
        assert!(Money::from_cents(1000).is_round_dollar());
        assert!(!Money::from_cents(649).is_round_dollar());
        assert!(Money::from_cents(1000).is_multiple_of(25));
        assert!(Money::from_cents(625).is_multiple_of(25));
        assert!(!Money::from_cents(635).is_multiple_of(25));
        assert!(!Money::from_cents(100).is_multiple_of(0));
    }

    #[test]
    fn test_serde_uses_decimal_string() {
        let money = Money::from_cents(1225);
        let json = serde_json::to_string(&money).unwrap();
        assert_eq!(json, "\"12.25\"");

        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, money);

        assert!(serde_json::from_str::<Money>("\"12.2\"").is_err());
    }
}
