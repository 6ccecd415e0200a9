//! Exact monetary amounts
//!
//! Amounts are held as an integer number of cents so that deed prices in the
//! billions compare exactly. Floating point only appears when a rate is applied.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountParseError {
    #[error("empty amount")]
    Empty,

    #[error("invalid character '{0}' in amount")]
    InvalidCharacter(char),

    #[error("more than two decimal places in '{0}'")]
    TooManyDecimals(String),

    #[error("amount '{0}' is too large")]
    Overflow(String),
}

/// A non-negative dollar amount with cent precision
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount {
    cents: u64,
}

impl Amount {
    pub const ZERO: Amount = Amount { cents: 0 };

    pub const fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    /// Whole dollars, `None` if the cent count would overflow
    pub fn from_dollars(dollars: u64) -> Option<Self> {
        dollars.checked_mul(100).map(Self::from_cents)
    }

    pub const fn cents(self) -> u64 {
        self.cents
    }

    pub const fn whole_dollars(self) -> u64 {
        self.cents / 100
    }

    pub const fn fractional_cents(self) -> u64 {
        self.cents % 100
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.cents.checked_add(other.cents).map(Self::from_cents)
    }

    pub const fn abs_diff(self, other: Amount) -> Amount {
        Self::from_cents(self.cents.abs_diff(other.cents))
    }

    /// `|self - other| / self`
    ///
    /// A zero base yields 0.0 when both are zero and infinity otherwise, so any
    /// finite tolerance rejects a non-zero amount compared against zero.
    pub fn relative_difference(self, other: Amount) -> f64 {
        let diff = self.cents.abs_diff(other.cents);
        if diff == 0 {
            0.0
        } else if self.cents == 0 {
            f64::INFINITY
        } else {
            diff as f64 / self.cents as f64
        }
    }

    /// Multiply by a rate, rounding half-up to the nearest cent
    pub fn scale(self, rate: f64) -> Option<Amount> {
        if !rate.is_finite() || rate < 0.0 {
            return None;
        }
        let scaled = (self.cents as f64 * rate).round();
        if scaled.is_finite() && scaled <= u64::MAX as f64 {
            Some(Self::from_cents(scaled as u64))
        } else {
            None
        }
    }

    /// Plain decimal form without separators, e.g. `1250000.00`
    pub fn to_decimal_string(self) -> String {
        format!("{}.{:02}", self.whole_dollars(), self.fractional_cents())
    }
}

impl fmt::Display for Amount {
    /// Currency form with thousands separators, e.g. `$1,250,000.00`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.whole_dollars().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        write!(f, "${}.{:02}", grouped, self.fractional_cents())
    }
}

impl FromStr for Amount {
    type Err = AmountParseError;

    /// Parses a bare decimal (`1250000`, `1250000.5`, `1250000.00`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AmountParseError::Empty);
        }

        let (whole, fraction) = match s.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (s, ""),
        };

        if let Some(bad) = whole
            .chars()
            .chain(fraction.chars())
            .find(|c| !c.is_ascii_digit())
        {
            return Err(AmountParseError::InvalidCharacter(bad));
        }
        if whole.is_empty() && fraction.is_empty() {
            return Err(AmountParseError::Empty);
        }
        if fraction.len() > 2 {
            return Err(AmountParseError::TooManyDecimals(s.to_string()));
        }

        let overflow = || AmountParseError::Overflow(s.to_string());
        let dollars: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| overflow())?
        };
        let cents: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| overflow())? * 10,
            _ => fraction.parse().map_err(|_| overflow())?,
        };

        dollars
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .map(Self::from_cents)
            .ok_or_else(overflow)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_decimal_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Amount::from_cents(125_000_000).to_string(), "$1,250,000.00");
        assert_eq!(Amount::from_cents(5_000_000).to_string(), "$50,000.00");
        assert_eq!(Amount::from_cents(99_950).to_string(), "$999.50");
        assert_eq!(Amount::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_parse_decimal_forms() {
        assert_eq!("1250000.00".parse(), Ok(Amount::from_cents(125_000_000)));
        assert_eq!("1250000".parse(), Ok(Amount::from_cents(125_000_000)));
        assert_eq!("12.5".parse(), Ok(Amount::from_cents(1_250)));
        assert_eq!(".75".parse(), Ok(Amount::from_cents(75)));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!("".parse::<Amount>(), Err(AmountParseError::Empty));
        assert_eq!(".".parse::<Amount>(), Err(AmountParseError::Empty));
        assert_eq!(
            "-5".parse::<Amount>(),
            Err(AmountParseError::InvalidCharacter('-'))
        );
        assert!(matches!(
            "1.005".parse::<Amount>(),
            Err(AmountParseError::TooManyDecimals(_))
        ));
        assert!(matches!(
            "99999999999999999999".parse::<Amount>(),
            Err(AmountParseError::Overflow(_))
        ));
    }

    #[test]
    fn test_relative_difference() {
        let numeric = Amount::from_cents(125_000_000);
        let written = Amount::from_cents(120_000_000);
        assert_eq!(numeric.abs_diff(written), Amount::from_cents(5_000_000));
        assert!((numeric.relative_difference(written) - 0.04).abs() < 1e-12);
        assert_eq!(Amount::ZERO.relative_difference(Amount::ZERO), 0.0);
        assert!(Amount::ZERO.relative_difference(written).is_infinite());
    }

    #[test]
    fn test_scale_rounds_half_up() {
        let price = Amount::from_cents(50_000_000);
        assert_eq!(price.scale(0.011), Some(Amount::from_cents(550_000)));
        assert_eq!(Amount::from_cents(5).scale(0.5), Some(Amount::from_cents(3)));
        assert_eq!(price.scale(f64::NAN), None);
        assert_eq!(price.scale(-0.1), None);
    }

    #[test]
    fn test_serializes_as_exact_decimal_string() {
        let json = serde_json::to_string(&Amount::from_cents(120_000_000)).unwrap();
        assert_eq!(json, "\"1200000.00\"");
        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Amount::from_cents(120_000_000));
    }
}
