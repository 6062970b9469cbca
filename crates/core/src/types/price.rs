//! Non-negative price in Brazilian reais, using decimal arithmetic.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Optional sign, digits with at most one dot, optional exponent. No digit
/// separators, no hex, no units.
static NUMBER_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?$").expect("Invalid regex")
});

/// Parse a plain or scientific decimal, rejecting anything not shaped like
/// [`NUMBER_SHAPE`] (`rust_decimal` on its own also accepts `1_000`).
pub(crate) fn parse_number(input: &str) -> Option<Decimal> {
    if !NUMBER_SHAPE.is_match(input) {
        return None;
    }
    Decimal::from_str(input)
        .or_else(|_| Decimal::from_scientific(input))
        .ok()
}

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// Nothing left after trimming.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("price is not a number: {0:?}")]
    NotANumber(String),
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
}

/// A non-negative price.
///
/// Form input may use either `.` or `,` as decimal separator (`12.90` and
/// `12,90` are the same price). Equality is numeric, so `12.90 == 12.9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Currency prefix used when displaying prices.
    pub const CURRENCY_SYMBOL: &'static str = "R$";

    /// Create a price from an amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount < Decimal::ZERO {
            return Err(PriceError::Negative);
        }
        // Collapse "-0" so it never displays with a sign.
        if amount.is_zero() {
            return Ok(Self(Decimal::ZERO));
        }
        Ok(Self(amount))
    }

    /// Parse a price as typed into the form.
    ///
    /// The first `,` is read as a decimal point and surrounding whitespace is
    /// ignored. Plain (`12.90`) and scientific (`1.29e1`) notation are both
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is blank, not a number, or negative.
    pub fn parse(raw: &str) -> Result<Self, PriceError> {
        let normalized = raw.replacen(',', ".", 1);
        let normalized = normalized.trim();
        if normalized.is_empty() {
            return Err(PriceError::Empty);
        }

        let amount = parse_number(normalized)
            .ok_or_else(|| PriceError::NotANumber(normalized.to_string()))?;

        Self::new(amount)
    }

    /// The numeric amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl std::fmt::Display for Price {
    /// Formats as `R$ 12.90`: always two decimal places, dot separator.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "{} {rounded:.2}", Self::CURRENCY_SYMBOL)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_dot_and_comma_separators() {
        assert_eq!(Price::parse("12.90").unwrap().amount(), dec("12.9"));
        assert_eq!(Price::parse("12,90").unwrap().amount(), dec("12.9"));
        assert_eq!(Price::parse("  7,5 ").unwrap().amount(), dec("7.5"));
        assert_eq!(Price::parse("0").unwrap().amount(), Decimal::ZERO);
    }

    #[test]
    fn test_parse_scientific_notation() {
        assert_eq!(Price::parse("1.29e1").unwrap().amount(), dec("12.9"));
    }

    #[test]
    fn test_parse_only_first_comma_is_a_separator() {
        assert!(matches!(
            Price::parse("1,234,50"),
            Err(PriceError::NotANumber(_))
        ));
    }

    #[test]
    fn test_parse_rejects_digit_separators() {
        for input in ["1_000", "1_0,5", "_1", "1_"] {
            assert!(
                matches!(Price::parse(input), Err(PriceError::NotANumber(_))),
                "{input:?}"
            );
        }
    }

    #[test]
    fn test_parse_number_shapes() {
        assert_eq!(parse_number("12.5"), Some(dec("12.5")));
        assert_eq!(parse_number("2e2"), Some(dec("200")));
        assert_eq!(parse_number("0x10"), None);
        assert_eq!(parse_number("1e"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Price::parse(""), Err(PriceError::Empty));
        assert_eq!(Price::parse("   "), Err(PriceError::Empty));
    }

    #[test]
    fn test_parse_not_a_number() {
        assert!(matches!(Price::parse("abc"), Err(PriceError::NotANumber(_))));
        assert!(matches!(Price::parse("12.90 reais"), Err(PriceError::NotANumber(_))));
    }

    #[test]
    fn test_parse_negative() {
        assert_eq!(Price::parse("-1"), Err(PriceError::Negative));
        assert_eq!(Price::parse("-0,01"), Err(PriceError::Negative));
    }

    #[test]
    fn test_negative_zero_is_zero() {
        let price = Price::parse("-0").unwrap();
        assert_eq!(price.to_string(), "R$ 0.00");
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Price::parse("12,9").unwrap().to_string(), "R$ 12.90");
        assert_eq!(Price::parse("3").unwrap().to_string(), "R$ 3.00");
        assert_eq!(Price::parse("0.125").unwrap().to_string(), "R$ 0.13");
    }
}
