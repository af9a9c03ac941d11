// 💰 Money - two-decimal amounts, locale independent

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Fractional digits every summary figure carries
pub const SCALE: u32 = 2;

/// Display-ready amount, always normalised to exactly two fractional digits.
///
/// Normalisation rounds half away from zero and never produces a negative zero,
/// so `Display` and `Serialize` always give strings like `"-100.00"` or `"0.00"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::from_parts(0, 0, 0, false, SCALE));

    /// Normalise to two digits, `None` when the value is too large to carry them
    pub fn new(value: Decimal) -> Option<Self> {
        let mut rounded = value.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero);
        if rounded.is_zero() {
            rounded = Decimal::ZERO;
        }
        // rescale keeps the highest scale that fits instead of failing
        rounded.rescale(SCALE);
        (rounded.scale() == SCALE).then_some(Amount(rounded))
    }

    /// Add an unrounded raw figure and renormalise, `None` on overflow
    pub fn checked_add_raw(self, raw: Decimal) -> Option<Self> {
        self.0.checked_add(raw).and_then(Amount::new)
    }

    /// `None` on overflow
    pub fn checked_sub(self, rhs: Amount) -> Option<Self> {
        self.0.checked_sub(rhs.0).and_then(Amount::new)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl Default for Amount {
    fn default() -> Self {
        Amount::ZERO
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = Decimal;

    fn try_from(value: Decimal) -> Result<Self, Decimal> {
        Amount::new(value).ok_or(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse a base-10 decimal the way the brokerage writes it.
///
/// Accepts an optional sign, a period decimal separator and scientific
/// notation; surrounding whitespace is ignored. Returns `None` for anything
/// else, including comma decimal separators and `_` digit grouping.
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() || text.contains('_') {
        return None;
    }

    Decimal::from_str(text)
        .ok()
        .or_else(|| Decimal::from_scientific(text).ok())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn amount(value: Decimal) -> Amount {
        Amount::new(value).unwrap()
    }

    #[test]
    fn test_amount_always_two_digits() {
        assert_eq!(amount(dec!(100)).to_string(), "100.00");
        assert_eq!(amount(dec!(0.5)).to_string(), "0.50");
        assert_eq!(amount(dec!(-100)).to_string(), "-100.00");
        assert_eq!(Amount::ZERO.to_string(), "0.00");
        assert_eq!(Amount::default().to_string(), "0.00");
        assert_eq!(amount(Decimal::ZERO).to_string(), "0.00");
    }

    #[test]
    fn test_amount_rounds_half_away_from_zero() {
        assert_eq!(amount(dec!(2.345)).to_string(), "2.35");
        assert_eq!(amount(dec!(-2.345)).to_string(), "-2.35");
        assert_eq!(amount(dec!(2.344)).to_string(), "2.34");
    }

    #[test]
    fn test_amount_never_negative_zero() {
        assert_eq!(amount(dec!(-0.001)).to_string(), "0.00");
        assert_eq!(
            amount(dec!(5)).checked_sub(amount(dec!(5))).unwrap().to_string(),
            "0.00"
        );
    }

    #[test]
    fn test_checked_add_raw_renormalises() {
        let total = amount(dec!(10))
            .checked_add_raw(dec!(0.125))
            .and_then(|t| t.checked_add_raw(dec!(1)))
            .unwrap();
        assert_eq!(total.to_string(), "11.13");
    }

    #[test]
    fn test_amount_too_large_for_two_digits() {
        assert_eq!(Amount::new(Decimal::MAX), None);
        assert!(Amount::try_from(Decimal::MAX).is_err());

        let largest = amount(dec!(792281625142643375935439503.35));
        assert_eq!(largest.to_string(), "792281625142643375935439503.35");
        assert_eq!(largest.checked_add_raw(dec!(1)), None);
        assert_eq!(largest.checked_add_raw(Decimal::MAX), None, "Raw overflow is not a panic");
        assert_eq!(
            amount(-dec!(792281625142643375935439503.35)).checked_sub(largest),
            None
        );
    }

    #[test]
    fn test_amount_serializes_as_string() {
        let json = serde_json::to_string(&amount(dec!(-12.3))).unwrap();
        assert_eq!(json, "\"-12.30\"");
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("100"), Some(dec!(100)));
        assert_eq!(parse_decimal(" -12.75 "), Some(dec!(-12.75)));
        assert_eq!(parse_decimal("1e3"), Some(dec!(1000)));
        assert_eq!(parse_decimal("12,5"), None);
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal(""), None);
    }

    #[test]
    fn test_parse_decimal_rejects_digit_grouping() {
        assert_eq!(parse_decimal("1_000"), None);
        assert_eq!(parse_decimal("1_0e2"), None);
    }
}
