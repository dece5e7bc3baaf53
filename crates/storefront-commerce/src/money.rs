//! Money type for representing monetary values.
//!
//! Uses integer minor units so that cart totals never accumulate
//! floating-point drift. Catalog prices arrive as plain JSON numbers in
//! major units and are converted with [`Money::from_decimal`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    BDT,
    USD,
    EUR,
    GBP,
    INR,
}

impl Currency {
    /// Get the currency code (e.g., "BDT").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::BDT => "BDT",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::INR => "INR",
        }
    }

    /// Get the currency symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::BDT => "\u{09f3}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::INR => "\u{20b9}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "BDT" => Some(Currency::BDT),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "INR" => Some(Currency::INR),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (e.g., poisha for BDT).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a Money value from a decimal amount in major units.
    ///
    /// Returns `None` for non-finite input or an amount whose minor units
    /// do not fit in an `i64`.
    ///
    /// ```
    /// use storefront_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(1249.5, Currency::BDT).unwrap();
    /// assert_eq!(price.amount_minor, 124950);
    /// assert!(Money::from_decimal(1e30, Currency::BDT).is_none());
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Option<Self> {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let scaled = (amount * multiplier as f64).round();
        // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
        if !scaled.is_finite() || scaled < i64::MIN as f64 || scaled >= i64::MAX as f64 {
            return None;
        }
        Some(Self::new(scaled as i64, currency))
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount_minor > 0
    }

    /// Convert to a decimal value in major units.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_minor as f64 / divisor as f64
    }

    /// Format as a display string (e.g., "৳1000.00").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "1000.00").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        format!("{:.places$}", self.to_decimal())
    }

    /// Add another Money value, returning None on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_minor
            .checked_add(other.amount_minor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Subtract another Money value, returning None on currency mismatch or overflow.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_minor
            .checked_sub(other.amount_minor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply by a scalar, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_minor
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Sum an iterator of Money values, returning None on mismatch or overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::USD).unwrap();
        assert_eq!(m.amount_minor, 4999);

        let m = Money::from_decimal(-5.0, Currency::BDT).unwrap();
        assert_eq!(m.amount_minor, -500);

        assert!(Money::from_decimal(f64::NAN, Currency::BDT).is_none());
        assert!(Money::from_decimal(f64::INFINITY, Currency::BDT).is_none());
    }

    #[test]
    fn test_money_from_decimal_out_of_range() {
        assert!(Money::from_decimal(1e30, Currency::BDT).is_none());
        assert!(Money::from_decimal(-1e30, Currency::BDT).is_none());
        // 1e19 minor units is past i64::MAX
        assert!(Money::from_decimal(1e17, Currency::BDT).is_none());
        assert!(Money::from_decimal(9.0e16, Currency::BDT).is_some());
    }

    #[test]
    fn test_money_to_decimal() {
        let m = Money::new(4999, Currency::USD);
        assert!((m.to_decimal() - 49.99).abs() < 0.001);
    }

    #[test]
    fn test_money_display() {
        let m = Money::new(12000, Currency::BDT);
        assert_eq!(m.display(), "\u{09f3}120.00");
        assert_eq!(m.display_amount(), "120.00");
    }

    #[test]
    fn test_money_checked_arithmetic() {
        let a = Money::new(1000, Currency::BDT);
        let b = Money::new(500, Currency::BDT);
        assert_eq!(a.try_add(&b).unwrap().amount_minor, 1500);
        assert_eq!(a.try_subtract(&b).unwrap().amount_minor, 500);
        assert_eq!(a.try_multiply(3).unwrap().amount_minor, 3000);
        assert!(Money::new(i64::MAX, Currency::BDT).try_multiply(2).is_none());
    }

    #[test]
    fn test_money_currency_mismatch() {
        let bdt = Money::new(1000, Currency::BDT);
        let usd = Money::new(1000, Currency::USD);
        assert!(bdt.try_add(&usd).is_none());
    }

    #[test]
    fn test_money_sum() {
        let values = [Money::new(100, Currency::BDT), Money::new(250, Currency::BDT)];
        let total = Money::try_sum(values.iter(), Currency::BDT).unwrap();
        assert_eq!(total.amount_minor, 350);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("bdt"), Some(Currency::BDT));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
