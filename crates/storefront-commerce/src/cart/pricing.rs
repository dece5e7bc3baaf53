//! Cart pricing calculations.

use crate::ids::LineItemId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Flat-fee shipping that becomes free above a subtotal threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingPolicy {
    /// Subtotals strictly above this ship free.
    pub free_shipping_threshold: Money,
    /// Fee charged otherwise.
    pub flat_fee: Money,
}

impl ShippingPolicy {
    pub fn new(free_shipping_threshold: Money, flat_fee: Money) -> Self {
        Self {
            free_shipping_threshold,
            flat_fee,
        }
    }

    /// Shipping charged on a subtotal. Empty carts ship free.
    pub fn shipping_for(&self, subtotal: &Money) -> Money {
        if subtotal.is_zero() || subtotal.amount_minor > self.free_shipping_threshold.amount_minor {
            Money::zero(subtotal.currency)
        } else {
            Money::new(self.flat_fee.amount_minor, subtotal.currency)
        }
    }

    /// How much more the buyer must spend for free shipping.
    pub fn remaining_for_free_shipping(&self, subtotal: &Money) -> Money {
        let gap = self.free_shipping_threshold.amount_minor - subtotal.amount_minor;
        // strictly above the threshold, so one minor unit more
        Money::new((gap + 1).max(0), subtotal.currency)
    }
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Money::new(500_000, Currency::BDT),
            flat_fee: Money::new(12_000, Currency::BDT),
        }
    }
}

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Shipping cost.
    pub shipping_total: Money,
    /// Final total (subtotal + shipping).
    pub grand_total: Money,
    /// Per-line-item pricing breakdown.
    pub line_items: Vec<LineItemPricing>,
}

impl CartPricing {
    /// Check if the order ships free.
    pub fn has_free_shipping(&self) -> bool {
        self.shipping_total.is_zero()
    }
}

/// Pricing breakdown for a single line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    /// Line item ID.
    pub line_item_id: LineItemId,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: i64,
    /// Total (unit_price * quantity).
    pub total: Money,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bdt(amount: f64) -> Money {
        Money::from_decimal(amount, Currency::BDT).unwrap()
    }

    #[test]
    fn test_shipping_threshold() {
        let policy = ShippingPolicy::default();
        assert_eq!(policy.shipping_for(&bdt(4999.0)), bdt(120.0));
        // the threshold itself still pays shipping
        assert_eq!(policy.shipping_for(&bdt(5000.0)), bdt(120.0));
        assert!(policy.shipping_for(&bdt(5000.01)).is_zero());
        assert!(policy.shipping_for(&bdt(0.0)).is_zero());
    }

    #[test]
    fn test_remaining_for_free_shipping() {
        let policy = ShippingPolicy::default();
        assert_eq!(policy.remaining_for_free_shipping(&bdt(4000.0)).amount_minor, 100_001);
        assert!(policy.remaining_for_free_shipping(&bdt(6000.0)).is_zero());
    }

    #[test]
    fn test_free_shipping_flag() {
        let pricing = CartPricing {
            subtotal: bdt(6000.0),
            shipping_total: Money::zero(Currency::BDT),
            grand_total: bdt(6000.0),
            line_items: vec![],
        };
        assert!(pricing.has_free_shipping());
    }
}
