//! Storefront settings.

use crate::cart::ShippingPolicy;
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use crate::resolver::{PriceType, DEFAULT_CARE_PLUS_RATE};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default lifetime of cached catalog responses.
pub const DEFAULT_CACHE_TTL_MS: u64 = 300_000;

/// Storefront configuration. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Currency prices are quoted in.
    pub currency: Currency,
    /// Lifetime of cached catalog responses, in milliseconds.
    pub cache_ttl_ms: u64,
    pub shipping: ShippingConfig,
    /// Care+ price as a fraction of the unit price.
    pub care_plus_rate: f64,
    /// Price mode a fresh selection starts in.
    pub default_price_type: PriceType,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            currency: Currency::BDT,
            cache_ttl_ms: DEFAULT_CACHE_TTL_MS,
            shipping: ShippingConfig::default(),
            care_plus_rate: DEFAULT_CARE_PLUS_RATE,
            default_price_type: PriceType::Offer,
        }
    }
}

impl StorefrontConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }

    /// Shipping rules in the configured currency.
    ///
    /// Fails when an amount is not representable as money.
    pub fn shipping_policy(&self) -> Result<ShippingPolicy, CommerceError> {
        let money = |name: &str, amount: f64| {
            Money::from_decimal(amount, self.currency).ok_or_else(|| {
                CommerceError::ValidationError(format!("{} is out of range: {}", name, amount))
            })
        };
        Ok(ShippingPolicy::new(
            money("shipping.free_shipping_threshold", self.shipping.free_shipping_threshold)?,
            money("shipping.flat_fee", self.shipping.flat_fee)?,
        ))
    }

    /// Reject negative, non-finite or out of range amounts and rates.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let amounts = [
            ("shipping.free_shipping_threshold", self.shipping.free_shipping_threshold),
            ("shipping.flat_fee", self.shipping.flat_fee),
            ("care_plus_rate", self.care_plus_rate),
        ];
        for (name, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(CommerceError::ValidationError(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        self.shipping_policy().map(|_| ())
    }
}

/// Shipping amounts in major units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingConfig {
    /// Subtotals strictly above this ship free.
    pub free_shipping_threshold: f64,
    pub flat_fee: f64,
}

impl Default for ShippingConfig {
    fn default() -> Self {
        Self {
            free_shipping_threshold: 5000.0,
            flat_fee: 120.0,
        }
    }
}
