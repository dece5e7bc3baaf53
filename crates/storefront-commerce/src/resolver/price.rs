//! Price and stock for a resolved variant.

use crate::catalog::Product;
use crate::resolver::select::{PriceType, VariantState};
use serde::{Deserialize, Serialize};

/// Care+ add-on rate applied to the selected unit price.
pub const DEFAULT_CARE_PLUS_RATE: f64 = 0.08;

/// Prices and stock of the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResolution {
    pub regular_price: f64,
    pub discount_price: f64,
    pub has_discount: bool,
    /// Whole percent saved, zero without a discount.
    pub discount_percent: u32,
    pub stock: f64,
    pub in_stock: bool,
}

impl PriceResolution {
    /// Build a resolution from raw figures, deriving the discount and stock flags.
    pub fn from_parts(regular_price: f64, discount_price: f64, stock: f64) -> Self {
        let has_discount =
            regular_price > 0.0 && discount_price > 0.0 && discount_price < regular_price;
        let discount_percent = if has_discount {
            (((regular_price - discount_price) / regular_price) * 100.0).round() as u32
        } else {
            0
        };

        Self {
            regular_price,
            discount_price,
            has_discount,
            discount_percent,
            stock,
            in_stock: stock > 0.0,
        }
    }

    /// Unit price shown to the buyer for the given price mode.
    pub fn effective_price(&self, price_type: PriceType) -> f64 {
        match price_type {
            PriceType::Regular => self.regular_price,
            PriceType::Offer if self.discount_price > 0.0 => self.discount_price,
            PriceType::Offer => self.regular_price,
        }
    }
}

/// Price the resolved variant.
///
/// Storage price block first, then the color's own fields, then the bare
/// product. Missing figures count as zero.
pub fn resolve_price(product: &Product, state: &VariantState<'_>) -> PriceResolution {
    if let Some((storage, price)) = state
        .storage
        .and_then(|s| s.price.as_ref().map(|p| (s, p)))
    {
        return PriceResolution::from_parts(
            price.regular_price.unwrap_or(0.0),
            price.discount_price.unwrap_or(0.0),
            price.stock_quantity.or(storage.stock).unwrap_or(0.0),
        );
    }

    if let Some(color) = state.color {
        return PriceResolution::from_parts(
            color.regular_price.unwrap_or(0.0),
            color.discount_price.unwrap_or(0.0),
            color.stock_quantity.unwrap_or(0.0),
        );
    }

    PriceResolution::from_parts(
        product.price.unwrap_or(0.0),
        product.compare_price.unwrap_or(0.0),
        product.stock_quantity.unwrap_or(0.0),
    )
}

/// Care+ add-on price for a unit price, rounded to a whole amount.
pub fn care_plus_price(unit_price: f64, rate: f64) -> f64 {
    (unit_price * rate).round()
}
