//! Cart and line item types.

use crate::cart::{CartPricing, LineItemPricing, ShippingPolicy};
use crate::error::CommerceError;
use crate::ids::{LineItemId, ProductId};
use crate::money::{Currency, Money};
use crate::resolver::{CartOptions, Resolution};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// A shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Items in the cart.
    pub items: Vec<LineItem>,
    /// Cart currency.
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Create an empty cart in the given currency.
    pub fn new(currency: Currency) -> Self {
        let now = Utc::now();
        Self {
            items: Vec::new(),
            currency,
            created_at: now,
            updated_at: now,
        }
    }

    /// Add an item to the cart.
    ///
    /// A line with the same product and options accumulates quantity.
    ///
    /// Returns an error if:
    /// - Quantity is not positive
    /// - Adding would exceed MAX_QUANTITY_PER_ITEM
    /// - The unit price is negative
    /// - The price is in another currency
    /// - Arithmetic overflow would occur
    ///
    /// A failed call leaves the cart unchanged.
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        product_name: impl Into<String>,
        quantity: i64,
        unit_price: Money,
        options: CartOptions,
    ) -> Result<LineItemId, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        if unit_price.amount_minor < 0 {
            return Err(CommerceError::ValidationError(format!(
                "Unit price must not be negative: {}",
                unit_price.display()
            )));
        }

        if unit_price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: unit_price.currency.code().to_string(),
            });
        }

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.product_id == product_id && i.options == options)
        {
            let new_quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;

            if new_quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CommerceError::QuantityExceedsLimit(
                    new_quantity,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }

            let total_price = existing
                .unit_price
                .try_multiply(new_quantity)
                .ok_or(CommerceError::Overflow)?;

            existing.quantity = new_quantity;
            existing.total_price = total_price;
            self.updated_at = Utc::now();
            return Ok(existing.id.clone());
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        let item = LineItem::new(product_id, product_name, quantity, unit_price, options)?;
        let id = item.id.clone();
        self.items.push(item);
        self.updated_at = Utc::now();
        Ok(id)
    }

    /// Add the variant a resolution settled on, at its selected unit price.
    ///
    /// Fails with [`CommerceError::OutOfStock`] if the variant has no stock.
    pub fn add_resolution(
        &mut self,
        resolution: &Resolution,
        quantity: i64,
    ) -> Result<LineItemId, CommerceError> {
        let options = resolution.cart_options()?;
        let unit_price = Money::from_decimal(resolution.unit_price, self.currency)
            .ok_or(CommerceError::Overflow)?;
        let id = self.add_item(
            resolution.product_id.clone(),
            resolution.product_name.clone(),
            quantity,
            unit_price,
            options,
        )?;

        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            if item.image.is_none() {
                item.image = resolution.color_image.clone();
            }
        }
        Ok(id)
    }

    /// Update item quantity.
    ///
    /// If quantity is <= 0, removes the item.
    /// Returns error if quantity exceeds limit or would cause overflow.
    pub fn update_quantity(
        &mut self,
        line_item_id: &LineItemId,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return Ok(self.remove_item(line_item_id));
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        if let Some(item) = self.items.iter_mut().find(|i| &i.id == line_item_id) {
            let total_price = item
                .unit_price
                .try_multiply(quantity)
                .ok_or(CommerceError::Overflow)?;

            item.quantity = quantity;
            item.total_price = total_price;
            self.updated_at = Utc::now();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Decrease quantity by one, never below one.
    ///
    /// Returns false if the item is missing or already at one.
    pub fn decrement(&mut self, line_item_id: &LineItemId) -> Result<bool, CommerceError> {
        match self.get_item(line_item_id).map(|i| i.quantity) {
            Some(quantity) if quantity > 1 => self.update_quantity(line_item_id, quantity - 1),
            _ => Ok(false),
        }
    }

    /// Remove an item from the cart.
    pub fn remove_item(&mut self, line_item_id: &LineItemId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != line_item_id);
        let removed = self.items.len() < len_before;
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.updated_at = Utc::now();
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Get number of unique items.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by ID.
    pub fn get_item(&self, line_item_id: &LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == line_item_id)
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        Money::try_sum(self.items.iter().map(|i| &i.total_price), self.currency)
            .ok_or(CommerceError::Overflow)
    }

    /// Calculate cart pricing with shipping.
    ///
    /// Returns error if arithmetic overflow occurs.
    pub fn calculate_pricing(&self, shipping: &ShippingPolicy) -> Result<CartPricing, CommerceError> {
        let line_items: Vec<LineItemPricing> = self
            .items
            .iter()
            .map(|item| LineItemPricing {
                line_item_id: item.id.clone(),
                unit_price: item.unit_price,
                quantity: item.quantity,
                total: item.total_price,
            })
            .collect();

        let subtotal = self.subtotal()?;
        let shipping_total = shipping.shipping_for(&subtotal);
        let grand_total = subtotal
            .try_add(&shipping_total)
            .ok_or(CommerceError::Overflow)?;

        Ok(CartPricing {
            subtotal,
            shipping_total,
            grand_total,
            line_items,
        })
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Unique line item identifier.
    pub id: LineItemId,
    /// Product ID.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub product_name: String,
    /// Chosen region, color, storage and price mode.
    pub options: CartOptions,
    /// Thumbnail, usually the color image.
    pub image: Option<String>,
    /// Quantity.
    pub quantity: i64,
    /// Unit price.
    pub unit_price: Money,
    /// Total price (unit_price * quantity).
    pub total_price: Money,
}

impl LineItem {
    /// Create a new line item.
    pub fn new(
        product_id: ProductId,
        product_name: impl Into<String>,
        quantity: i64,
        unit_price: Money,
        options: CartOptions,
    ) -> Result<Self, CommerceError> {
        let total_price = unit_price
            .try_multiply(quantity)
            .ok_or(CommerceError::Overflow)?;
        Ok(Self {
            id: LineItemId::generate(),
            product_id,
            product_name: product_name.into(),
            options,
            image: None,
            quantity,
            unit_price,
            total_price,
        })
    }

    /// Product name with the variant label, e.g. "Phone (EU / Black / 128GB)".
    pub fn display_name(&self) -> String {
        match self.options.label() {
            Some(label) => format!("{} ({})", self.product_name, label),
            None => self.product_name.clone(),
        }
    }
}
