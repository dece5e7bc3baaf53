//! Shopping cart module.
//!
//! Contains the cart, its line items, and cart pricing with shipping.

mod cart;
mod pricing;

pub use cart::{Cart, LineItem, MAX_QUANTITY_PER_ITEM};
pub use pricing::{CartPricing, LineItemPricing, ShippingPolicy};
