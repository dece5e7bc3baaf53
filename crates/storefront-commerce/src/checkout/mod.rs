//! Checkout module.
//!
//! Contains the delivery methods offered at checkout.

mod delivery;

pub use delivery::{DeliveryMethod, RawDeliveryMethod};
