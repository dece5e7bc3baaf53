//! Storefront domain types and logic.
//!
//! - **Catalog**: products in three taxonomies (basic, region, network),
//!   ingested from lenient backend JSON into one canonical shape
//! - **Resolver**: normalization, the region/color/storage selection
//!   cascade, and price/stock resolution
//! - **Cart**: line items keyed by variant, pricing with shipping
//! - **Checkout**: delivery methods
//! - **Admin**: care plan and FAQ forms, filters and services
//!
//! # Example
//!
//! ```rust
//! use storefront_commerce::prelude::*;
//!
//! let product = Product::from_json(r#"{
//!     "id": "p1",
//!     "name": "Phone",
//!     "productType": "region",
//!     "regions": [{
//!         "id": "r1",
//!         "name": "EU",
//!         "colors": [{"id": "c1", "colorName": "Black"}],
//!         "defaultStorages": [{
//!             "id": "s1",
//!             "storageSize": "128GB",
//!             "price": {"regularPrice": 1000, "discountPrice": 800, "stockQuantity": 3}
//!         }]
//!     }]
//! }"#).unwrap();
//!
//! let resolution = resolve(&product, &Selection::new());
//! assert_eq!(resolution.price.discount_percent, 20);
//!
//! let mut cart = Cart::default();
//! cart.add_resolution(&resolution, 1).unwrap();
//! let pricing = cart.calculate_pricing(&ShippingPolicy::default()).unwrap();
//! assert_eq!(pricing.grand_total.display_amount(), "920.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod resolver;

#[cfg(feature = "storage")]
pub mod storage;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        price_range, primary_image, total_stock, Color, PriceRange, Product, ProductKind, Region,
        Storage, StoragePrice, Taxonomy,
    };

    // Resolver
    pub use crate::resolver::{
        care_plus_price, normalize, resolve, resolve_price, select, CartOptions, PriceResolution,
        PriceType, Resolution, Selection, VariantState,
    };

    // Cart
    pub use crate::cart::{Cart, CartPricing, LineItem, LineItemPricing, ShippingPolicy};

    // Checkout
    pub use crate::checkout::DeliveryMethod;

    // Admin
    pub use crate::admin::{
        filter_care_plans, filter_faqs, CarePlanDraft, CarePlanService, Faq, FaqDraft, FaqService,
        ProductCarePlan, PublishFilter,
    };

    pub use crate::config::StorefrontConfig;
}
