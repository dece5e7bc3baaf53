//! Product catalog module.
//!
//! Contains the wire shapes the backend emits, the canonical product and
//! variant types they collapse into, and listing summaries.

pub mod raw;
mod product;
mod summary;
mod variant;

pub use product::{Product, ProductKind, Taxonomy, VariantGroup};
pub use summary::{price_range, primary_image, total_stock, PriceRange};
pub use variant::{Color, Region, Storage, StoragePrice, COLOR_PLACEHOLDER};
