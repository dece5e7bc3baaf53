//! Variant resolution engine.
//!
//! A product's variant tree is normalized into a flat list of [`Region`]s,
//! a [`Selection`] is resolved against it into a [`VariantState`], and the
//! state is priced into a [`PriceResolution`]. [`resolve`] runs all three
//! and returns owned outputs.
//!
//! Every step is a pure function of its inputs. Lookups that miss degrade
//! to fallbacks and never error.
//!
//! [`Region`]: crate::catalog::Region

mod normalize;
mod pipeline;
mod price;
mod select;

pub use normalize::{normalize, BASIC_REGION_ID, BASIC_STORAGE_ID};
pub use pipeline::{resolve, CartOptions, Resolution};
pub use price::{care_plus_price, resolve_price, PriceResolution, DEFAULT_CARE_PLUS_RATE};
pub use select::{select, PriceType, Selection, VariantState};
