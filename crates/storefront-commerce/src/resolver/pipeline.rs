//! End-to-end resolution of a product and a selection.

use crate::catalog::{Color, Product, ProductKind, Region, Storage};
use crate::error::CommerceError;
use crate::ids::{ColorId, ProductId, RegionId, StorageId};
use crate::resolver::normalize::normalize;
use crate::resolver::price::{care_plus_price, resolve_price, PriceResolution};
use crate::resolver::select::{select, PriceType, Selection};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Variant options attached to a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartOptions {
    pub region: Option<RegionId>,
    pub region_name: Option<String>,
    pub color: Option<ColorId>,
    pub color_name: Option<String>,
    pub storage: Option<StorageId>,
    pub storage_name: Option<String>,
    #[serde(default)]
    pub price_type: PriceType,
}

impl CartOptions {
    /// Human readable variant label, e.g. "EU / Black / 128GB".
    pub fn label(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.region_name, &self.color_name, &self.storage_name]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" / "))
        }
    }
}

/// Everything derived from one product and one selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub product_id: ProductId,
    pub product_name: String,
    pub kind: ProductKind,
    pub regions: Vec<Region>,
    pub region: Option<Region>,
    pub colors: Vec<Color>,
    pub color: Option<Color>,
    pub storages: Vec<Storage>,
    pub storage: Option<Storage>,
    pub price: PriceResolution,
    pub price_type: PriceType,
    /// Price per unit in the selected price mode.
    pub unit_price: f64,
    /// Gallery image of the resolved color.
    pub color_image: Option<String>,
}

impl Resolution {
    /// The image to switch the gallery to, if the resolved color differs
    /// from the one in `previous`.
    pub fn color_change_since(&self, previous: Option<&Resolution>) -> Option<&str> {
        let previous_color = previous.and_then(|p| p.color.as_ref()).map(|c| &c.id);
        if previous_color == self.color.as_ref().map(|c| &c.id) {
            return None;
        }
        self.color_image.as_deref()
    }

    /// Care+ add-on for the current unit price.
    pub fn care_plus_price(&self, rate: f64) -> f64 {
        care_plus_price(self.unit_price, rate)
    }

    pub fn dimension_label(&self) -> &'static str {
        self.kind.dimension_label()
    }

    /// Options for adding this resolution to the cart.
    pub fn cart_options(&self) -> Result<CartOptions, CommerceError> {
        if !self.price.in_stock {
            return Err(CommerceError::OutOfStock(self.product_name.clone()));
        }

        Ok(CartOptions {
            region: self.region.as_ref().map(|r| r.id.clone()),
            region_name: self.region.as_ref().map(|r| r.name.clone()),
            color: self.color.as_ref().map(|c| c.id.clone()),
            color_name: self.color.as_ref().map(|c| c.name.clone()),
            storage: self.storage.as_ref().map(|s| s.id.clone()),
            storage_name: self.storage.as_ref().map(|s| s.size.clone()),
            price_type: self.price_type,
        })
    }
}

/// Normalize, select and price in one pass.
pub fn resolve(product: &Product, selection: &Selection) -> Resolution {
    let regions = normalize(product);
    let state = select(&regions, selection);
    let price = resolve_price(product, &state);
    let unit_price = price.effective_price(selection.price_type);

    debug!(
        product = %product.id,
        region = state.region.map(|r| r.id.as_str()),
        color = state.color.map(|c| c.id.as_str()),
        storage = state.storage.map(|s| s.id.as_str()),
        unit_price,
        in_stock = price.in_stock,
        "resolved variant"
    );

    let region = state.region.cloned();
    let colors = state.colors.to_vec();
    let color = state.color.cloned();
    let storages = state.storages.to_vec();
    let storage = state.storage.cloned();
    let color_image = color.as_ref().and_then(|c| c.image.clone());

    Resolution {
        product_id: product.id.clone(),
        product_name: product.name.clone(),
        kind: product.kind(),
        regions,
        region,
        colors,
        color,
        storages,
        storage,
        price,
        price_type: selection.price_type,
        unit_price,
        color_image,
    }
}
