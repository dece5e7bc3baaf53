//! Canonical variant dimension types: regions, colors and storages.

use crate::ids::{ColorId, RegionId, StorageId};
use serde::{Deserialize, Serialize};

/// Placeholder shown for a color without a usable name.
pub const COLOR_PLACEHOLDER: &str = "Color";

/// A normalized top-level variant group (a region or a network).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub id: RegionId,
    /// Trimmed display name, never empty.
    pub name: String,
    pub colors: Vec<Color>,
    pub default_storages: Vec<Storage>,
}

impl Region {
    /// Find a color of this region by id.
    pub fn color(&self, id: &ColorId) -> Option<&Color> {
        self.colors.iter().find(|c| &c.id == id)
    }
}

/// A color option.
///
/// Price and stock fields are optional: a color only carries them when the
/// product prices at color level instead of per storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub id: ColorId,
    /// Trimmed display name, never empty.
    pub name: String,
    /// Gallery image for this color.
    pub image: Option<String>,
    pub regular_price: Option<f64>,
    pub discount_price: Option<f64>,
    pub stock_quantity: Option<f64>,
    /// `Some(false)` means this color has no storage dimension at all.
    pub has_storage: Option<bool>,
    /// `Some(false)` means [`Color::storages`] replaces the region's list.
    pub use_default_storages: Option<bool>,
    /// Color-specific storage list, when the color declares one.
    pub storages: Option<Vec<Storage>>,
}

impl Color {
    /// Whether this color opts out of the storage dimension.
    pub fn lacks_storage(&self) -> bool {
        self.has_storage == Some(false)
    }

    /// The color's own storage list, if it overrides the region defaults.
    pub fn own_storages(&self) -> Option<&[Storage]> {
        if self.use_default_storages == Some(false) {
            self.storages.as_deref()
        } else {
            None
        }
    }
}

/// A storage (capacity) option.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Storage {
    pub id: StorageId,
    /// Trimmed size label, may be empty.
    pub size: String,
    pub price: Option<StoragePrice>,
    pub stock: Option<f64>,
    #[serde(default)]
    pub is_default: bool,
}

impl Storage {
    /// Stock for this storage: the price object's quantity, then the
    /// storage's own stock field, then zero.
    pub fn resolved_stock(&self) -> f64 {
        self.price
            .as_ref()
            .and_then(|p| p.stock_quantity)
            .or(self.stock)
            .unwrap_or(0.0)
    }
}

/// Price block attached to a storage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct StoragePrice {
    pub regular_price: Option<f64>,
    pub discount_price: Option<f64>,
    pub stock_quantity: Option<f64>,
}

impl StoragePrice {
    /// Price a listing shows for this storage: the discount price when
    /// positive, otherwise the regular price.
    pub fn listed_price(&self) -> f64 {
        match self.discount_price {
            Some(discount) if discount > 0.0 => discount,
            _ => self.regular_price.unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage(price: Option<StoragePrice>, stock: Option<f64>) -> Storage {
        Storage {
            id: StorageId::new("s1"),
            size: "128GB".to_string(),
            price,
            stock,
            is_default: false,
        }
    }

    #[test]
    fn test_resolved_stock_prefers_price_quantity() {
        let price = StoragePrice {
            stock_quantity: Some(4.0),
            ..StoragePrice::default()
        };
        assert_eq!(storage(Some(price), Some(9.0)).resolved_stock(), 4.0);
        assert_eq!(storage(Some(StoragePrice::default()), Some(9.0)).resolved_stock(), 9.0);
        assert_eq!(storage(None, None).resolved_stock(), 0.0);
    }

    #[test]
    fn test_listed_price_degrades_to_regular() {
        let price = StoragePrice {
            regular_price: Some(1000.0),
            discount_price: Some(0.0),
            stock_quantity: None,
        };
        assert_eq!(price.listed_price(), 1000.0);
    }

    #[test]
    fn test_own_storages_requires_opt_out() {
        let mut color = Color {
            id: ColorId::new("c1"),
            name: "Blue".to_string(),
            storages: Some(vec![storage(None, None)]),
            ..Color::default()
        };
        assert!(color.own_storages().is_none());

        color.use_default_storages = Some(false);
        assert_eq!(color.own_storages().map(|s| s.len()), Some(1));
    }
}
