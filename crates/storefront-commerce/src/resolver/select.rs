//! Selection state and the region, color, storage cascade.

use crate::catalog::{Color, Region, Storage};
use crate::ids::{ColorId, RegionId, StorageId};
use serde::{Deserialize, Serialize};

/// Which of the two prices the buyer is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    /// Discounted price when one exists, regular otherwise.
    #[default]
    Offer,
    Regular,
}

impl PriceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceType::Offer => "offer",
            PriceType::Regular => "regular",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "offer" => Some(PriceType::Offer),
            "regular" => Some(PriceType::Regular),
            _ => None,
        }
    }
}

/// The buyer's partial choice of variant.
///
/// Unset ids resolve to fallbacks. Color and storage ids depend on the
/// region, so [`Selection::select_region`] clears them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub region_id: Option<RegionId>,
    pub color_id: Option<ColorId>,
    pub storage_id: Option<StorageId>,
    #[serde(default)]
    pub price_type: PriceType,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose a region, dropping the dependent color and storage.
    pub fn select_region(self, id: RegionId) -> Self {
        Self {
            region_id: Some(id),
            color_id: None,
            storage_id: None,
            ..self
        }
    }

    pub fn select_color(self, id: ColorId) -> Self {
        Self {
            color_id: Some(id),
            ..self
        }
    }

    pub fn select_storage(self, id: StorageId) -> Self {
        Self {
            storage_id: Some(id),
            ..self
        }
    }

    pub fn with_price_type(self, price_type: PriceType) -> Self {
        Self { price_type, ..self }
    }

    /// Pin the ids the state resolved to.
    ///
    /// Ids that matched nothing are replaced by the fallback they resolved
    /// to, so a settled selection never carries a stale id.
    pub fn settled(&self, state: &VariantState<'_>) -> Self {
        Self {
            region_id: state.region.map(|r| r.id.clone()),
            color_id: state.color.map(|c| c.id.clone()),
            storage_id: state.storage.map(|s| s.id.clone()),
            price_type: self.price_type,
        }
    }
}

/// The resolved variant and the candidates for each dimension.
///
/// Borrows from the normalized region list.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VariantState<'a> {
    pub region: Option<&'a Region>,
    pub colors: &'a [Color],
    pub color: Option<&'a Color>,
    pub storages: &'a [Storage],
    pub storage: Option<&'a Storage>,
}

impl VariantState<'_> {
    /// Whether nothing was resolved at all (a product without variants).
    pub fn is_bare(&self) -> bool {
        self.region.is_none() && self.color.is_none() && self.storage.is_none()
    }
}

/// Resolve a selection against normalized regions.
pub fn select<'a>(regions: &'a [Region], selection: &Selection) -> VariantState<'a> {
    let region = pick(regions, selection.region_id.as_ref(), |r| &r.id);
    let colors = region.map(|r| r.colors.as_slice()).unwrap_or(&[]);
    let color = pick(colors, selection.color_id.as_ref(), |c| &c.id);

    let defaults = region.map(|r| r.default_storages.as_slice()).unwrap_or(&[]);
    let storages: &[Storage] = match color {
        Some(c) if c.lacks_storage() => &[],
        Some(c) => c.own_storages().unwrap_or(defaults),
        None => defaults,
    };

    let storage = storages
        .iter()
        .find(|s| selection.storage_id.as_ref() == Some(&s.id))
        .or_else(|| storages.iter().find(|s| s.is_default))
        .or_else(|| storages.first());

    VariantState {
        region,
        colors,
        color,
        storages,
        storage,
    }
}

/// Item matching `id` when set and present, else the first item.
fn pick<'a, T, K: PartialEq>(items: &'a [T], id: Option<&K>, key: impl Fn(&T) -> &K) -> Option<&'a T> {
    id.and_then(|id| items.iter().find(|item| key(item) == id))
        .or_else(|| items.first())
}
