//! Normalization of the three product taxonomies into one region list.

use crate::catalog::{Color, Product, ProductKind, Region, Storage, StoragePrice, Taxonomy, VariantGroup};
use crate::ids::{RegionId, StorageId};

/// Id of the synthetic region wrapping a basic product's colors.
pub const BASIC_REGION_ID: &str = "default";
/// Id of the synthetic storage of a basic product.
pub const BASIC_STORAGE_ID: &str = "default-storage";

const BASIC_REGION_NAME: &str = "Default";
const BASIC_STORAGE_SIZE: &str = "Standard";

/// Convert a product's variant tree into a uniform list of regions.
///
/// Basic products yield one synthetic region when they have colors, region
/// and network products yield one region per group. Products without any
/// variant data yield an empty list.
pub fn normalize(product: &Product) -> Vec<Region> {
    match &product.taxonomy {
        Taxonomy::Basic { direct_colors } => basic_region(direct_colors).into_iter().collect(),
        Taxonomy::Region { regions } => groups(regions, ProductKind::Region),
        Taxonomy::Network { networks } => groups(networks, ProductKind::Network),
    }
}

fn groups(groups: &[VariantGroup], kind: ProductKind) -> Vec<Region> {
    groups
        .iter()
        .map(|group| Region {
            id: group.id.clone(),
            name: group
                .name
                .clone()
                .unwrap_or_else(|| kind.dimension_label().to_string()),
            colors: group.colors.iter().map(color).collect(),
            default_storages: group.default_storages.clone(),
        })
        .collect()
}

/// Color-specific storages carry their stock on the price block only.
fn color(color: &Color) -> Color {
    let storages = color.storages.as_ref().map(|list| {
        list.iter()
            .map(|storage| Storage {
                stock: storage.price.and_then(|p| p.stock_quantity),
                ..storage.clone()
            })
            .collect()
    });
    Color {
        storages,
        ..color.clone()
    }
}

/// The synthetic storage borrows price and stock from the first color only.
fn basic_region(direct_colors: &[Color]) -> Option<Region> {
    let first = direct_colors.first()?;
    let storage = Storage {
        id: StorageId::new(BASIC_STORAGE_ID),
        size: BASIC_STORAGE_SIZE.to_string(),
        price: Some(StoragePrice {
            regular_price: Some(first.regular_price.unwrap_or(0.0)),
            discount_price: Some(first.discount_price.unwrap_or(0.0)),
            stock_quantity: Some(first.stock_quantity.unwrap_or(0.0)),
        }),
        stock: None,
        is_default: false,
    };

    Some(Region {
        id: RegionId::new(BASIC_REGION_ID),
        name: BASIC_REGION_NAME.to_string(),
        colors: direct_colors.iter().map(color).collect(),
        default_storages: vec![storage],
    })
}
