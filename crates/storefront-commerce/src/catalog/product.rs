//! Canonical product record and its taxonomy.

use crate::catalog::raw::{RawColor, RawNetwork, RawPrice, RawProduct, RawRegion, RawStorage};
use crate::catalog::variant::{Color, Storage, StoragePrice, COLOR_PLACEHOLDER};
use crate::error::CommerceError;
use crate::ids::{ColorId, ProductId, RegionId, StorageId};
use serde::{Deserialize, Serialize};

/// Product taxonomy classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    /// Flat list of colors, no region dimension.
    Basic,
    /// Colors and storages grouped by sales region.
    #[default]
    Region,
    /// Colors and storages grouped by cellular network.
    Network,
}

impl ProductKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductKind::Basic => "basic",
            ProductKind::Region => "region",
            ProductKind::Network => "network",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Some(ProductKind::Basic),
            "region" => Some(ProductKind::Region),
            "network" => Some(ProductKind::Network),
            _ => None,
        }
    }

    /// Label of the top variant dimension, also used as the placeholder
    /// name for an unnamed group.
    pub fn dimension_label(&self) -> &'static str {
        match self {
            ProductKind::Basic => "Option",
            ProductKind::Region => "Region",
            ProductKind::Network => "Network",
        }
    }
}

/// A region or network as delivered by the catalog, before normalization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VariantGroup {
    pub id: RegionId,
    /// Trimmed name, `None` when the backend sent nothing usable.
    pub name: Option<String>,
    pub colors: Vec<Color>,
    pub default_storages: Vec<Storage>,
}

/// The variant data of a product, one shape per taxonomy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "productType", rename_all = "lowercase")]
pub enum Taxonomy {
    Basic {
        #[serde(rename = "directColors")]
        direct_colors: Vec<Color>,
    },
    Region {
        regions: Vec<VariantGroup>,
    },
    Network {
        networks: Vec<VariantGroup>,
    },
}

impl Taxonomy {
    pub fn kind(&self) -> ProductKind {
        match self {
            Taxonomy::Basic { .. } => ProductKind::Basic,
            Taxonomy::Region { .. } => ProductKind::Region,
            Taxonomy::Network { .. } => ProductKind::Network,
        }
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Taxonomy::Region {
            regions: Vec::new(),
        }
    }
}

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    /// Bare product price, used when no variant dimension prices it.
    pub price: Option<f64>,
    pub compare_price: Option<f64>,
    pub stock_quantity: Option<f64>,
    /// Precomputed stock total, when the backend provides one.
    pub total_stock: Option<f64>,
    /// Whether Care+ plans are offered for this product.
    pub is_care: bool,
    /// Whether EMI installment plans are offered for this product.
    pub is_emi: bool,
    #[serde(flatten)]
    pub taxonomy: Taxonomy,
}

impl Product {
    /// Parse a product from the backend's JSON.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let raw: RawProduct = serde_json::from_str(json)?;
        Ok(raw.into())
    }

    /// Convert an already parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, CommerceError> {
        let raw: RawProduct = serde_json::from_value(value)?;
        Ok(raw.into())
    }

    pub fn kind(&self) -> ProductKind {
        self.taxonomy.kind()
    }
}

/// First candidate that is non-empty after trimming.
fn first_label(candidates: &[Option<&str>]) -> Option<String> {
    candidates
        .iter()
        .flatten()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

impl From<RawProduct> for Product {
    fn from(raw: RawProduct) -> Self {
        let kind = raw
            .product_type
            .as_deref()
            .and_then(ProductKind::parse)
            .unwrap_or_default();

        let taxonomy = match kind {
            ProductKind::Basic => Taxonomy::Basic {
                direct_colors: collect(raw.direct_colors),
            },
            ProductKind::Region => Taxonomy::Region {
                regions: collect(raw.regions),
            },
            ProductKind::Network => Taxonomy::Network {
                networks: collect(raw.networks),
            },
        };

        Self {
            id: ProductId::new(raw.id.unwrap_or_default()),
            name: raw.name.unwrap_or_default(),
            slug: raw.slug.unwrap_or_default(),
            price: raw.price,
            compare_price: raw.compare_price,
            stock_quantity: raw.stock_quantity,
            total_stock: raw.total_stock,
            is_care: raw.is_care.unwrap_or(false),
            is_emi: raw.is_emi.unwrap_or(false),
            taxonomy,
        }
    }
}

fn collect<R, T: From<R>>(items: Option<Vec<R>>) -> Vec<T> {
    items
        .unwrap_or_default()
        .into_iter()
        .map(T::from)
        .collect()
}

impl From<RawRegion> for VariantGroup {
    fn from(raw: RawRegion) -> Self {
        Self {
            id: RegionId::new(raw.id.unwrap_or_default()),
            name: first_label(&[raw.name.as_deref(), raw.region_name.as_deref()]),
            colors: collect(raw.colors),
            default_storages: collect(raw.default_storages),
        }
    }
}

impl From<RawNetwork> for VariantGroup {
    fn from(raw: RawNetwork) -> Self {
        Self {
            id: RegionId::new(raw.id.unwrap_or_default()),
            name: first_label(&[raw.network_type.as_deref(), raw.name.as_deref()]),
            colors: collect(raw.colors),
            default_storages: collect(raw.default_storages),
        }
    }
}

impl From<RawColor> for Color {
    fn from(raw: RawColor) -> Self {
        let nested = raw.price.unwrap_or_default();
        Self {
            id: ColorId::new(raw.id.unwrap_or_default()),
            name: first_label(&[raw.color_name.as_deref(), raw.name.as_deref()])
                .unwrap_or_else(|| COLOR_PLACEHOLDER.to_string()),
            image: first_label(&[raw.color_image.as_deref(), raw.image.as_deref()]),
            regular_price: raw.regular_price.or(nested.regular_price),
            discount_price: raw.discount_price.or(nested.discount_price),
            stock_quantity: raw.stock_quantity.or(raw.stock),
            has_storage: raw.has_storage,
            use_default_storages: raw.use_default_storages,
            storages: raw.storages.map(|list| list.into_iter().map(Storage::from).collect()),
        }
    }
}

impl From<RawStorage> for Storage {
    fn from(raw: RawStorage) -> Self {
        Self {
            id: StorageId::new(raw.id.unwrap_or_default()),
            size: first_label(&[raw.storage_size.as_deref(), raw.size.as_deref()]).unwrap_or_default(),
            price: raw.price.map(StoragePrice::from),
            stock: raw.stock,
            is_default: raw.is_default.unwrap_or(false),
        }
    }
}

impl From<RawPrice> for StoragePrice {
    fn from(raw: RawPrice) -> Self {
        Self {
            regular_price: raw.regular_price.or(raw.regular),
            discount_price: raw.discount_price.or(raw.discount).or(raw.final_price),
            stock_quantity: raw.stock_quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_product_uses_network_type() {
        let product = Product::from_json(
            r#"{
                "id": "p1",
                "productType": "network",
                "networks": [{"id": "n1", "networkType": "  5G  ", "colors": [], "defaultStorages": []}]
            }"#,
        )
        .unwrap();

        match product.taxonomy {
            Taxonomy::Network { networks } => {
                assert_eq!(networks.len(), 1);
                assert_eq!(networks[0].name.as_deref(), Some("5G"));
            }
            other => panic!("unexpected taxonomy: {:?}", other),
        }
    }

    #[test]
    fn test_missing_or_unknown_tag_reads_as_region() {
        let product = Product::from_json(r#"{"id": "p1", "regions": [{"id": "r1"}]}"#).unwrap();
        assert_eq!(product.kind(), ProductKind::Region);

        let product = Product::from_json(r#"{"id": "p1", "productType": "bundle"}"#).unwrap();
        assert_eq!(product.kind(), ProductKind::Region);
    }

    #[test]
    fn test_tag_is_case_insensitive() {
        let product = Product::from_json(r#"{"productType": "Basic", "directColors": []}"#).unwrap();
        assert_eq!(product.kind(), ProductKind::Basic);
    }

    #[test]
    fn test_color_aliases_prefer_color_fields() {
        let product = Product::from_json(
            r#"{
                "productType": "basic",
                "directColors": [
                    {"id": "c1", "colorName": "Midnight", "name": "Black", "colorImage": "a.png", "image": "b.png"},
                    {"id": "c2", "colorName": "   ", "name": " Silver "},
                    {"id": "c3"}
                ]
            }"#,
        )
        .unwrap();

        let Taxonomy::Basic { direct_colors } = product.taxonomy else {
            panic!("expected basic taxonomy");
        };
        assert_eq!(direct_colors[0].name, "Midnight");
        assert_eq!(direct_colors[0].image.as_deref(), Some("a.png"));
        assert_eq!(direct_colors[1].name, "Silver");
        assert_eq!(direct_colors[2].name, COLOR_PLACEHOLDER);
        assert_eq!(direct_colors[2].image, None);
    }

    #[test]
    fn test_price_aliases_are_nullish() {
        let price = StoragePrice::from(RawPrice {
            regular_price: Some(0.0),
            regular: Some(900.0),
            discount_price: None,
            discount: None,
            final_price: Some(850.0),
            stock_quantity: Some(2.0),
        });
        assert_eq!(price.regular_price, Some(0.0));
        assert_eq!(price.discount_price, Some(850.0));
    }

    #[test]
    fn test_storage_size_alias() {
        let storage = Storage::from(RawStorage {
            storage_size: Some(" 256GB ".to_string()),
            size: Some("ignored".to_string()),
            ..RawStorage::default()
        });
        assert_eq!(storage.size, "256GB");
    }

    #[test]
    fn test_bare_product_fields() {
        let product = Product::from_json(
            r#"{"id": 7, "name": "Cable", "price": "350", "comparePrice": 300, "stockQuantity": 12, "isCare": true}"#,
        )
        .unwrap();
        assert_eq!(product.id.as_str(), "7");
        assert_eq!(product.price, Some(350.0));
        assert_eq!(product.compare_price, Some(300.0));
        assert!(product.is_care);
        assert!(!product.is_emi);
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let err = Product::from_json("{not json").unwrap_err();
        assert!(matches!(err, CommerceError::SerializationError(_)));
    }

    #[test]
    fn test_canonical_round_trip_keeps_taxonomy() {
        let product = Product::from_json(r#"{"id": "p1", "productType": "network", "networks": []}"#).unwrap();
        let json = serde_json::to_string(&product).unwrap();
        assert!(json.contains(r#""productType":"network""#));
        let back: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(back, product);
    }
}
