//! Listing summaries derived from a product's variant tree.

use crate::catalog::Product;
use crate::resolver::normalize;
use serde::{Deserialize, Serialize};

/// Lowest and highest listed price of a product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// Whether every variant sells at the same price.
    pub fn is_single(&self) -> bool {
        self.min == self.max
    }
}

/// Total units available for a product.
///
/// A positive precomputed total or product stock wins; otherwise the
/// default storages of every region are summed.
pub fn total_stock(product: &Product) -> f64 {
    let own = product
        .total_stock
        .filter(|s| *s > 0.0)
        .or(product.stock_quantity.filter(|s| *s > 0.0));
    if let Some(stock) = own {
        return stock;
    }

    normalize(product)
        .iter()
        .flat_map(|region| region.default_storages.iter())
        .map(|storage| storage.resolved_stock())
        .sum()
}

/// Price range over the default storages of every region.
///
/// Falls back to the product's own positive price, and to `None` when
/// nothing is priced.
pub fn price_range(product: &Product) -> Option<PriceRange> {
    let prices: Vec<f64> = normalize(product)
        .iter()
        .flat_map(|region| region.default_storages.iter())
        .filter_map(|storage| storage.price.as_ref().map(|p| p.listed_price()))
        .filter(|p| *p > 0.0)
        .collect();

    if prices.is_empty() {
        return product
            .price
            .filter(|p| *p > 0.0)
            .map(|p| PriceRange { min: p, max: p });
    }

    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some(PriceRange { min, max })
}

/// First color image of the first region, for thumbnails.
pub fn primary_image(product: &Product) -> Option<String> {
    normalize(product)
        .into_iter()
        .next()?
        .colors
        .into_iter()
        .next()?
        .image
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network_product() -> Product {
        Product::from_json(
            r#"{
                "productType": "network",
                "networks": [
                    {
                        "id": "n1",
                        "networkType": "4G",
                        "colors": [{"id": "c1", "colorName": "Black", "colorImage": "black.png"}],
                        "defaultStorages": [
                            {"id": "s1", "size": "64GB", "price": {"regularPrice": 900, "discountPrice": 850, "stockQuantity": 2}},
                            {"id": "s2", "size": "128GB", "price": {"regularPrice": 1100, "stockQuantity": 0}, "stock": 5}
                        ]
                    },
                    {
                        "id": "n2",
                        "networkType": "5G",
                        "defaultStorages": [
                            {"id": "s3", "size": "256GB", "price": {"regularPrice": 1500, "discountPrice": 1400}, "stock": 4}
                        ]
                    }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_total_stock_sums_default_storages() {
        // 2 + 0 (price quantity wins over stock) + 4
        assert_eq!(total_stock(&network_product()), 6.0);
    }

    #[test]
    fn test_total_stock_prefers_product_fields() {
        let mut product = network_product();
        product.stock_quantity = Some(11.0);
        assert_eq!(total_stock(&product), 11.0);

        product.total_stock = Some(20.0);
        assert_eq!(total_stock(&product), 20.0);
    }

    #[test]
    fn test_price_range() {
        let range = price_range(&network_product()).unwrap();
        assert_eq!(range, PriceRange { min: 850.0, max: 1400.0 });
        assert!(!range.is_single());
    }

    #[test]
    fn test_price_range_of_bare_product() {
        let product = Product::from_json(r#"{"price": 250}"#).unwrap();
        assert_eq!(price_range(&product), Some(PriceRange { min: 250.0, max: 250.0 }));

        let product = Product::from_json(r#"{"price": 0}"#).unwrap();
        assert_eq!(price_range(&product), None);
    }

    #[test]
    fn test_primary_image() {
        assert_eq!(primary_image(&network_product()).as_deref(), Some("black.png"));
        assert_eq!(primary_image(&Product::default()), None);
    }

    #[test]
    fn test_primary_image_uses_first_color_only() {
        let product = Product::from_json(
            r#"{
                "productType": "basic",
                "directColors": [
                    {"id": "c1", "colorName": "Black"},
                    {"id": "c2", "colorName": "White", "colorImage": "white.png"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(primary_image(&product), None);
    }
}
