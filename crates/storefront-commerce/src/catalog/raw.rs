//! Wire shapes of catalog records as the backend emits them.
//!
//! The backend is inconsistent about field names (`colorName` vs `name`,
//! `storageSize` vs `size`, `discountPrice` vs `discount` vs `final`) and
//! about number encoding (numbers, numeric strings, `null`). These structs
//! accept every variant; the `From` impls in [`super::product`] collapse them
//! into the canonical shape exactly once.

use serde::{Deserialize, Deserializer};

/// A product record as returned by the product endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    /// Taxonomy tag: `basic`, `region` or `network`.
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub compare_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub stock_quantity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub total_stock: Option<f64>,
    #[serde(default)]
    pub is_care: Option<bool>,
    #[serde(default)]
    pub is_emi: Option<bool>,
    #[serde(default)]
    pub direct_colors: Option<Vec<RawColor>>,
    #[serde(default)]
    pub regions: Option<Vec<RawRegion>>,
    #[serde(default)]
    pub networks: Option<Vec<RawNetwork>>,
}

/// A region entry of a region-based product.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRegion {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub region_name: Option<String>,
    #[serde(default)]
    pub colors: Option<Vec<RawColor>>,
    #[serde(default)]
    pub default_storages: Option<Vec<RawStorage>>,
}

/// A network entry of a network-based product.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNetwork {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub network_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub colors: Option<Vec<RawColor>>,
    #[serde(default)]
    pub default_storages: Option<Vec<RawStorage>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawColor {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub color_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color_image: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub regular_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub discount_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub stock_quantity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub stock: Option<f64>,
    /// Nested price object some admin builds send instead of flat fields.
    #[serde(default)]
    pub price: Option<RawPrice>,
    #[serde(default)]
    pub has_storage: Option<bool>,
    #[serde(default)]
    pub use_default_storages: Option<bool>,
    #[serde(default)]
    pub storages: Option<Vec<RawStorage>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStorage {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub storage_size: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub price: Option<RawPrice>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub stock: Option<f64>,
    #[serde(default)]
    pub is_default: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPrice {
    #[serde(default, deserialize_with = "lenient_number")]
    pub regular_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub regular: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub discount_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub discount: Option<f64>,
    #[serde(default, rename = "final", deserialize_with = "lenient_number")]
    pub final_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub stock_quantity: Option<f64>,
}

/// Accept a number, a numeric string, or anything else as "absent".
///
/// Non-finite results are also treated as absent.
pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Numeric {
        Number(f64),
        Text(String),
        Other(serde_json::Value),
    }

    let value = Option::<Numeric>::deserialize(deserializer)?;
    let number = match value {
        Some(Numeric::Number(n)) => Some(n),
        Some(Numeric::Text(s)) => s.trim().parse::<f64>().ok(),
        Some(Numeric::Other(_)) | None => None,
    };
    Ok(number.filter(|n| n.is_finite()))
}

/// Accept ids encoded as strings or numbers.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdValue {
        Text(String),
        Integer(i64),
        Number(f64),
        Other(serde_json::Value),
    }

    let value = Option::<IdValue>::deserialize(deserializer)?;
    Ok(match value {
        Some(IdValue::Text(s)) => Some(s),
        Some(IdValue::Integer(n)) => Some(n.to_string()),
        Some(IdValue::Number(n)) => Some(n.to_string()),
        Some(IdValue::Other(_)) | None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_accept_strings_and_null() {
        let price: RawPrice = serde_json::from_str(
            r#"{"regularPrice": "1200", "discountPrice": null, "final": 950.5, "stockQuantity": "n/a"}"#,
        )
        .unwrap();
        assert_eq!(price.regular_price, Some(1200.0));
        assert_eq!(price.discount_price, None);
        assert_eq!(price.final_price, Some(950.5));
        assert_eq!(price.stock_quantity, None);
    }

    #[test]
    fn test_numeric_ids_become_strings() {
        let storage: RawStorage = serde_json::from_str(r#"{"id": 42, "size": "64GB"}"#).unwrap();
        assert_eq!(storage.id.as_deref(), Some("42"));
    }

    #[test]
    fn test_both_aliases_are_kept() {
        let color: RawColor =
            serde_json::from_str(r#"{"id": "c1", "colorName": "Midnight", "name": "Black"}"#).unwrap();
        assert_eq!(color.color_name.as_deref(), Some("Midnight"));
        assert_eq!(color.name.as_deref(), Some("Black"));
    }

    #[test]
    fn test_unexpected_types_read_as_absent() {
        let color: RawColor =
            serde_json::from_str(r#"{"id": "c1", "regularPrice": {"amount": 5}, "stock": true}"#).unwrap();
        assert_eq!(color.regular_price, None);
        assert_eq!(color.stock, None);
    }
}
