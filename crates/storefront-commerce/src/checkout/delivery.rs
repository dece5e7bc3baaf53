//! Delivery method types.

use crate::catalog::raw::{lenient_number, lenient_string};
use crate::error::CommerceError;
use crate::ids::DeliveryMethodId;
use crate::money::{Currency, Money};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A delivery method record as the backend emits it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDeliveryMethod {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, rename = "_id", deserialize_with = "lenient_string")]
    pub object_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub min_days: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub max_days: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub extra_fee: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A delivery option offered at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryMethod {
    /// Unique identifier.
    pub id: DeliveryMethodId,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Minimum delivery days.
    pub min_days: u32,
    /// Maximum delivery days.
    pub max_days: u32,
    /// Fee on top of cart shipping, in major units.
    pub extra_fee: f64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl DeliveryMethod {
    /// Parse one delivery method.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let raw: RawDeliveryMethod = serde_json::from_str(json)?;
        Ok(raw.into())
    }

    /// Parse a list response. Anything other than an array yields no methods.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, CommerceError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        match value {
            serde_json::Value::Array(_) => {
                let raw: Vec<RawDeliveryMethod> = serde_json::from_value(value)?;
                Ok(raw.into_iter().map(Self::from).collect())
            }
            _ => Ok(Vec::new()),
        }
    }

    /// Get delivery estimate string.
    pub fn delivery_estimate(&self) -> String {
        if self.min_days == self.max_days {
            format!("{} days", self.min_days)
        } else {
            format!("{}-{} days", self.min_days, self.max_days)
        }
    }

    /// Extra fee as money in the given currency.
    pub fn fee(&self, currency: Currency) -> Result<Money, CommerceError> {
        Money::from_decimal(self.extra_fee, currency).ok_or(CommerceError::Overflow)
    }

    /// Check if this method costs nothing extra.
    pub fn is_free(&self) -> bool {
        self.extra_fee <= 0.0
    }
}

fn days(value: Option<f64>) -> u32 {
    value.filter(|d| *d > 0.0).map(|d| d.round() as u32).unwrap_or(0)
}

fn timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

impl From<RawDeliveryMethod> for DeliveryMethod {
    fn from(raw: RawDeliveryMethod) -> Self {
        let id = raw
            .id
            .filter(|id| !id.is_empty())
            .or(raw.object_id)
            .unwrap_or_default();

        Self {
            id: DeliveryMethodId::new(id),
            name: raw.name.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            min_days: days(raw.min_days),
            max_days: days(raw.max_days),
            extra_fee: raw.extra_fee.unwrap_or(0.0),
            created_at: timestamp(raw.created_at.as_deref()),
            updated_at: timestamp(raw.updated_at.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_method_normalization() {
        let method = DeliveryMethod::from_json(
            r#"{
                "_id": "64ab",
                "name": "Express",
                "description": "Inside Dhaka",
                "minDays": "1",
                "maxDays": 2,
                "extraFee": "60",
                "createdAt": "2024-03-01T10:00:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(method.id.as_str(), "64ab");
        assert_eq!(method.delivery_estimate(), "1-2 days");
        assert_eq!(method.fee(Currency::BDT).unwrap().amount_minor, 6000);
        assert!(!method.is_free());
        assert!(method.created_at.is_some());
        assert!(method.updated_at.is_none());
    }

    #[test]
    fn test_id_wins_over_object_id() {
        let method = DeliveryMethod::from_json(r#"{"id": 5, "_id": "x", "minDays": 3, "maxDays": 3}"#).unwrap();
        assert_eq!(method.id.as_str(), "5");
        assert_eq!(method.delivery_estimate(), "3 days");
        assert!(method.is_free());
    }

    #[test]
    fn test_list_requires_array() {
        let methods = DeliveryMethod::list_from_json(r#"[{"id": "a"}, {"id": "b"}]"#).unwrap();
        assert_eq!(methods.len(), 2);

        let methods = DeliveryMethod::list_from_json(r#"{"message": "ok"}"#).unwrap();
        assert!(methods.is_empty());
    }
}
