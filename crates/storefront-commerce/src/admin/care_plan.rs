//! Product care plans.

use super::matches_query;
use crate::error::CommerceError;
use crate::ids::{CarePlanId, CategoryId, ProductId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Care+ plan offered for a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductCarePlan {
    pub id: CarePlanId,
    pub product_id: ProductId,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    pub plan_name: String,
    pub price: f64,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated payload for creating or updating a care plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CarePlanRequest {
    pub product_id: ProductId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    pub plan_name: String,
    pub price: f64,
    pub duration: String,
    pub description: String,
    pub features: Vec<String>,
}

/// Care plan form contents, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarePlanDraft {
    pub product_id: String,
    pub category_id: String,
    pub plan_name: String,
    pub price: String,
    pub duration: String,
    pub description: String,
    /// Comma-separated feature list.
    pub features: String,
}

impl CarePlanDraft {
    /// Pre-fill the form from an existing plan.
    pub fn from_plan(plan: &ProductCarePlan) -> Self {
        Self {
            product_id: plan.product_id.to_string(),
            category_id: plan
                .category_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            plan_name: plan.plan_name.clone(),
            price: plan.price.to_string(),
            duration: plan.duration.clone().unwrap_or_default(),
            description: plan.description.clone().unwrap_or_default(),
            features: plan.features.join(", "),
        }
    }

    pub fn validate(&self) -> Result<CarePlanRequest, CommerceError> {
        let product_id = self.product_id.trim();
        let plan_name = self.plan_name.trim();
        let price = self.price.trim();
        if product_id.is_empty() || plan_name.is_empty() || price.is_empty() {
            return Err(CommerceError::ValidationError(
                "Product ID, Plan Name, and Price are required".to_string(),
            ));
        }

        let price: f64 = price
            .parse()
            .ok()
            .filter(|p: &f64| p.is_finite() && *p >= 0.0)
            .ok_or_else(|| {
                CommerceError::ValidationError(format!("Invalid price: {}", self.price.trim()))
            })?;

        let category_id = Some(self.category_id.trim())
            .filter(|c| !c.is_empty())
            .map(CategoryId::new);

        Ok(CarePlanRequest {
            product_id: ProductId::new(product_id),
            category_id,
            plan_name: plan_name.to_string(),
            price,
            duration: self.duration.trim().to_string(),
            description: self.description.trim().to_string(),
            features: split_features(&self.features),
        })
    }
}

fn split_features(features: &str) -> Vec<String> {
    features
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}

/// Plans whose name, product id or description contain `query`.
pub fn filter_care_plans<'a>(plans: &'a [ProductCarePlan], query: &str) -> Vec<&'a ProductCarePlan> {
    plans
        .iter()
        .filter(|plan| {
            matches_query(
                query,
                &[
                    Some(plan.plan_name.as_str()),
                    Some(plan.product_id.as_str()),
                    plan.description.as_deref(),
                ],
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> CarePlanDraft {
        CarePlanDraft {
            product_id: "prod-1".to_string(),
            plan_name: " Care+ 1 Year ".to_string(),
            price: "1500".to_string(),
            features: "Screen repair, , Battery swap ,".to_string(),
            ..CarePlanDraft::default()
        }
    }

    fn plan(id: &str, name: &str, product: &str, description: Option<&str>) -> ProductCarePlan {
        ProductCarePlan {
            id: CarePlanId::new(id),
            product_id: ProductId::new(product),
            category_id: None,
            plan_name: name.to_string(),
            price: 1000.0,
            duration: None,
            description: description.map(str::to_string),
            features: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_valid_draft() {
        let request = draft().validate().unwrap();
        assert_eq!(request.plan_name, "Care+ 1 Year");
        assert_eq!(request.price, 1500.0);
        assert_eq!(request.features, vec!["Screen repair", "Battery swap"]);
        assert_eq!(request.category_id, None);
    }

    #[test]
    fn test_required_fields() {
        let mut missing = draft();
        missing.price = "  ".to_string();
        let err = missing.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Product ID, Plan Name, and Price are required"
        );
    }

    #[test]
    fn test_bad_price() {
        let mut bad = draft();
        bad.price = "abc".to_string();
        assert!(matches!(bad.validate(), Err(CommerceError::ValidationError(_))));

        bad.price = "-5".to_string();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_draft_from_plan() {
        let mut existing = plan("cp1", "Care+", "prod-1", None);
        existing.features = vec!["A".to_string(), "B".to_string()];
        let draft = CarePlanDraft::from_plan(&existing);
        assert_eq!(draft.features, "A, B");
        assert_eq!(draft.price, "1000");
        assert_eq!(draft.validate().unwrap().features, existing.features);
    }

    #[test]
    fn test_filter_care_plans() {
        let plans = vec![
            plan("1", "Care+ Basic", "iphone-15", None),
            plan("2", "Extended", "galaxy-s24", Some("Accidental damage cover")),
            plan("3", "Screen", "pixel-8", None),
        ];

        assert_eq!(filter_care_plans(&plans, "").len(), 3);
        assert_eq!(filter_care_plans(&plans, "CARE+").len(), 1);
        assert_eq!(filter_care_plans(&plans, "galaxy")[0].id.as_str(), "2");
        assert_eq!(filter_care_plans(&plans, "damage")[0].id.as_str(), "2");
        assert!(filter_care_plans(&plans, "nothing").is_empty());
    }

    #[test]
    fn test_plan_json_shape() {
        let plan: ProductCarePlan = serde_json::from_str(
            r#"{
                "id": "cp1",
                "productId": "prod-1",
                "planName": "Care+",
                "price": 999,
                "createdAt": "2024-01-01T00:00:00Z",
                "updatedAt": "2024-01-02T00:00:00Z"
            }"#,
        )
        .unwrap();
        assert!(plan.features.is_empty());
        assert_eq!(plan.price, 999.0);
    }
}
