//! Product FAQs.

use super::matches_query;
use crate::error::CommerceError;
use crate::ids::{FaqId, ProductId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    pub id: FaqId,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default)]
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Faq {
    pub fn status_label(&self) -> &'static str {
        if self.is_published {
            "Published"
        } else {
            "Draft"
        }
    }
}

/// Validated payload for creating a FAQ.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FaqRequest {
    pub question: String,
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    pub is_published: bool,
}

/// Partial FAQ update; absent fields are left alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FaqUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
}

impl FaqUpdate {
    /// Flip only the publish flag.
    pub fn publish(is_published: bool) -> Self {
        Self {
            is_published: Some(is_published),
            ..Self::default()
        }
    }

    pub fn apply(&self, faq: &mut Faq) {
        if let Some(question) = &self.question {
            faq.question = question.clone();
        }
        if let Some(answer) = &self.answer {
            faq.answer = answer.clone();
        }
        if let Some(category) = &self.category {
            faq.category = Some(category.clone());
        }
        if let Some(product_id) = &self.product_id {
            faq.product_id = Some(product_id.clone());
        }
        if let Some(is_published) = self.is_published {
            faq.is_published = is_published;
        }
        faq.updated_at = Utc::now();
    }
}

impl From<FaqRequest> for FaqUpdate {
    fn from(request: FaqRequest) -> Self {
        Self {
            question: Some(request.question),
            answer: Some(request.answer),
            category: request.category,
            product_id: request.product_id,
            is_published: Some(request.is_published),
        }
    }
}

/// FAQ form contents, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaqDraft {
    pub question: String,
    pub answer: String,
    pub category: String,
    pub product_id: String,
    pub is_published: bool,
}

impl FaqDraft {
    pub fn from_faq(faq: &Faq) -> Self {
        Self {
            question: faq.question.clone(),
            answer: faq.answer.clone(),
            category: faq.category.clone().unwrap_or_default(),
            product_id: faq
                .product_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            is_published: faq.is_published,
        }
    }

    pub fn validate(&self) -> Result<FaqRequest, CommerceError> {
        let question = self.question.trim();
        let answer = self.answer.trim();
        if question.is_empty() || answer.is_empty() {
            return Err(CommerceError::ValidationError(
                "Question and Answer are required".to_string(),
            ));
        }

        let optional = |s: &str| Some(s.trim()).filter(|s| !s.is_empty()).map(str::to_string);

        Ok(FaqRequest {
            question: question.to_string(),
            answer: answer.to_string(),
            category: optional(&self.category),
            product_id: optional(&self.product_id).map(ProductId::new),
            is_published: self.is_published,
        })
    }
}

/// Publish state filter of the FAQ list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishFilter {
    #[default]
    All,
    Published,
    Draft,
}

impl PublishFilter {
    pub fn accepts(&self, faq: &Faq) -> bool {
        match self {
            PublishFilter::All => true,
            PublishFilter::Published => faq.is_published,
            PublishFilter::Draft => !faq.is_published,
        }
    }
}

/// FAQs whose question or answer contain `query`, narrowed by publish state.
pub fn filter_faqs<'a>(faqs: &'a [Faq], query: &str, publish: PublishFilter) -> Vec<&'a Faq> {
    faqs.iter()
        .filter(|faq| matches_query(query, &[Some(faq.question.as_str()), Some(faq.answer.as_str())]))
        .filter(|faq| publish.accepts(faq))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faq(id: &str, question: &str, answer: &str, is_published: bool) -> Faq {
        Faq {
            id: FaqId::new(id),
            question: question.to_string(),
            answer: answer.to_string(),
            category: None,
            product_id: None,
            is_published,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_draft_requires_question_and_answer() {
        let draft = FaqDraft {
            question: "Is it waterproof?".to_string(),
            answer: "   ".to_string(),
            ..FaqDraft::default()
        };
        let err = draft.validate().unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Question and Answer are required");
    }

    #[test]
    fn test_draft_blank_optionals_are_none() {
        let request = FaqDraft {
            question: " Warranty? ".to_string(),
            answer: "One year".to_string(),
            category: " ".to_string(),
            product_id: "prod-1".to_string(),
            is_published: true,
        }
        .validate()
        .unwrap();

        assert_eq!(request.question, "Warranty?");
        assert_eq!(request.category, None);
        assert_eq!(request.product_id, Some(ProductId::new("prod-1")));
    }

    #[test]
    fn test_filter_faqs() {
        let faqs = vec![
            faq("1", "Is shipping free?", "Above 5000", true),
            faq("2", "Do you ship abroad?", "Not yet", false),
            faq("3", "Warranty", "One year official", true),
        ];

        assert_eq!(filter_faqs(&faqs, "", PublishFilter::All).len(), 3);
        assert_eq!(filter_faqs(&faqs, "SHIP", PublishFilter::All).len(), 2);
        assert_eq!(filter_faqs(&faqs, "ship", PublishFilter::Draft)[0].id.as_str(), "2");
        assert_eq!(filter_faqs(&faqs, "official", PublishFilter::Published).len(), 1);
        assert!(filter_faqs(&faqs, "official", PublishFilter::Draft).is_empty());
    }

    #[test]
    fn test_publish_toggle() {
        let mut entry = faq("1", "Q", "A", false);
        assert_eq!(entry.status_label(), "Draft");
        FaqUpdate::publish(true).apply(&mut entry);
        assert!(entry.is_published);
        assert_eq!(entry.question, "Q");
        assert_eq!(entry.status_label(), "Published");
    }

    #[test]
    fn test_update_serializes_only_present_fields() {
        let json = serde_json::to_string(&FaqUpdate::publish(false)).unwrap();
        assert_eq!(json, r#"{"isPublished":false}"#);
    }
}
