//! Admin console logic for care plans and FAQs.
//!
//! Form drafts validate into request payloads, list screens filter
//! records by a search query, and the service traits describe the REST
//! collaborators behind them.

mod care_plan;
mod faq;
mod service;

pub use care_plan::{filter_care_plans, CarePlanDraft, CarePlanRequest, ProductCarePlan};
pub use faq::{filter_faqs, Faq, FaqDraft, FaqRequest, FaqUpdate, PublishFilter};
pub use service::{CarePlanService, FaqService, InMemoryCarePlans, InMemoryFaqs, ServiceResult};

/// Case-insensitive substring match; an empty query matches everything.
fn matches_query(query: &str, fields: &[Option<&str>]) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    fields
        .iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&query))
}
