//! Care plan and FAQ service collaborators.

use super::{CarePlanRequest, Faq, FaqRequest, FaqUpdate, ProductCarePlan};
use crate::error::CommerceError;
use crate::ids::{CarePlanId, FaqId, ProductId};
use chrono::Utc;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

pub type ServiceResult<T> = Result<T, CommerceError>;

/// Care plan endpoints of the catalog backend.
pub trait CarePlanService: Send + Sync {
    /// Create a care plan for a product.
    fn create(&self, product_id: &ProductId, request: CarePlanRequest) -> ServiceResult<ProductCarePlan>;

    /// All care plans of a product.
    fn list(&self, product_id: &ProductId) -> ServiceResult<Vec<ProductCarePlan>>;

    fn get(&self, id: &CarePlanId) -> ServiceResult<ProductCarePlan>;

    fn update(&self, id: &CarePlanId, request: CarePlanRequest) -> ServiceResult<ProductCarePlan>;

    fn delete(&self, id: &CarePlanId) -> ServiceResult<()>;
}

/// FAQ endpoints of the catalog backend.
pub trait FaqService: Send + Sync {
    fn create(&self, request: FaqRequest) -> ServiceResult<Faq>;

    fn list(&self) -> ServiceResult<Vec<Faq>>;

    fn get(&self, id: &FaqId) -> ServiceResult<Faq>;

    /// Apply a partial update.
    fn update(&self, id: &FaqId, update: FaqUpdate) -> ServiceResult<Faq>;

    fn delete(&self, id: &FaqId) -> ServiceResult<()>;
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}

/// In-process care plan store.
#[derive(Debug, Default)]
pub struct InMemoryCarePlans {
    plans: RwLock<Vec<ProductCarePlan>>,
}

impl InMemoryCarePlans {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CarePlanService for InMemoryCarePlans {
    fn create(&self, product_id: &ProductId, request: CarePlanRequest) -> ServiceResult<ProductCarePlan> {
        let now = Utc::now();
        let plan = ProductCarePlan {
            id: CarePlanId::generate(),
            product_id: product_id.clone(),
            category_id: request.category_id,
            plan_name: request.plan_name,
            price: request.price,
            duration: Some(request.duration).filter(|d| !d.is_empty()),
            description: Some(request.description).filter(|d| !d.is_empty()),
            features: request.features,
            created_at: now,
            updated_at: now,
        };
        write(&self.plans).push(plan.clone());
        Ok(plan)
    }

    fn list(&self, product_id: &ProductId) -> ServiceResult<Vec<ProductCarePlan>> {
        Ok(read(&self.plans)
            .iter()
            .filter(|p| &p.product_id == product_id)
            .cloned()
            .collect())
    }

    fn get(&self, id: &CarePlanId) -> ServiceResult<ProductCarePlan> {
        read(&self.plans)
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| CommerceError::CarePlanNotFound(id.to_string()))
    }

    fn update(&self, id: &CarePlanId, request: CarePlanRequest) -> ServiceResult<ProductCarePlan> {
        let mut plans = write(&self.plans);
        let plan = plans
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| CommerceError::CarePlanNotFound(id.to_string()))?;

        plan.product_id = request.product_id;
        plan.category_id = request.category_id;
        plan.plan_name = request.plan_name;
        plan.price = request.price;
        plan.duration = Some(request.duration).filter(|d| !d.is_empty());
        plan.description = Some(request.description).filter(|d| !d.is_empty());
        plan.features = request.features;
        plan.updated_at = Utc::now();
        Ok(plan.clone())
    }

    fn delete(&self, id: &CarePlanId) -> ServiceResult<()> {
        let mut plans = write(&self.plans);
        let before = plans.len();
        plans.retain(|p| &p.id != id);
        if plans.len() == before {
            return Err(CommerceError::CarePlanNotFound(id.to_string()));
        }
        Ok(())
    }
}

/// In-process FAQ store.
#[derive(Debug, Default)]
pub struct InMemoryFaqs {
    faqs: RwLock<Vec<Faq>>,
}

impl InMemoryFaqs {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FaqService for InMemoryFaqs {
    fn create(&self, request: FaqRequest) -> ServiceResult<Faq> {
        let now = Utc::now();
        let faq = Faq {
            id: FaqId::generate(),
            question: request.question,
            answer: request.answer,
            category: request.category,
            product_id: request.product_id,
            is_published: request.is_published,
            created_at: now,
            updated_at: now,
        };
        write(&self.faqs).push(faq.clone());
        Ok(faq)
    }

    fn list(&self) -> ServiceResult<Vec<Faq>> {
        Ok(read(&self.faqs).clone())
    }

    fn get(&self, id: &FaqId) -> ServiceResult<Faq> {
        read(&self.faqs)
            .iter()
            .find(|f| &f.id == id)
            .cloned()
            .ok_or_else(|| CommerceError::FaqNotFound(id.to_string()))
    }

    fn update(&self, id: &FaqId, update: FaqUpdate) -> ServiceResult<Faq> {
        let mut faqs = write(&self.faqs);
        let faq = faqs
            .iter_mut()
            .find(|f| &f.id == id)
            .ok_or_else(|| CommerceError::FaqNotFound(id.to_string()))?;
        update.apply(faq);
        Ok(faq.clone())
    }

    fn delete(&self, id: &FaqId) -> ServiceResult<()> {
        let mut faqs = write(&self.faqs);
        let before = faqs.len();
        faqs.retain(|f| &f.id != id);
        if faqs.len() == before {
            return Err(CommerceError::FaqNotFound(id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::{filter_faqs, CarePlanDraft, FaqDraft, PublishFilter};

    #[test]
    fn test_care_plan_lifecycle() {
        let service = InMemoryCarePlans::new();
        let product = ProductId::new("prod-1");
        let request = CarePlanDraft {
            product_id: "prod-1".to_string(),
            plan_name: "Care+".to_string(),
            price: "1200".to_string(),
            ..CarePlanDraft::default()
        }
        .validate()
        .unwrap();

        let plan = service.create(&product, request.clone()).unwrap();
        assert_eq!(plan.duration, None);
        assert_eq!(service.list(&product).unwrap().len(), 1);
        assert!(service.list(&ProductId::new("other")).unwrap().is_empty());

        let mut changed = request;
        changed.price = 1500.0;
        let updated = service.update(&plan.id, changed).unwrap();
        assert_eq!(updated.price, 1500.0);
        assert_eq!(service.get(&plan.id).unwrap().price, 1500.0);

        service.delete(&plan.id).unwrap();
        assert!(matches!(
            service.get(&plan.id),
            Err(CommerceError::CarePlanNotFound(_))
        ));
        assert!(service.delete(&plan.id).is_err());
    }

    #[test]
    fn test_faq_publish_flow() {
        let service = InMemoryFaqs::new();
        let request = FaqDraft {
            question: "Is COD available?".to_string(),
            answer: "Yes, inside Dhaka".to_string(),
            ..FaqDraft::default()
        }
        .validate()
        .unwrap();

        let faq = service.create(request).unwrap();
        assert!(!faq.is_published);

        let faqs = service.list().unwrap();
        assert_eq!(filter_faqs(&faqs, "cod", PublishFilter::Draft).len(), 1);

        service.update(&faq.id, FaqUpdate::publish(true)).unwrap();
        let faqs = service.list().unwrap();
        assert_eq!(filter_faqs(&faqs, "cod", PublishFilter::Published).len(), 1);

        service.delete(&faq.id).unwrap();
        assert!(matches!(service.get(&faq.id), Err(CommerceError::FaqNotFound(_))));
    }
}
