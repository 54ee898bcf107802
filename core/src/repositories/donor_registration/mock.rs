//! Mock implementation of DonorRegistrationRepository for testing

use async_trait::async_trait;
use dc_shared::{PageQuery, Paginated};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::donor_registration::DonorRegistration;
use crate::domain::value_objects::RegistrationFilter;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::sort_page;

use super::trait_::DonorRegistrationRepository;

#[derive(Default)]
pub struct MockDonorRegistrationRepository {
    registrations: Arc<RwLock<HashMap<Uuid, DonorRegistration>>>,
}

impl MockDonorRegistrationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DonorRegistrationRepository for MockDonorRegistrationRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<DonorRegistration>> {
        Ok(self.registrations.read().await.get(&id).cloned())
    }

    async fn find_active(
        &self,
        user_id: Uuid,
        request_id: Uuid,
    ) -> DomainResult<Option<DonorRegistration>> {
        let registrations = self.registrations.read().await;
        Ok(registrations
            .values()
            .find(|r| r.user_id == user_id && r.request_id == request_id && r.is_active())
            .cloned())
    }

    async fn create(&self, registration: DonorRegistration) -> DomainResult<DonorRegistration> {
        let mut registrations = self.registrations.write().await;
        registrations.insert(registration.id, registration.clone());
        Ok(registration)
    }

    async fn update(&self, registration: DonorRegistration) -> DomainResult<DonorRegistration> {
        let mut registrations = self.registrations.write().await;
        if !registrations.contains_key(&registration.id) {
            return Err(DomainError::not_found("pendaftaran donor"));
        }
        registrations.insert(registration.id, registration.clone());
        Ok(registration)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        Ok(self.registrations.write().await.remove(&id).is_some())
    }

    async fn list(
        &self,
        filter: &RegistrationFilter,
        query: &PageQuery,
    ) -> DomainResult<Paginated<DonorRegistration>> {
        let registrations = self.registrations.read().await;
        let matching = registrations
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        Ok(sort_page(matching, query, |r| r.created_at))
    }
}
