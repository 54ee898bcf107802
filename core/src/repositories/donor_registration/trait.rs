//! Donor registration repository trait.

use async_trait::async_trait;
use dc_shared::{PageQuery, Paginated};
use uuid::Uuid;

use crate::domain::entities::donor_registration::DonorRegistration;
use crate::domain::value_objects::RegistrationFilter;
use crate::errors::DomainResult;

#[async_trait]
pub trait DonorRegistrationRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<DonorRegistration>>;

    /// The user's registration for a request that has not been cancelled
    async fn find_active(
        &self,
        user_id: Uuid,
        request_id: Uuid,
    ) -> DomainResult<Option<DonorRegistration>>;

    async fn create(&self, registration: DonorRegistration) -> DomainResult<DonorRegistration>;

    async fn update(&self, registration: DonorRegistration) -> DomainResult<DonorRegistration>;

    async fn delete(&self, id: Uuid) -> DomainResult<bool>;

    async fn list(
        &self,
        filter: &RegistrationFilter,
        query: &PageQuery,
    ) -> DomainResult<Paginated<DonorRegistration>>;
}
