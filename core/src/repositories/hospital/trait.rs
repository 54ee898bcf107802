//! Hospital repository trait.

use async_trait::async_trait;
use dc_shared::{PageQuery, Paginated};
use uuid::Uuid;

use crate::domain::entities::hospital::Hospital;
use crate::errors::DomainResult;

#[async_trait]
pub trait HospitalRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Hospital>>;

    async fn create(&self, hospital: Hospital) -> DomainResult<Hospital>;

    async fn update(&self, hospital: Hospital) -> DomainResult<Hospital>;

    async fn delete(&self, id: Uuid) -> DomainResult<bool>;

    /// Page through hospitals, searching name, city and province
    async fn list(&self, query: &PageQuery) -> DomainResult<Paginated<Hospital>>;
}
