//! Health passport repository trait.

use async_trait::async_trait;
use dc_shared::{PageQuery, Paginated};
use uuid::Uuid;

use crate::domain::entities::health_passport::HealthPassport;
use crate::domain::value_objects::PassportFilter;
use crate::errors::DomainResult;

#[async_trait]
pub trait HealthPassportRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<HealthPassport>>;

    /// A user holds at most one passport
    async fn find_by_user(&self, user_id: Uuid) -> DomainResult<Option<HealthPassport>>;

    /// `Err(DomainError::Conflict)` when the passport number is taken
    async fn create(&self, passport: HealthPassport) -> DomainResult<HealthPassport>;

    /// `Err(DomainError::Conflict)` when the passport number is taken
    async fn update(&self, passport: HealthPassport) -> DomainResult<HealthPassport>;

    async fn delete(&self, id: Uuid) -> DomainResult<bool>;

    /// Filtered page; search covers passport number and holder name
    async fn list(
        &self,
        filter: &PassportFilter,
        query: &PageQuery,
    ) -> DomainResult<Paginated<HealthPassport>>;
}
