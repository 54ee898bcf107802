//! Certificate repository trait.

use async_trait::async_trait;
use dc_shared::{PageQuery, Paginated};
use uuid::Uuid;

use crate::domain::entities::certificate::Certificate;
use crate::domain::value_objects::CertificateFilter;
use crate::errors::DomainResult;

#[async_trait]
pub trait CertificateRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Certificate>>;

    async fn find_by_number(&self, number: &str) -> DomainResult<Option<Certificate>>;

    async fn find_by_donation(&self, donation_id: Uuid) -> DomainResult<Option<Certificate>>;

    /// `Err(DomainError::Conflict)` when the certificate number is taken
    async fn create(&self, certificate: Certificate) -> DomainResult<Certificate>;

    /// Persists the on-chain mint of an existing certificate
    async fn record_mint(&self, certificate: Certificate) -> DomainResult<Certificate>;

    async fn delete(&self, id: Uuid) -> DomainResult<bool>;

    async fn list(
        &self,
        filter: &CertificateFilter,
        query: &PageQuery,
    ) -> DomainResult<Paginated<Certificate>>;
}
