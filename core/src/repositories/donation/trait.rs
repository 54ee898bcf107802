//! Monetary donation repository trait.

use async_trait::async_trait;
use dc_shared::{PageQuery, Paginated};
use uuid::Uuid;

use crate::domain::entities::donation::{Donation, PaymentStatus};
use crate::domain::value_objects::DonationFilter;
use crate::errors::DomainResult;

#[async_trait]
pub trait DonationRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Donation>>;

    async fn find_by_order_id(&self, order_id: &str) -> DomainResult<Option<Donation>>;

    async fn create(&self, donation: Donation) -> DomainResult<Donation>;

    async fn update(&self, donation: Donation) -> DomainResult<Donation>;

    /// Filtered page; search covers the donor name
    async fn list(
        &self,
        filter: &DonationFilter,
        query: &PageQuery,
    ) -> DomainResult<Paginated<Donation>>;

    /// Sum of `amount` over donations in the given status
    async fn total_amount(&self, status: PaymentStatus) -> DomainResult<i64>;
}
