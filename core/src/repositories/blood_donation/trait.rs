//! Blood donation repository trait.

use async_trait::async_trait;
use dc_shared::{PageQuery, Paginated};
use uuid::Uuid;

use crate::domain::entities::blood_donation::BloodDonation;
use crate::domain::value_objects::BloodDonationFilter;
use crate::errors::DomainResult;

#[async_trait]
pub trait BloodDonationRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<BloodDonation>>;

    async fn create(&self, donation: BloodDonation) -> DomainResult<BloodDonation>;

    async fn update(&self, donation: BloodDonation) -> DomainResult<BloodDonation>;

    async fn delete(&self, id: Uuid) -> DomainResult<bool>;

    async fn list(
        &self,
        filter: &BloodDonationFilter,
        query: &PageQuery,
    ) -> DomainResult<Paginated<BloodDonation>>;

    async fn count(&self, filter: &BloodDonationFilter) -> DomainResult<u64>;

    /// Number of distinct users with at least one recorded donation
    async fn count_donors(&self) -> DomainResult<u64>;

    /// The user's donation with the latest `donation_date`
    async fn latest_for_user(&self, user_id: Uuid) -> DomainResult<Option<BloodDonation>>;
}
