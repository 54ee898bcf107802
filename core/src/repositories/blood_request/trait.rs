//! Blood request repository trait. Requests and campaigns share one table.

use async_trait::async_trait;
use chrono::NaiveDate;
use dc_shared::{PageQuery, Paginated};
use uuid::Uuid;

use crate::domain::entities::blood_request::BloodRequest;
use crate::domain::value_objects::{BloodRequestFilter, RequestStats};
use crate::errors::DomainResult;

#[async_trait]
pub trait BloodRequestRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<BloodRequest>>;

    async fn create(&self, request: BloodRequest) -> DomainResult<BloodRequest>;

    async fn update(&self, request: BloodRequest) -> DomainResult<BloodRequest>;

    async fn delete(&self, id: Uuid) -> DomainResult<bool>;

    /// Filtered page of requests and campaigns
    async fn list(
        &self,
        filter: &BloodRequestFilter,
        query: &PageQuery,
    ) -> DomainResult<Paginated<BloodRequest>>;

    /// Atomically takes one campaign slot.
    ///
    /// # Returns
    /// * `Ok(true)` - A slot was booked
    /// * `Ok(false)` - Capacity was already exhausted
    async fn book_slot(&self, id: Uuid) -> DomainResult<bool>;

    /// Returns one slot; a counter already at zero is left untouched
    async fn release_slot(&self, id: Uuid) -> DomainResult<bool>;

    /// Dashboard counters; campaigns count as active when verified and dated
    /// on or after `today`
    async fn stats(&self, today: NaiveDate) -> DomainResult<RequestStats>;

    /// Most recently created active campaigns
    async fn latest_active_campaigns(
        &self,
        today: NaiveDate,
        limit: u32,
    ) -> DomainResult<Vec<BloodRequest>>;
}
