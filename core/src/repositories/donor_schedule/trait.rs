//! Donor schedule repository trait.

use async_trait::async_trait;
use dc_shared::{PageQuery, Paginated};
use uuid::Uuid;

use crate::domain::entities::donor_schedule::DonorSchedule;
use crate::domain::value_objects::DonorScheduleFilter;
use crate::errors::DomainResult;

#[async_trait]
pub trait DonorScheduleRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<DonorSchedule>>;

    async fn create(&self, schedule: DonorSchedule) -> DomainResult<DonorSchedule>;

    async fn update(&self, schedule: DonorSchedule) -> DomainResult<DonorSchedule>;

    async fn delete(&self, id: Uuid) -> DomainResult<bool>;

    /// Filtered page; search covers event name and hospital name
    async fn list(
        &self,
        filter: &DonorScheduleFilter,
        query: &PageQuery,
    ) -> DomainResult<Paginated<DonorSchedule>>;

    /// Atomically books one slot of an upcoming schedule. `Ok(false)` when full.
    async fn book_slot(&self, id: Uuid) -> DomainResult<bool>;

    async fn release_slot(&self, id: Uuid) -> DomainResult<bool>;
}
