//! Mock implementation of DonorScheduleRepository for testing

use async_trait::async_trait;
use dc_shared::{PageQuery, Paginated};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::donor_schedule::DonorSchedule;
use crate::domain::value_objects::DonorScheduleFilter;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::sort_page;

use super::trait_::DonorScheduleRepository;

#[derive(Default)]
pub struct MockDonorScheduleRepository {
    schedules: Arc<RwLock<HashMap<Uuid, DonorSchedule>>>,
}

impl MockDonorScheduleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DonorScheduleRepository for MockDonorScheduleRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<DonorSchedule>> {
        Ok(self.schedules.read().await.get(&id).cloned())
    }

    async fn create(&self, schedule: DonorSchedule) -> DomainResult<DonorSchedule> {
        let mut schedules = self.schedules.write().await;
        schedules.insert(schedule.id, schedule.clone());
        Ok(schedule)
    }

    async fn update(&self, schedule: DonorSchedule) -> DomainResult<DonorSchedule> {
        let mut schedules = self.schedules.write().await;
        if !schedules.contains_key(&schedule.id) {
            return Err(DomainError::not_found("jadwal donor"));
        }
        schedules.insert(schedule.id, schedule.clone());
        Ok(schedule)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        Ok(self.schedules.write().await.remove(&id).is_some())
    }

    async fn list(
        &self,
        filter: &DonorScheduleFilter,
        query: &PageQuery,
    ) -> DomainResult<Paginated<DonorSchedule>> {
        let schedules = self.schedules.read().await;
        let search = query.search_term();
        let matching = schedules
            .values()
            .filter(|s| filter.matches(s, search.as_deref()))
            .cloned()
            .collect();
        Ok(sort_page(matching, query, |s| s.created_at))
    }

    async fn book_slot(&self, id: Uuid) -> DomainResult<bool> {
        let mut schedules = self.schedules.write().await;
        let schedule = schedules
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("jadwal donor"))?;
        Ok(schedule.book_slot().is_ok())
    }

    async fn release_slot(&self, id: Uuid) -> DomainResult<bool> {
        let mut schedules = self.schedules.write().await;
        match schedules.get_mut(&id) {
            Some(schedule) if schedule.slots_booked > 0 => {
                schedule.release_slot();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
