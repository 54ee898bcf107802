//! Mock implementation of BloodRequestRepository for testing

use async_trait::async_trait;
use chrono::NaiveDate;
use dc_shared::{PageQuery, Paginated};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::blood_request::{BloodRequest, EventType, RequestStatus};
use crate::domain::value_objects::{BloodRequestFilter, RequestStats};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::sort_page;

use super::trait_::BloodRequestRepository;

#[derive(Default)]
pub struct MockBloodRequestRepository {
    requests: Arc<RwLock<HashMap<Uuid, BloodRequest>>>,
}

impl MockBloodRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn is_active_campaign(req: &BloodRequest, today: NaiveDate) -> bool {
    req.event_type == EventType::Campaign
        && req.status == RequestStatus::Verified
        && req.event_date >= today
}

#[async_trait]
impl BloodRequestRepository for MockBloodRequestRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<BloodRequest>> {
        Ok(self.requests.read().await.get(&id).cloned())
    }

    async fn create(&self, request: BloodRequest) -> DomainResult<BloodRequest> {
        let mut requests = self.requests.write().await;
        requests.insert(request.id, request.clone());
        Ok(request)
    }

    async fn update(&self, request: BloodRequest) -> DomainResult<BloodRequest> {
        let mut requests = self.requests.write().await;
        if !requests.contains_key(&request.id) {
            return Err(DomainError::not_found("permintaan darah"));
        }
        requests.insert(request.id, request.clone());
        Ok(request)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        Ok(self.requests.write().await.remove(&id).is_some())
    }

    async fn list(
        &self,
        filter: &BloodRequestFilter,
        query: &PageQuery,
    ) -> DomainResult<Paginated<BloodRequest>> {
        let requests = self.requests.read().await;
        let search = query.search_term();
        let matching = requests
            .values()
            .filter(|r| filter.matches(r, search.as_deref()))
            .cloned()
            .collect();
        Ok(sort_page(matching, query, |r| r.created_at))
    }

    async fn book_slot(&self, id: Uuid) -> DomainResult<bool> {
        let mut requests = self.requests.write().await;
        let request = requests
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("permintaan darah"))?;
        Ok(request.book_slot().is_ok())
    }

    async fn release_slot(&self, id: Uuid) -> DomainResult<bool> {
        let mut requests = self.requests.write().await;
        match requests.get_mut(&id) {
            Some(request) if request.slots_booked > 0 => {
                request.release_slot();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn stats(&self, today: NaiveDate) -> DomainResult<RequestStats> {
        let requests = self.requests.read().await;
        let mut stats = RequestStats::default();
        for req in requests.values() {
            match req.event_type {
                EventType::BloodRequest => stats.total_requests += 1,
                EventType::Campaign => stats.total_campaigns += 1,
            }
            match req.status {
                RequestStatus::Verified => stats.verified += 1,
                RequestStatus::Pending => stats.pending += 1,
                _ => {}
            }
            if is_active_campaign(req, today) {
                stats.active_campaigns += 1;
            }
        }
        Ok(stats)
    }

    async fn latest_active_campaigns(
        &self,
        today: NaiveDate,
        limit: u32,
    ) -> DomainResult<Vec<BloodRequest>> {
        let requests = self.requests.read().await;
        let mut active: Vec<BloodRequest> = requests
            .values()
            .filter(|r| is_active_campaign(r, today))
            .cloned()
            .collect();
        active.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        active.truncate(limit as usize);
        Ok(active)
    }
}
