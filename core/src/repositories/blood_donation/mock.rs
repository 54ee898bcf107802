//! Mock implementation of BloodDonationRepository for testing

use async_trait::async_trait;
use dc_shared::{PageQuery, Paginated};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::blood_donation::BloodDonation;
use crate::domain::value_objects::BloodDonationFilter;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::sort_page;

use super::trait_::BloodDonationRepository;

#[derive(Default)]
pub struct MockBloodDonationRepository {
    donations: Arc<RwLock<HashMap<Uuid, BloodDonation>>>,
    failing_inserts: AtomicBool,
}

impl MockBloodDonationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `create` fail until switched back
    pub fn fail_inserts(&self, failing: bool) {
        self.failing_inserts.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl BloodDonationRepository for MockBloodDonationRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<BloodDonation>> {
        Ok(self.donations.read().await.get(&id).cloned())
    }

    async fn create(&self, donation: BloodDonation) -> DomainResult<BloodDonation> {
        if self.failing_inserts.load(Ordering::SeqCst) {
            return Err(DomainError::internal("blood donation store unavailable"));
        }
        let mut donations = self.donations.write().await;
        donations.insert(donation.id, donation.clone());
        Ok(donation)
    }

    async fn update(&self, donation: BloodDonation) -> DomainResult<BloodDonation> {
        let mut donations = self.donations.write().await;
        if !donations.contains_key(&donation.id) {
            return Err(DomainError::not_found("donor darah"));
        }
        donations.insert(donation.id, donation.clone());
        Ok(donation)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        Ok(self.donations.write().await.remove(&id).is_some())
    }

    async fn list(
        &self,
        filter: &BloodDonationFilter,
        query: &PageQuery,
    ) -> DomainResult<Paginated<BloodDonation>> {
        let donations = self.donations.read().await;
        let matching = donations
            .values()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect();
        Ok(sort_page(matching, query, |d| d.created_at))
    }

    async fn count(&self, filter: &BloodDonationFilter) -> DomainResult<u64> {
        let donations = self.donations.read().await;
        Ok(donations.values().filter(|d| filter.matches(d)).count() as u64)
    }

    async fn count_donors(&self) -> DomainResult<u64> {
        let donations = self.donations.read().await;
        let donors: HashSet<Uuid> = donations.values().map(|d| d.user_id).collect();
        Ok(donors.len() as u64)
    }

    async fn latest_for_user(&self, user_id: Uuid) -> DomainResult<Option<BloodDonation>> {
        let donations = self.donations.read().await;
        Ok(donations
            .values()
            .filter(|d| d.user_id == user_id)
            .max_by_key(|d| (d.donation_date, d.created_at))
            .cloned())
    }
}
