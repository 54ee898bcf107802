//! Mock implementation of DonationRepository for testing

use async_trait::async_trait;
use dc_shared::{PageQuery, Paginated};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::donation::{Donation, PaymentStatus};
use crate::domain::value_objects::DonationFilter;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::sort_page;

use super::trait_::DonationRepository;

#[derive(Default)]
pub struct MockDonationRepository {
    donations: Arc<RwLock<HashMap<Uuid, Donation>>>,
}

impl MockDonationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DonationRepository for MockDonationRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Donation>> {
        Ok(self.donations.read().await.get(&id).cloned())
    }

    async fn find_by_order_id(&self, order_id: &str) -> DomainResult<Option<Donation>> {
        let donations = self.donations.read().await;
        Ok(donations.values().find(|d| d.order_id == order_id).cloned())
    }

    async fn create(&self, donation: Donation) -> DomainResult<Donation> {
        let mut donations = self.donations.write().await;
        if donations.values().any(|d| d.order_id == donation.order_id) {
            return Err(DomainError::conflict("order id sudah digunakan"));
        }
        donations.insert(donation.id, donation.clone());
        Ok(donation)
    }

    async fn update(&self, donation: Donation) -> DomainResult<Donation> {
        let mut donations = self.donations.write().await;
        if !donations.contains_key(&donation.id) {
            return Err(DomainError::not_found("donasi"));
        }
        donations.insert(donation.id, donation.clone());
        Ok(donation)
    }

    async fn list(
        &self,
        filter: &DonationFilter,
        query: &PageQuery,
    ) -> DomainResult<Paginated<Donation>> {
        let donations = self.donations.read().await;
        let search = query.search_term();
        let matching = donations
            .values()
            .filter(|d| filter.matches(d, search.as_deref()))
            .cloned()
            .collect();
        Ok(sort_page(matching, query, |d| d.created_at))
    }

    async fn total_amount(&self, status: PaymentStatus) -> DomainResult<i64> {
        let donations = self.donations.read().await;
        Ok(donations
            .values()
            .filter(|d| d.status == status)
            .map(|d| d.amount)
            .sum())
    }
}
