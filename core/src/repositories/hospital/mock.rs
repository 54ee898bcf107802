//! Mock implementation of HospitalRepository for testing

use async_trait::async_trait;
use dc_shared::{PageQuery, Paginated};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::hospital::Hospital;
use crate::domain::value_objects::filters::hospital_matches;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::sort_page;

use super::trait_::HospitalRepository;

#[derive(Default)]
pub struct MockHospitalRepository {
    hospitals: Arc<RwLock<HashMap<Uuid, Hospital>>>,
}

impl MockHospitalRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HospitalRepository for MockHospitalRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Hospital>> {
        Ok(self.hospitals.read().await.get(&id).cloned())
    }

    async fn create(&self, hospital: Hospital) -> DomainResult<Hospital> {
        let mut hospitals = self.hospitals.write().await;
        hospitals.insert(hospital.id, hospital.clone());
        Ok(hospital)
    }

    async fn update(&self, hospital: Hospital) -> DomainResult<Hospital> {
        let mut hospitals = self.hospitals.write().await;
        if !hospitals.contains_key(&hospital.id) {
            return Err(DomainError::not_found("rumah sakit"));
        }
        hospitals.insert(hospital.id, hospital.clone());
        Ok(hospital)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        Ok(self.hospitals.write().await.remove(&id).is_some())
    }

    async fn list(&self, query: &PageQuery) -> DomainResult<Paginated<Hospital>> {
        let hospitals = self.hospitals.read().await;
        let search = query.search_term();
        let matching = hospitals
            .values()
            .filter(|h| hospital_matches(h, search.as_deref()))
            .cloned()
            .collect();
        Ok(sort_page(matching, query, |h| h.created_at))
    }
}
