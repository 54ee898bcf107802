//! Mock implementation of HealthPassportRepository for testing

use async_trait::async_trait;
use dc_shared::{PageQuery, Paginated};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::health_passport::HealthPassport;
use crate::domain::value_objects::PassportFilter;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::sort_page;

use super::trait_::HealthPassportRepository;

#[derive(Default)]
pub struct MockHealthPassportRepository {
    passports: Arc<RwLock<HashMap<Uuid, HealthPassport>>>,
}

impl MockHealthPassportRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn number_taken(passports: &HashMap<Uuid, HealthPassport>, candidate: &HealthPassport) -> bool {
    passports
        .values()
        .any(|p| p.id != candidate.id && p.passport_number == candidate.passport_number)
}

#[async_trait]
impl HealthPassportRepository for MockHealthPassportRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<HealthPassport>> {
        Ok(self.passports.read().await.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: Uuid) -> DomainResult<Option<HealthPassport>> {
        let passports = self.passports.read().await;
        Ok(passports.values().find(|p| p.user_id == user_id).cloned())
    }

    async fn create(&self, passport: HealthPassport) -> DomainResult<HealthPassport> {
        let mut passports = self.passports.write().await;
        if number_taken(&passports, &passport) {
            return Err(DomainError::conflict("nomor paspor sudah digunakan"));
        }
        passports.insert(passport.id, passport.clone());
        Ok(passport)
    }

    async fn update(&self, passport: HealthPassport) -> DomainResult<HealthPassport> {
        let mut passports = self.passports.write().await;
        if !passports.contains_key(&passport.id) {
            return Err(DomainError::not_found("paspor kesehatan"));
        }
        if number_taken(&passports, &passport) {
            return Err(DomainError::conflict("nomor paspor sudah digunakan"));
        }
        passports.insert(passport.id, passport.clone());
        Ok(passport)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        Ok(self.passports.write().await.remove(&id).is_some())
    }

    async fn list(
        &self,
        filter: &PassportFilter,
        query: &PageQuery,
    ) -> DomainResult<Paginated<HealthPassport>> {
        let passports = self.passports.read().await;
        let search = query.search_term();
        let matching = passports
            .values()
            .filter(|p| filter.matches(p, search.as_deref()))
            .cloned()
            .collect();
        Ok(sort_page(matching, query, |p| p.created_at))
    }
}
