//! Mock implementation of CertificateRepository for testing

use async_trait::async_trait;
use dc_shared::{PageQuery, Paginated};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::certificate::Certificate;
use crate::domain::value_objects::CertificateFilter;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::sort_page;

use super::trait_::CertificateRepository;

#[derive(Default)]
pub struct MockCertificateRepository {
    certificates: Arc<RwLock<HashMap<Uuid, Certificate>>>,
    failing_writes: AtomicBool,
}

impl MockCertificateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write fail as if the database were down
    pub fn fail_writes(&self, failing: bool) {
        self.failing_writes.store(failing, Ordering::SeqCst);
    }

    fn check_writable(&self) -> DomainResult<()> {
        if self.failing_writes.load(Ordering::SeqCst) {
            return Err(DomainError::internal("certificate store unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl CertificateRepository for MockCertificateRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Certificate>> {
        Ok(self.certificates.read().await.get(&id).cloned())
    }

    async fn find_by_number(&self, number: &str) -> DomainResult<Option<Certificate>> {
        let certificates = self.certificates.read().await;
        Ok(certificates
            .values()
            .find(|c| c.certificate_number == number)
            .cloned())
    }

    async fn find_by_donation(&self, donation_id: Uuid) -> DomainResult<Option<Certificate>> {
        let certificates = self.certificates.read().await;
        Ok(certificates
            .values()
            .find(|c| c.donation_id == donation_id)
            .cloned())
    }

    async fn create(&self, certificate: Certificate) -> DomainResult<Certificate> {
        self.check_writable()?;
        let mut certificates = self.certificates.write().await;
        if certificates
            .values()
            .any(|c| c.certificate_number == certificate.certificate_number)
        {
            return Err(DomainError::conflict("nomor sertifikat sudah digunakan"));
        }
        certificates.insert(certificate.id, certificate.clone());
        Ok(certificate)
    }

    async fn record_mint(&self, certificate: Certificate) -> DomainResult<Certificate> {
        self.check_writable()?;
        let mut certificates = self.certificates.write().await;
        let stored = certificates
            .get_mut(&certificate.id)
            .ok_or_else(|| DomainError::not_found("sertifikat"))?;
        stored.tx_hash = certificate.tx_hash.clone();
        stored.updated_at = certificate.updated_at;
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        Ok(self.certificates.write().await.remove(&id).is_some())
    }

    async fn list(
        &self,
        filter: &CertificateFilter,
        query: &PageQuery,
    ) -> DomainResult<Paginated<Certificate>> {
        let certificates = self.certificates.read().await;
        let search = query.search_term();
        let matching = certificates
            .values()
            .filter(|c| filter.matches(c, search.as_deref()))
            .cloned()
            .collect();
        Ok(sort_page(matching, query, |c| c.created_at))
    }
}
