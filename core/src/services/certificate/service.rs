//! Certificates are issued when a blood donation completes and can be
//! verified publicly by number. With a minter configured each certificate is
//! also minted to the donor's wallet and the transaction hash recorded.

use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use dc_shared::{PageQuery, Paginated};
use uuid::Uuid;

use crate::domain::entities::certificate::Certificate;
use crate::domain::value_objects::{Actor, CertificateFilter};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::CertificateRepository;
use crate::services::integrations::{CertificateMint, CertificateMinter};
use crate::services::token::TokenService;

/// Attempts at generating a unique certificate number
const CERTIFICATE_NUMBER_RETRIES: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct CertificateVerification {
    pub valid: bool,
    pub certificate: Certificate,
}

/// Donor the certificate is issued to
#[derive(Debug, Clone)]
pub struct CertificateRecipient {
    pub user_id: Uuid,
    pub donation_id: Uuid,
    pub donor_name: String,
    pub wallet_address: Option<String>,
    /// Full address of the hospital where the blood was taken
    pub hospital_address: String,
}

pub struct CertificateService {
    certificates: Arc<dyn CertificateRepository>,
    tokens: Arc<TokenService>,
    minter: Option<Arc<dyn CertificateMinter>>,
}

impl CertificateService {
    pub fn new(certificates: Arc<dyn CertificateRepository>, tokens: Arc<TokenService>) -> Self {
        Self {
            certificates,
            tokens,
            minter: None,
        }
    }

    pub fn with_minter(mut self, minter: Arc<dyn CertificateMinter>) -> Self {
        self.minter = Some(minter);
        self
    }

    pub fn mints_on_chain(&self) -> bool {
        self.minter.is_some()
    }

    async fn find(&self, id: Uuid) -> DomainResult<Certificate> {
        self.certificates
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("sertifikat"))
    }

    /// Issues the certificate for a donation and mints it when a minter is
    /// configured. Safe to call again after a failure: an existing
    /// certificate is reused and only minted if it has no transaction yet.
    pub async fn issue(&self, recipient: &CertificateRecipient) -> DomainResult<Certificate> {
        let certificate = match self
            .certificates
            .find_by_donation(recipient.donation_id)
            .await?
        {
            Some(existing) => existing,
            None => self.create_signed(recipient).await?,
        };
        self.mint(certificate, recipient).await
    }

    async fn create_signed(&self, recipient: &CertificateRecipient) -> DomainResult<Certificate> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let certificate = Certificate::issue(
                recipient.user_id,
                recipient.donation_id,
                self.tokens.secret(),
                Utc::now(),
            )?;
            match self.certificates.create(certificate).await {
                Ok(saved) => {
                    tracing::info!(
                        certificate_number = %saved.certificate_number,
                        donation_id = %recipient.donation_id,
                        "certificate issued"
                    );
                    return Ok(saved);
                }
                Err(e) if e.is_conflict() && attempt < CERTIFICATE_NUMBER_RETRIES => {
                    tracing::warn!(attempt, "certificate number collision, regenerating");
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn mint(
        &self,
        mut certificate: Certificate,
        recipient: &CertificateRecipient,
    ) -> DomainResult<Certificate> {
        let Some(minter) = &self.minter else {
            return Ok(certificate);
        };
        if certificate.is_minted() {
            return Ok(certificate);
        }
        let wallet_address = recipient
            .wallet_address
            .as_deref()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .ok_or_else(|| DomainError::business("alamat wallet diperlukan"))?;

        let receipt = minter
            .mint(&CertificateMint {
                wallet_address: wallet_address.to_string(),
                donor_name: recipient.donor_name.clone(),
                donor_address: recipient.hospital_address.clone(),
                certificate_number: certificate.certificate_number.clone(),
            })
            .await?;

        certificate.record_mint(receipt.tx_hash.clone());
        let certificate = self
            .certificates
            .record_mint(certificate)
            .await
            .map_err(|e| {
                tracing::error!(tx_hash = %receipt.tx_hash, error = %e, "minted certificate not recorded");
                e
            })?;
        tracing::info!(
            certificate_number = %certificate.certificate_number,
            tx_hash = %receipt.tx_hash,
            "certificate minted"
        );
        Ok(certificate)
    }

    pub async fn list_all(
        &self,
        actor: &Actor,
        query: &PageQuery,
    ) -> DomainResult<Paginated<Certificate>> {
        actor.ensure_admin()?;
        self.certificates
            .list(&CertificateFilter::default(), query)
            .await
    }

    pub async fn list_by_user(
        &self,
        actor: &Actor,
        query: &PageQuery,
    ) -> DomainResult<Paginated<Certificate>> {
        let filter = CertificateFilter {
            user_id: Some(actor.user_id),
        };
        self.certificates.list(&filter, query).await
    }

    pub async fn get_by_id(&self, actor: &Actor, id: Uuid) -> DomainResult<Certificate> {
        let certificate = self.find(id).await?;
        actor.ensure_owner(certificate.user_id)?;
        Ok(certificate)
    }

    /// Looks a certificate up by number and checks its signature
    pub async fn verify(&self, number: &str) -> DomainResult<CertificateVerification> {
        let certificate = self
            .certificates
            .find_by_number(number.trim())
            .await?
            .ok_or_else(|| DomainError::not_found("sertifikat"))?;

        let valid = certificate.verify_signature(self.tokens.secret());
        if !valid {
            tracing::warn!(certificate_number = %certificate.certificate_number, "certificate signature mismatch");
        }
        Ok(CertificateVerification { valid, certificate })
    }

    pub async fn delete(&self, actor: &Actor, id: Uuid) -> DomainResult<()> {
        actor.ensure_admin()?;
        if !self.certificates.delete(id).await? {
            return Err(DomainError::not_found("sertifikat"));
        }
        Ok(())
    }
}
