//! Records physical donations. Completing a donation issues its certificate.
//!
//! Writes spanning two records are ordered so a failure leaves nothing half
//! done: the certificate exists before a donation is stored as completed, and
//! a registration consumed by a donation is restored if the insert fails.

use chrono::{NaiveDate, Utc};
use std::sync::Arc;

use dc_shared::{validation, PageQuery, Paginated};
use uuid::Uuid;

use crate::domain::entities::blood_donation::{BloodDonation, BloodDonationStatus};
use crate::domain::entities::certificate::Certificate;
use crate::domain::entities::donor_registration::{DonorRegistration, RegistrationStatus};
use crate::domain::entities::notification::NotificationType;
use crate::domain::value_objects::{Actor, BloodDonationFilter};
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::{
    BloodDonationRepository, DonorRegistrationRepository, HospitalRepository, UserRepository,
};
use crate::services::certificate::{CertificateRecipient, CertificateService};
use crate::services::integrations::{ImageStorage, ImageUpload};
use crate::services::notification::NotificationService;

const DONATION_IMAGE_FOLDER: &str = "darah-connect/donations";

#[derive(Debug, Clone)]
pub struct NewBloodDonation {
    pub registration_id: Uuid,
    pub hospital_id: Uuid,
    pub donation_date: NaiveDate,
    pub blood_type: String,
    pub image: Option<ImageUpload>,
}

#[derive(Debug, Clone, Default)]
pub struct BloodDonationPatch {
    pub hospital_id: Option<Uuid>,
    pub donation_date: Option<NaiveDate>,
    pub blood_type: Option<String>,
    pub image: Option<ImageUpload>,
}

pub struct BloodDonationService {
    donations: Arc<dyn BloodDonationRepository>,
    registrations: Arc<dyn DonorRegistrationRepository>,
    hospitals: Arc<dyn HospitalRepository>,
    users: Arc<dyn UserRepository>,
    certificates: Arc<CertificateService>,
    notifications: Arc<NotificationService>,
    images: Arc<dyn ImageStorage>,
}

impl BloodDonationService {
    pub fn new(
        donations: Arc<dyn BloodDonationRepository>,
        registrations: Arc<dyn DonorRegistrationRepository>,
        hospitals: Arc<dyn HospitalRepository>,
        users: Arc<dyn UserRepository>,
        certificates: Arc<CertificateService>,
        notifications: Arc<NotificationService>,
        images: Arc<dyn ImageStorage>,
    ) -> Self {
        Self {
            donations,
            registrations,
            hospitals,
            users,
            certificates,
            notifications,
            images,
        }
    }

    async fn find(&self, id: Uuid) -> DomainResult<BloodDonation> {
        self.donations
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("donor darah"))
    }

    async fn ensure_hospital(&self, hospital_id: Uuid) -> DomainResult<()> {
        if self.hospitals.find_by_id(hospital_id).await?.is_none() {
            return Err(DomainError::not_found("rumah sakit"));
        }
        Ok(())
    }

    /// Uploads a new image and returns the replaced public id, if any
    async fn attach_image(
        &self,
        donation: &mut BloodDonation,
        image: ImageUpload,
    ) -> DomainResult<Option<String>> {
        let uploaded = self
            .images
            .upload(image.bytes, &image.content_type, DONATION_IMAGE_FOLDER)
            .await?;
        donation.image_url = Some(uploaded.url);
        Ok(donation.image_public_id.replace(uploaded.public_id))
    }

    async fn delete_image(&self, public_id: Option<String>) {
        if let Some(public_id) = public_id {
            if let Err(e) = self.images.delete(&public_id).await {
                tracing::warn!(public_id = %public_id, error = %e, "failed to delete donation image");
            }
        }
    }

    /// Donor details for the certificate of `donation`
    async fn recipient(&self, donation: &BloodDonation) -> DomainResult<CertificateRecipient> {
        let user = self
            .users
            .find_by_id(donation.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("user"))?;
        let hospital_address = self
            .hospitals
            .find_by_id(donation.hospital_id)
            .await?
            .map(|h| format!("{}, {}, {}", h.address, h.city, h.province))
            .unwrap_or_default();

        Ok(CertificateRecipient {
            user_id: donation.user_id,
            donation_id: donation.id,
            donor_name: user.name,
            wallet_address: user.wallet_address,
            hospital_address,
        })
    }

    async fn ensure_wallet(&self, user_id: Uuid) -> DomainResult<()> {
        if !self.certificates.mints_on_chain() {
            return Ok(());
        }
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("user"))?;
        if user.wallet_address.as_deref().map_or(true, |w| w.trim().is_empty()) {
            return Err(DomainError::validation("alamat wallet diperlukan"));
        }
        Ok(())
    }

    /// Puts a consumed registration back after the donation insert failed
    async fn restore_registration(&self, previous: DonorRegistration) {
        let registration_id = previous.id;
        if let Err(e) = self.registrations.update(previous).await {
            tracing::error!(registration_id = %registration_id, error = %e, "failed to restore donor registration");
        }
    }

    pub async fn create(
        &self,
        actor: &Actor,
        input: NewBloodDonation,
    ) -> DomainResult<BloodDonation> {
        let registration = self
            .registrations
            .find_by_id(input.registration_id)
            .await?
            .ok_or_else(|| DomainError::not_found("pendaftaran donor"))?;
        actor.ensure_owner(registration.user_id)?;

        if !validation::is_valid_blood_type(&input.blood_type) {
            return Err(ValidationError::InvalidBloodType.into());
        }
        self.ensure_hospital(input.hospital_id).await?;
        if registration.status != RegistrationStatus::Registered {
            return Err(DomainError::business(format!(
                "pendaftaran donor dengan status {} tidak dapat dicatat sebagai donor darah",
                registration.status
            )));
        }
        self.ensure_wallet(registration.user_id).await?;

        let previous = registration.clone();
        let mut registration = registration;
        registration.transition_to(RegistrationStatus::Completed)?;

        let mut donation = BloodDonation::new(
            registration.user_id,
            input.hospital_id,
            registration.id,
            input.donation_date,
            input.blood_type.trim().to_uppercase(),
        );
        if let Some(image) = input.image {
            self.attach_image(&mut donation, image).await?;
        }

        if let Err(e) = self.registrations.update(registration).await {
            self.delete_image(donation.image_public_id.take()).await;
            return Err(e);
        }
        let donation = match self.donations.create(donation.clone()).await {
            Ok(saved) => saved,
            Err(e) => {
                self.restore_registration(previous).await;
                self.delete_image(donation.image_public_id).await;
                return Err(e);
            }
        };

        tracing::info!(donation_id = %donation.id, user_id = %donation.user_id, "blood donation recorded");
        Ok(donation)
    }

    pub async fn list_all(
        &self,
        actor: &Actor,
        filter: BloodDonationFilter,
        query: &PageQuery,
    ) -> DomainResult<Paginated<BloodDonation>> {
        actor.ensure_admin()?;
        self.donations.list(&filter, query).await
    }

    pub async fn list_by_user(
        &self,
        actor: &Actor,
        query: &PageQuery,
    ) -> DomainResult<Paginated<BloodDonation>> {
        let filter = BloodDonationFilter {
            user_id: Some(actor.user_id),
            ..Default::default()
        };
        self.donations.list(&filter, query).await
    }

    pub async fn get_by_id(&self, actor: &Actor, id: Uuid) -> DomainResult<BloodDonation> {
        let donation = self.find(id).await?;
        actor.ensure_owner(donation.user_id)?;
        Ok(donation)
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        patch: BloodDonationPatch,
    ) -> DomainResult<BloodDonation> {
        let mut donation = self.find(id).await?;
        actor.ensure_owner(donation.user_id)?;
        if !actor.is_admin() && donation.is_completed() {
            return Err(DomainError::business(
                "donor darah yang sudah selesai tidak dapat diubah",
            ));
        }

        if let Some(hospital_id) = patch.hospital_id {
            self.ensure_hospital(hospital_id).await?;
            donation.hospital_id = hospital_id;
        }
        if let Some(date) = patch.donation_date {
            donation.donation_date = date;
        }
        if let Some(blood_type) = patch.blood_type.filter(|v| !v.trim().is_empty()) {
            if !validation::is_valid_blood_type(&blood_type) {
                return Err(ValidationError::InvalidBloodType.into());
            }
            donation.blood_type = blood_type.trim().to_uppercase();
        }
        let replaced = match patch.image {
            Some(image) => self.attach_image(&mut donation, image).await?,
            None => None,
        };

        donation.updated_at = Utc::now();
        let donation = self.donations.update(donation).await?;
        self.delete_image(replaced).await;
        Ok(donation)
    }

    /// Moves a pending donation. Completion issues the certificate first so
    /// a failed issuance leaves the donation pending and retryable.
    pub async fn update_status(
        &self,
        actor: &Actor,
        id: Uuid,
        status: BloodDonationStatus,
    ) -> DomainResult<BloodDonation> {
        actor.ensure_admin()?;
        let mut donation = self.find(id).await?;
        donation.transition_to(status)?;

        let certificate = if donation.is_completed() {
            let recipient = self.recipient(&donation).await?;
            Some(self.certificates.issue(&recipient).await?)
        } else {
            None
        };
        let donation = self.donations.update(donation).await?;

        match certificate {
            Some(certificate) => {
                self.notifications
                    .notify_quietly(
                        donation.user_id,
                        "Sertifikat donor diterbitkan",
                        &certificate_message(&certificate),
                        NotificationType::Certificate,
                    )
                    .await;
            }
            None => {
                self.notifications
                    .notify_quietly(
                        donation.user_id,
                        "Status donor darah diperbarui",
                        &format!("Status donor darah anda sekarang {}.", donation.status),
                        NotificationType::Donation,
                    )
                    .await;
            }
        }

        tracing::info!(donation_id = %donation.id, status = %donation.status, "blood donation status updated");
        Ok(donation)
    }

    pub async fn delete(&self, actor: &Actor, id: Uuid) -> DomainResult<()> {
        let donation = self.find(id).await?;
        actor.ensure_owner(donation.user_id)?;
        if !actor.is_admin() && donation.is_completed() {
            return Err(DomainError::business(
                "donor darah yang sudah selesai tidak dapat dihapus",
            ));
        }

        self.donations.delete(id).await?;
        self.delete_image(donation.image_public_id).await;
        Ok(())
    }
}

fn certificate_message(certificate: &Certificate) -> String {
    let mut message = format!(
        "Terima kasih telah mendonorkan darah. Nomor sertifikat anda: {}",
        certificate.certificate_number
    );
    if let Some(tx_hash) = &certificate.tx_hash {
        message.push_str(&format!(". Transaction hash: {}", tx_hash));
    }
    message
}
