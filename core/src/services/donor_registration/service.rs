//! Signups against blood requests and campaigns.
//!
//! Registering books capacity on the campaign and on the optional schedule,
//! and moves a patient blood request to `registered`. Cancelling undoes both.

use chrono::Utc;
use std::sync::Arc;

use dc_shared::{PageQuery, Paginated};
use uuid::Uuid;

use crate::domain::entities::blood_request::{BloodRequest, EventType, RequestStatus};
use crate::domain::entities::donor_registration::{DonorRegistration, RegistrationStatus};
use crate::domain::entities::notification::NotificationType;
use crate::domain::time::jakarta_date;
use crate::domain::value_objects::{Actor, RegistrationFilter};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{
    BloodRequestRepository, DonorRegistrationRepository, DonorScheduleRepository,
};
use crate::services::health_passport::HealthPassportService;
use crate::services::notification::NotificationService;

#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub request_id: Uuid,
    pub schedule_id: Option<Uuid>,
    pub notes: String,
}

#[derive(Debug, Clone, Default)]
pub struct RegistrationPatch {
    pub status: Option<RegistrationStatus>,
    pub notes: Option<String>,
}

pub struct DonorRegistrationService {
    registrations: Arc<dyn DonorRegistrationRepository>,
    requests: Arc<dyn BloodRequestRepository>,
    schedules: Arc<dyn DonorScheduleRepository>,
    passports: Arc<HealthPassportService>,
    notifications: Arc<NotificationService>,
}

impl DonorRegistrationService {
    pub fn new(
        registrations: Arc<dyn DonorRegistrationRepository>,
        requests: Arc<dyn BloodRequestRepository>,
        schedules: Arc<dyn DonorScheduleRepository>,
        passports: Arc<HealthPassportService>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            registrations,
            requests,
            schedules,
            passports,
            notifications,
        }
    }

    async fn find(&self, id: Uuid) -> DomainResult<DonorRegistration> {
        self.registrations
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("pendaftaran donor"))
    }

    async fn find_request(&self, id: Uuid) -> DomainResult<BloodRequest> {
        self.requests
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("permintaan darah"))
    }

    pub async fn register(
        &self,
        actor: &Actor,
        input: NewRegistration,
    ) -> DomainResult<DonorRegistration> {
        let request = self.find_request(input.request_id).await?;

        match request.effective_status(Utc::now()) {
            RequestStatus::Verified => {}
            RequestStatus::Pending => {
                return Err(DomainError::business("permintaan darah belum diverifikasi"))
            }
            _ => {
                return Err(DomainError::business(
                    "permintaan darah tidak tersedia untuk pendaftaran",
                ))
            }
        }

        if self
            .registrations
            .find_active(actor.user_id, request.id)
            .await?
            .is_some()
        {
            return Err(DomainError::conflict(
                "anda sudah terdaftar pada permintaan darah ini",
            ));
        }

        self.passports.require_valid(actor.user_id).await?;

        if let Some(schedule_id) = input.schedule_id {
            let schedule = self
                .schedules
                .find_by_id(schedule_id)
                .await?
                .ok_or_else(|| DomainError::not_found("jadwal donor"))?;
            if !schedule.accepts_bookings() {
                return Err(DomainError::business(
                    "jadwal donor tidak tersedia untuk pendaftaran",
                ));
            }
            if !self.schedules.book_slot(schedule_id).await? {
                return Err(DomainError::business("slot jadwal donor sudah penuh"));
            }
        }

        if request.counts_slots() && !self.requests.book_slot(request.id).await? {
            self.release_schedule(input.schedule_id).await;
            return Err(DomainError::business("slot kampanye sudah penuh"));
        }

        let registration =
            DonorRegistration::new(actor.user_id, request.id, input.schedule_id, input.notes);
        let registration = match self.registrations.create(registration).await {
            Ok(registration) => registration,
            Err(e) => {
                self.release_capacity(&request, input.schedule_id).await;
                return Err(e);
            }
        };

        if request.event_type == EventType::BloodRequest {
            // Re-read so the booked slot count is not overwritten
            let mut current = self.find_request(request.id).await?;
            current.transition_to(RequestStatus::Registered)?;
            self.requests.update(current).await?;
        }

        self.notifications
            .notify_quietly(
                actor.user_id,
                "Pendaftaran donor berhasil",
                &format!("Anda terdaftar sebagai pendonor untuk {}.", request.event_name),
                NotificationType::Registration,
            )
            .await;

        tracing::info!(
            registration_id = %registration.id,
            request_id = %request.id,
            user_id = %actor.user_id,
            "donor registered"
        );
        Ok(registration)
    }

    async fn release_schedule(&self, schedule_id: Option<Uuid>) {
        if let Some(schedule_id) = schedule_id {
            if let Err(e) = self.schedules.release_slot(schedule_id).await {
                tracing::warn!(schedule_id = %schedule_id, error = %e, "failed to release schedule slot");
            }
        }
    }

    async fn release_capacity(&self, request: &BloodRequest, schedule_id: Option<Uuid>) {
        self.release_schedule(schedule_id).await;
        if request.counts_slots() {
            if let Err(e) = self.requests.release_slot(request.id).await {
                tracing::warn!(request_id = %request.id, error = %e, "failed to release campaign slot");
            }
        }
    }

    /// Frees capacity held by a registration and reopens a registered request
    async fn undo_registration(&self, registration: &DonorRegistration) -> DomainResult<()> {
        let request = self.find_request(registration.request_id).await?;
        self.release_capacity(&request, registration.schedule_id).await;

        if request.event_type == EventType::BloodRequest
            && request.status == RequestStatus::Registered
        {
            let mut request = self.find_request(registration.request_id).await?;
            request.transition_to(RequestStatus::Verified)?;
            self.requests.update(request).await?;
        }
        Ok(())
    }

    pub async fn list_all(
        &self,
        actor: &Actor,
        filter: RegistrationFilter,
        query: &PageQuery,
    ) -> DomainResult<Paginated<DonorRegistration>> {
        actor.ensure_admin()?;
        self.registrations.list(&filter, query).await
    }

    pub async fn list_by_user(
        &self,
        actor: &Actor,
        query: &PageQuery,
    ) -> DomainResult<Paginated<DonorRegistration>> {
        let filter = RegistrationFilter {
            user_id: Some(actor.user_id),
            ..Default::default()
        };
        self.registrations.list(&filter, query).await
    }

    pub async fn get_by_id(&self, actor: &Actor, id: Uuid) -> DomainResult<DonorRegistration> {
        let registration = self.find(id).await?;
        actor.ensure_owner(registration.user_id)?;
        Ok(registration)
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        patch: RegistrationPatch,
    ) -> DomainResult<DonorRegistration> {
        let mut registration = self.find(id).await?;
        let previous = registration.status;

        if actor.is_admin() {
            registration.notes = patch.notes.unwrap_or_default();
        } else {
            actor.ensure_owner(registration.user_id)?;
            if registration.status != RegistrationStatus::Registered {
                return Err(DomainError::business(
                    "pendaftaran donor tidak dapat diubah",
                ));
            }
            if let Some(status) = patch.status {
                if status != RegistrationStatus::Cancelled {
                    return Err(DomainError::forbidden(
                        "user hanya dapat membatalkan pendaftaran donor",
                    ));
                }
                let request = self.find_request(registration.request_id).await?;
                if jakarta_date(Utc::now()) >= request.event_date {
                    return Err(DomainError::business(
                        "pendaftaran hanya dapat dibatalkan sebelum tanggal acara",
                    ));
                }
            }
            if let Some(notes) = patch.notes {
                registration.notes = notes;
            }
        }

        if let Some(status) = patch.status {
            registration.transition_to(status)?;
        }
        registration.updated_at = Utc::now();
        let registration = self.registrations.update(registration).await?;

        if previous == RegistrationStatus::Registered
            && registration.status == RegistrationStatus::Cancelled
        {
            self.undo_registration(&registration).await?;
            tracing::info!(registration_id = %registration.id, "donor registration cancelled");
        }
        Ok(registration)
    }

    pub async fn delete(&self, actor: &Actor, id: Uuid) -> DomainResult<()> {
        let registration = self.find(id).await?;
        actor.ensure_owner(registration.user_id)?;

        self.registrations.delete(id).await?;
        if registration.status == RegistrationStatus::Registered {
            self.undo_registration(&registration).await?;
        }
        Ok(())
    }
}
