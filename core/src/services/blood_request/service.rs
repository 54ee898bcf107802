//! Main blood request service implementation

use chrono::Utc;
use std::sync::Arc;

use dc_shared::{validation, PageQuery, Paginated};
use uuid::Uuid;

use crate::domain::entities::blood_request::{BloodRequest, RequestStatus};
use crate::domain::entities::donor_schedule::validate_window;
use crate::domain::entities::notification::NotificationType;
use crate::domain::value_objects::{Actor, BloodRequestFilter};
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::{BloodRequestRepository, HospitalRepository};
use crate::services::integrations::ImageStorage;
use crate::services::notification::NotificationService;

use super::types::{BloodRequestPatch, NewBloodRequest, NewCampaign};

const CAMPAIGN_IMAGE_FOLDER: &str = "darah-connect/campaigns";

fn with_effective_status(mut request: BloodRequest) -> BloodRequest {
    request.status = request.effective_status(Utc::now());
    request
}

fn validate_blood_type(blood_type: &str) -> DomainResult<()> {
    if !validation::is_valid_blood_type(blood_type) {
        return Err(ValidationError::InvalidBloodType.into());
    }
    Ok(())
}

fn validate_quantity(quantity: i32) -> DomainResult<()> {
    if quantity < 1 {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: "1".to_string(),
            max: i32::MAX.to_string(),
        }
        .into());
    }
    Ok(())
}

pub struct BloodRequestService {
    requests: Arc<dyn BloodRequestRepository>,
    hospitals: Arc<dyn HospitalRepository>,
    notifications: Arc<NotificationService>,
    images: Arc<dyn ImageStorage>,
}

impl BloodRequestService {
    pub fn new(
        requests: Arc<dyn BloodRequestRepository>,
        hospitals: Arc<dyn HospitalRepository>,
        notifications: Arc<NotificationService>,
        images: Arc<dyn ImageStorage>,
    ) -> Self {
        Self {
            requests,
            hospitals,
            notifications,
            images,
        }
    }

    async fn ensure_hospital(&self, hospital_id: Uuid) -> DomainResult<()> {
        if self.hospitals.find_by_id(hospital_id).await?.is_none() {
            return Err(DomainError::not_found("rumah sakit"));
        }
        Ok(())
    }

    async fn find(&self, id: Uuid) -> DomainResult<BloodRequest> {
        self.requests
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("permintaan darah"))
    }

    /// Creates a pending blood request for the caller
    pub async fn create_request(
        &self,
        actor: &Actor,
        input: NewBloodRequest,
    ) -> DomainResult<BloodRequest> {
        if input.patient_name.trim().is_empty() {
            return Err(ValidationError::required("patient_name").into());
        }
        validate_blood_type(&input.blood_type)?;
        validate_quantity(input.quantity)?;
        self.ensure_hospital(input.hospital_id).await?;

        let request = BloodRequest::new_request(
            actor.user_id,
            input.hospital_id,
            input.patient_name.trim().to_string(),
            input.event_name,
            input.event_date,
            input.blood_type.trim().to_uppercase(),
            input.quantity,
            input.urgency_level,
            input.diagnosis,
            input.expiry_date,
        );
        let request = self.requests.create(request).await?;

        self.notifications
            .notify_quietly(
                actor.user_id,
                "Permintaan darah dibuat",
                &format!(
                    "Permintaan darah untuk {} sedang menunggu verifikasi.",
                    request.patient_name
                ),
                NotificationType::Request,
            )
            .await;

        tracing::info!(request_id = %request.id, user_id = %actor.user_id, "blood request created");
        Ok(request)
    }

    /// Creates a verified donation campaign
    pub async fn create_campaign(
        &self,
        actor: &Actor,
        input: NewCampaign,
    ) -> DomainResult<BloodRequest> {
        actor.ensure_admin()?;
        if input.event_name.trim().is_empty() {
            return Err(ValidationError::required("event_name").into());
        }
        if !input.blood_type.is_empty() {
            validate_blood_type(&input.blood_type)?;
        }
        self.ensure_hospital(input.hospital_id).await?;

        let mut campaign = BloodRequest::new_campaign(
            actor.user_id,
            input.hospital_id,
            input.event_name.trim().to_string(),
            input.event_date,
            input.start_time,
            input.end_time,
            input.slots_available,
        )?;
        campaign.blood_type = input.blood_type.trim().to_uppercase();
        campaign.diagnosis = input.diagnosis;

        if let Some(image) = input.image {
            let uploaded = self
                .images
                .upload(image.bytes, &image.content_type, CAMPAIGN_IMAGE_FOLDER)
                .await?;
            campaign.image_url = Some(uploaded.url);
            campaign.image_public_id = Some(uploaded.public_id);
        }

        let campaign = self.requests.create(campaign).await?;
        tracing::info!(campaign_id = %campaign.id, "campaign created");
        Ok(campaign)
    }

    pub async fn list_all(
        &self,
        actor: &Actor,
        filter: BloodRequestFilter,
        query: &PageQuery,
    ) -> DomainResult<Paginated<BloodRequest>> {
        actor.ensure_admin()?;
        Ok(self
            .requests
            .list(&filter, query)
            .await?
            .map(with_effective_status))
    }

    pub async fn list_by_user(
        &self,
        actor: &Actor,
        mut filter: BloodRequestFilter,
        query: &PageQuery,
    ) -> DomainResult<Paginated<BloodRequest>> {
        filter.user_id = Some(actor.user_id);
        Ok(self
            .requests
            .list(&filter, query)
            .await?
            .map(with_effective_status))
    }

    /// Public listing of verified campaigns
    pub async fn list_campaigns(
        &self,
        mut filter: BloodRequestFilter,
        query: &PageQuery,
    ) -> DomainResult<Paginated<BloodRequest>> {
        let campaigns = BloodRequestFilter::campaigns();
        filter.event_type = campaigns.event_type;
        filter.status = campaigns.status;
        filter.user_id = None;
        self.requests.list(&filter, query).await
    }

    /// Public read of a single verified campaign
    pub async fn get_campaign(&self, id: Uuid) -> DomainResult<BloodRequest> {
        let request = self.find(id).await?;
        if !request.is_campaign() || request.status != RequestStatus::Verified {
            return Err(DomainError::not_found("kampanye"));
        }
        Ok(request)
    }

    /// Owner or admin; verified campaigns are readable by anyone logged in
    pub async fn get_by_id(&self, actor: &Actor, id: Uuid) -> DomainResult<BloodRequest> {
        let request = self.find(id).await?;
        let public = request.is_campaign() && request.status == RequestStatus::Verified;
        if !public {
            actor.ensure_owner(request.user_id)?;
        }
        Ok(with_effective_status(request))
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        patch: BloodRequestPatch,
    ) -> DomainResult<BloodRequest> {
        let mut request = self.find(id).await?;

        if !actor.is_admin() {
            actor.ensure_owner(request.user_id)?;
            if matches!(
                request.status,
                RequestStatus::Completed | RequestStatus::Verified
            ) {
                return Err(DomainError::business(format!(
                    "permintaan darah dengan status {} tidak dapat diubah",
                    request.status
                )));
            }
            if let Some(status) = patch.status {
                if status != RequestStatus::Cancelled {
                    return Err(DomainError::forbidden(
                        "user hanya dapat membatalkan permintaan darah",
                    ));
                }
            }
        }

        if patch.has_field_changes() && request.status.is_terminal() {
            return Err(DomainError::business(format!(
                "permintaan darah dengan status {} tidak dapat diubah",
                request.status
            )));
        }

        if let Some(hospital_id) = patch.hospital_id {
            self.ensure_hospital(hospital_id).await?;
            request.hospital_id = hospital_id;
        }
        if let Some(name) = patch.patient_name.filter(|v| !v.trim().is_empty()) {
            request.patient_name = name;
        }
        if let Some(name) = patch.event_name.filter(|v| !v.trim().is_empty()) {
            request.event_name = name;
        }
        if let Some(date) = patch.event_date {
            request.event_date = date;
        }
        if let Some(start) = patch.start_time {
            request.start_time = Some(start);
        }
        if let Some(end) = patch.end_time {
            request.end_time = Some(end);
        }
        if let (Some(start), Some(end)) = (request.start_time, request.end_time) {
            validate_window(start, end)?;
        }
        if let Some(slots) = patch.slots_available {
            if slots < request.slots_booked {
                return Err(DomainError::business(
                    "kapasitas slot tidak boleh kurang dari slot yang sudah dipesan",
                ));
            }
            request.slots_available = slots;
        }
        if let Some(blood_type) = patch.blood_type.filter(|v| !v.trim().is_empty()) {
            validate_blood_type(&blood_type)?;
            request.blood_type = blood_type.trim().to_uppercase();
        }
        if let Some(quantity) = patch.quantity {
            validate_quantity(quantity)?;
            request.quantity = quantity;
        }
        if let Some(urgency) = patch.urgency_level {
            request.urgency_level = urgency;
        }
        if let Some(diagnosis) = patch.diagnosis.filter(|v| !v.trim().is_empty()) {
            request.diagnosis = diagnosis;
        }
        if let Some(expiry) = patch.expiry_date {
            request.expiry_date = Some(expiry);
        }
        if let Some(status) = patch.status {
            request.transition_to(status)?;
        }

        request.touch();
        let request = self.requests.update(request).await?;
        Ok(with_effective_status(request))
    }

    /// Admin status change; the requester is notified
    pub async fn update_status(
        &self,
        actor: &Actor,
        id: Uuid,
        status: RequestStatus,
    ) -> DomainResult<BloodRequest> {
        actor.ensure_admin()?;
        let mut request = self.find(id).await?;
        request.transition_to(status)?;
        let request = self.requests.update(request).await?;

        self.notifications
            .notify_quietly(
                request.user_id,
                "Status permintaan darah diperbarui",
                &format!(
                    "Status permintaan darah {} sekarang {}.",
                    request.event_name, request.status
                ),
                NotificationType::Status,
            )
            .await;

        tracing::info!(request_id = %request.id, status = %request.status, "blood request status updated");
        Ok(request)
    }

    pub async fn delete(&self, actor: &Actor, id: Uuid) -> DomainResult<()> {
        let request = self.find(id).await?;
        if !actor.is_admin() {
            actor.ensure_owner(request.user_id)?;
            if request.status != RequestStatus::Pending {
                return Err(DomainError::business(
                    "hanya permintaan darah berstatus pending yang dapat dihapus",
                ));
            }
        }

        self.requests.delete(id).await?;
        if let Some(public_id) = request.image_public_id.as_deref() {
            if let Err(e) = self.images.delete(public_id).await {
                tracing::warn!(public_id = %public_id, error = %e, "failed to delete campaign image");
            }
        }
        Ok(())
    }
}
