use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use dc_core::domain::entities::{EventType, RequestStatus, UrgencyLevel};
use dc_core::domain::value_objects::BloodRequestFilter;
use dc_core::services::{BloodRequestPatch, NewBloodRequest, NewCampaign};

use super::common::{
    date, optional_date, optional_image, optional_instant, optional_time, time, ImagePayload,
};
use crate::handlers::ApiError;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBloodRequest {
    pub hospital_id: Uuid,
    #[validate(length(min = 1, max = 100, code = "required"))]
    pub patient_name: String,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub event_name: String,
    pub event_date: String,
    pub blood_type: String,
    #[validate(range(min = 1))]
    pub quantity: i32,
    pub urgency_level: UrgencyLevel,
    #[serde(default)]
    pub diagnosis: String,
    pub expiry_date: Option<String>,
}

impl CreateBloodRequest {
    pub fn into_input(self) -> Result<NewBloodRequest, ApiError> {
        Ok(NewBloodRequest {
            event_date: date("event_date", &self.event_date)?,
            expiry_date: optional_instant("expiry_date", self.expiry_date.as_deref())?,
            hospital_id: self.hospital_id,
            patient_name: self.patient_name,
            event_name: self.event_name,
            blood_type: self.blood_type,
            quantity: self.quantity,
            urgency_level: self.urgency_level,
            diagnosis: self.diagnosis,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCampaignRequest {
    pub hospital_id: Uuid,
    #[validate(length(min = 1, max = 150, code = "required"))]
    pub event_name: String,
    pub event_date: String,
    pub start_time: String,
    pub end_time: String,
    #[validate(range(min = 1))]
    pub slots_available: i32,
    #[serde(default)]
    pub blood_type: String,
    #[serde(default)]
    pub diagnosis: String,
    pub image: Option<ImagePayload>,
}

impl CreateCampaignRequest {
    pub fn into_input(self) -> Result<NewCampaign, ApiError> {
        Ok(NewCampaign {
            event_date: date("event_date", &self.event_date)?,
            start_time: time("start_time", &self.start_time)?,
            end_time: time("end_time", &self.end_time)?,
            image: optional_image(self.image)?,
            hospital_id: self.hospital_id,
            event_name: self.event_name,
            slots_available: self.slots_available,
            blood_type: self.blood_type,
            diagnosis: self.diagnosis,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBloodRequest {
    pub hospital_id: Option<Uuid>,
    #[validate(length(max = 100))]
    pub patient_name: Option<String>,
    #[validate(length(max = 150))]
    pub event_name: Option<String>,
    pub event_date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[validate(range(min = 0))]
    pub slots_available: Option<i32>,
    pub blood_type: Option<String>,
    #[validate(range(min = 1))]
    pub quantity: Option<i32>,
    pub urgency_level: Option<UrgencyLevel>,
    pub diagnosis: Option<String>,
    pub status: Option<RequestStatus>,
    pub expiry_date: Option<String>,
}

impl UpdateBloodRequest {
    pub fn into_patch(self) -> Result<BloodRequestPatch, ApiError> {
        Ok(BloodRequestPatch {
            event_date: optional_date("event_date", self.event_date.as_deref())?,
            start_time: optional_time("start_time", self.start_time.as_deref())?,
            end_time: optional_time("end_time", self.end_time.as_deref())?,
            expiry_date: optional_instant("expiry_date", self.expiry_date.as_deref())?,
            hospital_id: self.hospital_id,
            patient_name: self.patient_name,
            event_name: self.event_name,
            slots_available: self.slots_available,
            blood_type: self.blood_type,
            quantity: self.quantity,
            urgency_level: self.urgency_level,
            diagnosis: self.diagnosis,
            status: self.status,
        })
    }
}

/// Query filters for request and campaign listings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BloodRequestQuery {
    pub status: Option<RequestStatus>,
    pub event_type: Option<EventType>,
    pub urgency_level: Option<UrgencyLevel>,
    pub blood_type: Option<String>,
    pub min_quantity: Option<i32>,
    pub max_quantity: Option<i32>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl BloodRequestQuery {
    pub fn into_filter(self) -> Result<BloodRequestFilter, ApiError> {
        Ok(BloodRequestFilter {
            user_id: None,
            event_type: self.event_type,
            status: self.status,
            urgency_level: self.urgency_level,
            blood_type: self.blood_type.filter(|b| !b.trim().is_empty()),
            min_quantity: self.min_quantity,
            max_quantity: self.max_quantity,
            start_date: optional_date("start_date", self.start_date.as_deref())?,
            end_date: optional_date("end_date", self.end_date.as_deref())?,
        })
    }
}
