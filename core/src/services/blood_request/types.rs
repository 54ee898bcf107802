//! Inputs for the blood request service

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use crate::domain::entities::blood_request::{RequestStatus, UrgencyLevel};
use crate::services::integrations::ImageUpload;

#[derive(Debug, Clone)]
pub struct NewBloodRequest {
    pub hospital_id: Uuid,
    pub patient_name: String,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub blood_type: String,
    pub quantity: i32,
    pub urgency_level: UrgencyLevel,
    pub diagnosis: String,
    pub expiry_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewCampaign {
    pub hospital_id: Uuid,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub slots_available: i32,
    pub blood_type: String,
    pub diagnosis: String,
    pub image: Option<ImageUpload>,
}

/// Fields a caller may change; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct BloodRequestPatch {
    pub hospital_id: Option<Uuid>,
    pub patient_name: Option<String>,
    pub event_name: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub slots_available: Option<i32>,
    pub blood_type: Option<String>,
    pub quantity: Option<i32>,
    pub urgency_level: Option<UrgencyLevel>,
    pub diagnosis: Option<String>,
    pub status: Option<RequestStatus>,
    pub expiry_date: Option<DateTime<Utc>>,
}

impl BloodRequestPatch {
    /// Whether the patch touches anything besides status
    pub(crate) fn has_field_changes(&self) -> bool {
        self.hospital_id.is_some()
            || self.patient_name.is_some()
            || self.event_name.is_some()
            || self.event_date.is_some()
            || self.start_time.is_some()
            || self.end_time.is_some()
            || self.slots_available.is_some()
            || self.blood_type.is_some()
            || self.quantity.is_some()
            || self.urgency_level.is_some()
            || self.diagnosis.is_some()
            || self.expiry_date.is_some()
    }
}
