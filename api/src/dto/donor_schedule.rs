use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use dc_core::domain::entities::ScheduleStatus;
use dc_core::domain::value_objects::DonorScheduleFilter;
use dc_core::services::{NewSchedule, SchedulePatch};

use super::common::{date, optional_date, optional_time, time};
use crate::handlers::ApiError;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateScheduleRequest {
    pub hospital_id: Uuid,
    #[validate(length(min = 1, max = 150, code = "required"))]
    pub event_name: String,
    pub event_date: String,
    pub start_time: String,
    pub end_time: String,
    #[validate(range(min = 1))]
    pub slots_available: i32,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,
}

impl CreateScheduleRequest {
    pub fn into_input(self) -> Result<NewSchedule, ApiError> {
        Ok(NewSchedule {
            event_date: date("event_date", &self.event_date)?,
            start_time: time("start_time", &self.start_time)?,
            end_time: time("end_time", &self.end_time)?,
            hospital_id: self.hospital_id,
            event_name: self.event_name,
            slots_available: self.slots_available,
            description: self.description,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateScheduleRequest {
    pub hospital_id: Option<Uuid>,
    #[validate(length(max = 150))]
    pub event_name: Option<String>,
    pub event_date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[validate(range(min = 0))]
    pub slots_available: Option<i32>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub status: Option<ScheduleStatus>,
}

impl UpdateScheduleRequest {
    pub fn into_patch(self) -> Result<SchedulePatch, ApiError> {
        Ok(SchedulePatch {
            event_date: optional_date("event_date", self.event_date.as_deref())?,
            start_time: optional_time("start_time", self.start_time.as_deref())?,
            end_time: optional_time("end_time", self.end_time.as_deref())?,
            hospital_id: self.hospital_id,
            event_name: self.event_name,
            slots_available: self.slots_available,
            description: self.description,
            status: self.status,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleQuery {
    pub hospital_id: Option<Uuid>,
    pub status: Option<ScheduleStatus>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub slots_available: Option<bool>,
}

impl ScheduleQuery {
    pub fn into_filter(self) -> Result<DonorScheduleFilter, ApiError> {
        Ok(DonorScheduleFilter {
            hospital_id: self.hospital_id,
            status: self.status,
            start_date: optional_date("start_date", self.start_date.as_deref())?,
            end_date: optional_date("end_date", self.end_date.as_deref())?,
            slots_available: self.slots_available,
        })
    }
}
