//! Hospital donation events with slot counters

use chrono::{NaiveDate, NaiveTime};
use std::sync::Arc;

use dc_shared::{PageQuery, Paginated};
use uuid::Uuid;

use crate::domain::entities::donor_schedule::{validate_window, DonorSchedule, ScheduleStatus};
use crate::domain::value_objects::{Actor, DonorScheduleFilter};
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::{DonorScheduleRepository, HospitalRepository};

#[derive(Debug, Clone)]
pub struct NewSchedule {
    pub hospital_id: Uuid,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub slots_available: i32,
    pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct SchedulePatch {
    pub hospital_id: Option<Uuid>,
    pub event_name: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub slots_available: Option<i32>,
    pub description: Option<String>,
    pub status: Option<ScheduleStatus>,
}

pub struct DonorScheduleService {
    schedules: Arc<dyn DonorScheduleRepository>,
    hospitals: Arc<dyn HospitalRepository>,
}

impl DonorScheduleService {
    pub fn new(
        schedules: Arc<dyn DonorScheduleRepository>,
        hospitals: Arc<dyn HospitalRepository>,
    ) -> Self {
        Self {
            schedules,
            hospitals,
        }
    }

    async fn ensure_hospital(&self, hospital_id: Uuid) -> DomainResult<()> {
        if self.hospitals.find_by_id(hospital_id).await?.is_none() {
            return Err(DomainError::not_found("rumah sakit"));
        }
        Ok(())
    }

    pub async fn create(&self, actor: &Actor, input: NewSchedule) -> DomainResult<DonorSchedule> {
        actor.ensure_admin()?;
        if input.event_name.trim().is_empty() {
            return Err(ValidationError::required("event_name").into());
        }
        self.ensure_hospital(input.hospital_id).await?;

        let schedule = DonorSchedule::new(
            input.hospital_id,
            input.event_name.trim().to_string(),
            input.event_date,
            input.start_time,
            input.end_time,
            input.slots_available,
            input.description,
        )?;
        self.schedules.create(schedule).await
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        patch: SchedulePatch,
    ) -> DomainResult<DonorSchedule> {
        actor.ensure_admin()?;
        let mut schedule = self.get_by_id(id).await?;

        if let Some(hospital_id) = patch.hospital_id {
            self.ensure_hospital(hospital_id).await?;
            schedule.hospital_id = hospital_id;
        }
        if let Some(name) = patch.event_name.filter(|v| !v.trim().is_empty()) {
            schedule.event_name = name;
        }
        if let Some(date) = patch.event_date {
            schedule.event_date = date;
        }
        if let Some(start) = patch.start_time {
            schedule.start_time = start;
        }
        if let Some(end) = patch.end_time {
            schedule.end_time = end;
        }
        validate_window(schedule.start_time, schedule.end_time)?;
        if let Some(slots) = patch.slots_available {
            if slots < schedule.slots_booked {
                return Err(DomainError::business(
                    "kapasitas slot tidak boleh kurang dari slot yang sudah dipesan",
                ));
            }
            schedule.slots_available = slots;
        }
        if let Some(description) = patch.description {
            schedule.description = description;
        }
        if let Some(status) = patch.status {
            schedule.status = status;
        }

        schedule.touch();
        self.schedules.update(schedule).await
    }

    pub async fn delete(&self, actor: &Actor, id: Uuid) -> DomainResult<()> {
        actor.ensure_admin()?;
        if !self.schedules.delete(id).await? {
            return Err(DomainError::not_found("jadwal donor"));
        }
        Ok(())
    }

    pub async fn list(
        &self,
        filter: DonorScheduleFilter,
        query: &PageQuery,
    ) -> DomainResult<Paginated<DonorSchedule>> {
        self.schedules.list(&filter, query).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> DomainResult<DonorSchedule> {
        self.schedules
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("jadwal donor"))
    }
}
