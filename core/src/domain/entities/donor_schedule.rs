//! Donor schedule entity: a hospital-hosted donation event with slot counters.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    Upcoming,
    Ongoing,
    Completed,
    #[serde(alias = "canceled")]
    Cancelled,
}

impl ScheduleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleStatus::Upcoming => "upcoming",
            ScheduleStatus::Ongoing => "ongoing",
            ScheduleStatus::Completed => "completed",
            ScheduleStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ScheduleStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "upcoming" => Ok(ScheduleStatus::Upcoming),
            "ongoing" => Ok(ScheduleStatus::Ongoing),
            "completed" => Ok(ScheduleStatus::Completed),
            "cancelled" | "canceled" => Ok(ScheduleStatus::Cancelled),
            _ => Err(ValidationError::InvalidStatus {
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonorSchedule {
    pub id: Uuid,
    pub hospital_id: Uuid,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub slots_available: i32,
    pub slots_booked: i32,
    pub description: String,
    pub status: ScheduleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DonorSchedule {
    pub fn new(
        hospital_id: Uuid,
        event_name: String,
        event_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        slots_available: i32,
        description: String,
    ) -> DomainResult<Self> {
        validate_window(start_time, end_time)?;
        if slots_available < 1 {
            return Err(ValidationError::OutOfRange {
                field: "slots_available".to_string(),
                min: "1".to_string(),
                max: i32::MAX.to_string(),
            }
            .into());
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            hospital_id,
            event_name,
            event_date,
            start_time,
            end_time,
            slots_available,
            slots_booked: 0,
            description,
            status: ScheduleStatus::Upcoming,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn has_free_slot(&self) -> bool {
        self.slots_booked < self.slots_available
    }

    pub fn accepts_bookings(&self) -> bool {
        self.status == ScheduleStatus::Upcoming && self.has_free_slot()
    }

    /// Books one slot; fails when the schedule is full or not upcoming
    pub fn book_slot(&mut self) -> DomainResult<()> {
        if self.status != ScheduleStatus::Upcoming {
            return Err(DomainError::business("jadwal donor tidak menerima pendaftaran"));
        }
        if !self.has_free_slot() {
            return Err(DomainError::business("slot jadwal donor sudah penuh"));
        }
        self.slots_booked += 1;
        self.touch();
        Ok(())
    }

    /// Releases one slot, never below zero
    pub fn release_slot(&mut self) {
        if self.slots_booked > 0 {
            self.slots_booked -= 1;
            self.touch();
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

pub(crate) fn validate_window(start: NaiveTime, end: NaiveTime) -> DomainResult<()> {
    if end <= start {
        return Err(DomainError::validation(
            "waktu selesai harus setelah waktu mulai",
        ));
    }
    Ok(())
}
