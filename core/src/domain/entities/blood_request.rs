//! Blood request entity. One table carries both patient blood requests and
//! donation campaigns; `event_type` tells them apart.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::donor_schedule::validate_window;
use crate::errors::{DomainError, DomainResult, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    BloodRequest,
    Campaign,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::BloodRequest => "blood_request",
            EventType::Campaign => "campaign",
        }
    }
}

impl std::str::FromStr for EventType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blood_request" => Ok(EventType::BloodRequest),
            "campaign" => Ok(EventType::Campaign),
            other => Err(ValidationError::InvalidStatus {
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Verified,
    Registered,
    Completed,
    #[serde(alias = "canceled")]
    Cancelled,
    Expired,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Verified => "verified",
            RequestStatus::Registered => "registered",
            RequestStatus::Completed => "completed",
            RequestStatus::Cancelled => "cancelled",
            RequestStatus::Expired => "expired",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestStatus::Completed | RequestStatus::Cancelled | RequestStatus::Expired
        )
    }

    /// Transition table for request and campaign status
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        use RequestStatus::*;
        matches!(
            (self, next),
            (Pending, Verified)
                | (Pending, Cancelled)
                | (Pending, Expired)
                | (Verified, Registered)
                | (Verified, Completed)
                | (Verified, Cancelled)
                | (Verified, Expired)
                | (Registered, Verified)
                | (Registered, Completed)
                | (Registered, Cancelled)
                | (Registered, Expired)
        )
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(RequestStatus::Pending),
            "verified" => Ok(RequestStatus::Verified),
            "registered" => Ok(RequestStatus::Registered),
            "completed" => Ok(RequestStatus::Completed),
            "cancelled" | "canceled" => Ok(RequestStatus::Cancelled),
            "expired" => Ok(RequestStatus::Expired),
            _ => Err(ValidationError::InvalidStatus {
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl UrgencyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyLevel::Low => "low",
            UrgencyLevel::Medium => "medium",
            UrgencyLevel::High => "high",
            UrgencyLevel::Critical => "critical",
        }
    }
}

impl std::str::FromStr for UrgencyLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(UrgencyLevel::Low),
            "medium" => Ok(UrgencyLevel::Medium),
            "high" => Ok(UrgencyLevel::High),
            "critical" => Ok(UrgencyLevel::Critical),
            _ => Err(ValidationError::format("urgency_level")),
        }
    }
}

/// Blood request or campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub hospital_id: Uuid,
    pub patient_name: String,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    /// Slot capacity of a campaign, zero when registrations are not counted
    pub slots_available: i32,
    pub slots_booked: i32,
    pub blood_type: String,
    pub quantity: i32,
    pub urgency_level: UrgencyLevel,
    pub diagnosis: String,
    pub status: RequestStatus,
    pub expiry_date: Option<DateTime<Utc>>,
    pub event_type: EventType,
    pub image_url: Option<String>,
    #[serde(skip_serializing, default)]
    pub image_public_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BloodRequest {
    /// Creates a pending patient blood request
    #[allow(clippy::too_many_arguments)]
    pub fn new_request(
        user_id: Uuid,
        hospital_id: Uuid,
        patient_name: String,
        event_name: String,
        event_date: NaiveDate,
        blood_type: String,
        quantity: i32,
        urgency_level: UrgencyLevel,
        diagnosis: String,
        expiry_date: Option<DateTime<Utc>>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            hospital_id,
            patient_name,
            event_name,
            event_date,
            start_time: None,
            end_time: None,
            slots_available: 0,
            slots_booked: 0,
            blood_type,
            quantity,
            urgency_level,
            diagnosis,
            status: RequestStatus::Pending,
            expiry_date,
            event_type: EventType::BloodRequest,
            image_url: None,
            image_public_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates an already verified donation campaign
    pub fn new_campaign(
        user_id: Uuid,
        hospital_id: Uuid,
        event_name: String,
        event_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        slots_available: i32,
    ) -> DomainResult<Self> {
        validate_window(start_time, end_time)?;
        if slots_available < 0 {
            return Err(ValidationError::OutOfRange {
                field: "slots_available".to_string(),
                min: "0".to_string(),
                max: i32::MAX.to_string(),
            }
            .into());
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            hospital_id,
            patient_name: String::new(),
            event_name,
            event_date,
            start_time: Some(start_time),
            end_time: Some(end_time),
            slots_available,
            slots_booked: 0,
            blood_type: String::new(),
            quantity: 0,
            urgency_level: UrgencyLevel::Medium,
            diagnosis: String::new(),
            status: RequestStatus::Verified,
            expiry_date: None,
            event_type: EventType::Campaign,
            image_url: None,
            image_public_id: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_campaign(&self) -> bool {
        self.event_type == EventType::Campaign
    }

    pub fn counts_slots(&self) -> bool {
        self.slots_available > 0
    }

    pub fn has_free_slot(&self) -> bool {
        self.slots_booked < self.slots_available
    }

    /// Books one campaign slot
    pub fn book_slot(&mut self) -> DomainResult<()> {
        if !self.has_free_slot() {
            return Err(DomainError::business("slot kampanye sudah penuh"));
        }
        self.slots_booked += 1;
        self.touch();
        Ok(())
    }

    pub fn release_slot(&mut self) {
        if self.slots_booked > 0 {
            self.slots_booked -= 1;
            self.touch();
        }
    }

    /// Status as observed at `now`; open requests past their expiry read as expired
    pub fn effective_status(&self, now: DateTime<Utc>) -> RequestStatus {
        match self.expiry_date {
            Some(expiry) if expiry <= now && !self.status.is_terminal() => RequestStatus::Expired,
            _ => self.status,
        }
    }

    /// Applies a status change if the transition table allows it
    pub fn transition_to(&mut self, next: RequestStatus) -> DomainResult<()> {
        if self.status == next {
            return Ok(());
        }
        if !self.status.can_transition_to(next) {
            return Err(DomainError::business(format!(
                "status permintaan tidak dapat diubah dari {} ke {}",
                self.status, next
            )));
        }
        self.status = next;
        self.touch();
        Ok(())
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
