//! A user's signup against a blood request or campaign, optionally tied to a schedule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Registered,
    Completed,
    #[serde(alias = "canceled")]
    Cancelled,
    #[serde(alias = "no-show")]
    NoShow,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Registered => "registered",
            RegistrationStatus::Completed => "completed",
            RegistrationStatus::Cancelled => "cancelled",
            RegistrationStatus::NoShow => "no_show",
        }
    }

    pub fn can_transition_to(&self, next: RegistrationStatus) -> bool {
        matches!(
            (self, next),
            (RegistrationStatus::Registered, RegistrationStatus::Completed)
                | (RegistrationStatus::Registered, RegistrationStatus::Cancelled)
                | (RegistrationStatus::Registered, RegistrationStatus::NoShow)
        )
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RegistrationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "registered" => Ok(RegistrationStatus::Registered),
            "completed" => Ok(RegistrationStatus::Completed),
            "cancelled" | "canceled" => Ok(RegistrationStatus::Cancelled),
            "no_show" | "no-show" => Ok(RegistrationStatus::NoShow),
            _ => Err(ValidationError::InvalidStatus {
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonorRegistration {
    pub id: Uuid,
    pub user_id: Uuid,
    pub request_id: Uuid,
    pub schedule_id: Option<Uuid>,
    pub status: RegistrationStatus,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DonorRegistration {
    pub fn new(user_id: Uuid, request_id: Uuid, schedule_id: Option<Uuid>, notes: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            request_id,
            schedule_id,
            status: RegistrationStatus::Registered,
            notes,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status != RegistrationStatus::Cancelled
    }

    pub fn transition_to(&mut self, next: RegistrationStatus) -> DomainResult<()> {
        if self.status == next {
            return Ok(());
        }
        if !self.status.can_transition_to(next) {
            return Err(DomainError::business(format!(
                "status pendaftaran tidak dapat diubah dari {} ke {}",
                self.status, next
            )));
        }
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }
}
