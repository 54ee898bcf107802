//! Record of a physical blood donation tied to a registration.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BloodDonationStatus {
    Pending,
    Completed,
    #[serde(alias = "canceled")]
    Cancelled,
    Rejected,
}

impl BloodDonationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BloodDonationStatus::Pending => "pending",
            BloodDonationStatus::Completed => "completed",
            BloodDonationStatus::Cancelled => "cancelled",
            BloodDonationStatus::Rejected => "rejected",
        }
    }

    pub fn can_transition_to(&self, next: BloodDonationStatus) -> bool {
        *self == BloodDonationStatus::Pending && next != BloodDonationStatus::Pending
    }
}

impl std::fmt::Display for BloodDonationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BloodDonationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(BloodDonationStatus::Pending),
            "completed" => Ok(BloodDonationStatus::Completed),
            "cancelled" | "canceled" => Ok(BloodDonationStatus::Cancelled),
            "rejected" => Ok(BloodDonationStatus::Rejected),
            _ => Err(ValidationError::InvalidStatus {
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodDonation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub hospital_id: Uuid,
    pub registration_id: Uuid,
    pub donation_date: NaiveDate,
    pub blood_type: String,
    pub status: BloodDonationStatus,
    pub image_url: Option<String>,
    #[serde(skip_serializing, default)]
    pub image_public_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BloodDonation {
    pub fn new(
        user_id: Uuid,
        hospital_id: Uuid,
        registration_id: Uuid,
        donation_date: NaiveDate,
        blood_type: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            hospital_id,
            registration_id,
            donation_date,
            blood_type,
            status: BloodDonationStatus::Pending,
            image_url: None,
            image_public_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == BloodDonationStatus::Completed
    }

    pub fn transition_to(&mut self, next: BloodDonationStatus) -> DomainResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::business(format!(
                "status donor darah tidak dapat diubah dari {} ke {}",
                self.status, next
            )));
        }
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }
}
