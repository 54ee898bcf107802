//! Health passport: a time-boxed eligibility credential required before donor registration.

use chrono::{DateTime, Duration, Utc};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::time::jakarta_date;
use crate::errors::ValidationError;

/// Validity window of a freshly issued or renewed passport
pub const PASSPORT_VALIDITY_HOURS: i64 = 24;

/// Attempts at generating a unique passport number
pub const PASSPORT_NUMBER_RETRIES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PassportStatus {
    Active,
    Expired,
    Suspended,
}

impl PassportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PassportStatus::Active => "active",
            PassportStatus::Expired => "expired",
            PassportStatus::Suspended => "suspended",
        }
    }
}

impl std::fmt::Display for PassportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PassportStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(PassportStatus::Active),
            "expired" => Ok(PassportStatus::Expired),
            "suspended" => Ok(PassportStatus::Suspended),
            _ => Err(ValidationError::InvalidStatus {
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthPassport {
    pub id: Uuid,
    pub user_id: Uuid,
    pub passport_number: String,
    pub expiry_date: DateTime<Utc>,
    pub status: PassportStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HealthPassport {
    pub fn new(user_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            passport_number: generate_passport_number(now),
            expiry_date: now + Duration::hours(PASSPORT_VALIDITY_HOURS),
            status: PassportStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reissues the passport number and restarts the validity window
    pub fn renew(&mut self, now: DateTime<Utc>) {
        self.passport_number = generate_passport_number(now);
        self.expiry_date = now + Duration::hours(PASSPORT_VALIDITY_HOURS);
        self.status = PassportStatus::Active;
        self.updated_at = now;
    }

    pub fn regenerate_number(&mut self, now: DateTime<Utc>) {
        self.passport_number = generate_passport_number(now);
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry_date <= now
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.status == PassportStatus::Active && !self.is_expired_at(now)
    }
}

/// `HP-<YYYYMMDD>-<8 uppercase alphanumerics>`, dated in Jakarta time
pub fn generate_passport_number(now: DateTime<Utc>) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(|c| (c as char).to_ascii_uppercase())
        .collect();
    format!("HP-{}-{}", jakarta_date(now).format("%Y%m%d"), suffix)
}
