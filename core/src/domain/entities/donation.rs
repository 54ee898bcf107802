//! Monetary donation settled through the payment gateway.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult, ValidationError};

/// Smallest accepted donation in rupiah
pub const MIN_DONATION_AMOUNT: i64 = 10_000;

/// Order id prefix sent to the gateway
pub const ORDER_ID_PREFIX: &str = "DONATION-";

/// Layout of `transaction_time` in gateway callbacks
pub const TRANSACTION_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Success,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Success => "success",
            PaymentStatus::Failed => "failed",
        }
    }

    /// Maps a gateway `transaction_status` onto the stored payment status
    pub fn from_gateway(status: &str) -> DomainResult<Self> {
        match status {
            "settlement" | "capture" => Ok(PaymentStatus::Success),
            "pending" => Ok(PaymentStatus::Pending),
            "deny" | "cancel" | "expire" | "failure" => Ok(PaymentStatus::Failed),
            other => Err(DomainError::validation(format!(
                "status transaksi tidak dikenal: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(PaymentStatus::Pending),
            "success" => Ok(PaymentStatus::Success),
            "failed" => Ok(PaymentStatus::Failed),
            _ => Err(ValidationError::InvalidStatus {
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub order_id: String,
    pub amount: i64,
    pub status: PaymentStatus,
    pub snap_token: Option<String>,
    pub redirect_url: Option<String>,
    pub transaction_time: Option<NaiveDateTime>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Donation {
    pub fn new(user_id: Uuid, amount: i64) -> DomainResult<Self> {
        if amount < MIN_DONATION_AMOUNT {
            return Err(DomainError::validation(format!(
                "minimal donasi adalah Rp{}",
                MIN_DONATION_AMOUNT
            )));
        }
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            order_id: format!("{}{}", ORDER_ID_PREFIX, Uuid::new_v4()),
            amount,
            status: PaymentStatus::Pending,
            snap_token: None,
            redirect_url: None,
            transaction_time: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn attach_session(&mut self, token: String, redirect_url: String) {
        self.snap_token = Some(token);
        self.redirect_url = Some(redirect_url);
        self.updated_at = Utc::now();
    }

    /// Whether a callback carrying `next` may overwrite the current status.
    /// A settled payment never changes again; a failed one only moves to
    /// success when the gateway later settles it.
    pub fn accepts(&self, next: PaymentStatus) -> bool {
        match self.status {
            PaymentStatus::Pending => true,
            PaymentStatus::Failed => next == PaymentStatus::Success,
            PaymentStatus::Success => false,
        }
    }

    /// Applies a gateway callback; returns false when it was ignored
    pub fn apply_callback(&mut self, status: PaymentStatus, transaction_time: NaiveDateTime) -> bool {
        if !self.accepts(status) {
            return false;
        }
        self.status = status;
        self.transaction_time = Some(transaction_time);
        self.updated_at = Utc::now();
        true
    }
}

pub fn parse_transaction_time(value: &str) -> DomainResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TRANSACTION_TIME_FORMAT)
        .map_err(|_| ValidationError::format("transaction_time").into())
}
