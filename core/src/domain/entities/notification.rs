//! User-addressed notification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationType {
    Request,
    Registration,
    Donation,
    Certificate,
    Payment,
    Status,
    General,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Request => "Request",
            NotificationType::Registration => "Registration",
            NotificationType::Donation => "Donation",
            NotificationType::Certificate => "Certificate",
            NotificationType::Payment => "Payment",
            NotificationType::Status => "Status",
            NotificationType::General => "General",
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NotificationType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Request" => Ok(NotificationType::Request),
            "Registration" => Ok(NotificationType::Registration),
            "Donation" => Ok(NotificationType::Donation),
            "Certificate" => Ok(NotificationType::Certificate),
            "Payment" => Ok(NotificationType::Payment),
            "Status" => Ok(NotificationType::Status),
            "General" => Ok(NotificationType::General),
            other => Err(ValidationError::InvalidStatus {
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        user_id: Uuid,
        title: impl Into<String>,
        message: impl Into<String>,
        notification_type: NotificationType,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: title.into(),
            message: message.into(),
            notification_type,
            is_read: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn mark_read(&mut self) {
        if !self.is_read {
            self.is_read = true;
            self.updated_at = Utc::now();
        }
    }
}
