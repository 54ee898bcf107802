//! User entity representing a registered account in DarahConnect.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ValidationError;

/// Role carried in the `role` JWT claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Administrator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Administrator => "Administrator",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "User" => Ok(Role::User),
            "Administrator" => Ok(Role::Administrator),
            other => Err(ValidationError::InvalidStatus {
                value: other.to_string(),
            }),
        }
    }
}

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,

    pub name: String,

    pub email: String,

    /// bcrypt hash, never serialized
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    pub gender: String,

    pub phone: String,

    pub blood_type: String,

    pub birth_date: Option<NaiveDate>,

    pub address: String,

    /// EVM account receiving minted donation certificates
    pub wallet_address: Option<String>,

    pub role: Role,

    /// Profile image URL on the image host
    pub url_file: Option<String>,

    /// Image host identifier used to delete the previous image
    #[serde(skip_serializing, default)]
    pub public_id: Option<String>,

    #[serde(skip_serializing, default)]
    pub verify_email_token: Option<String>,

    #[serde(skip_serializing, default)]
    pub reset_password_token: Option<String>,

    pub is_verified: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates an unverified `User` account
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email: email.trim().to_lowercase(),
            password_hash,
            gender: String::new(),
            phone: String::new(),
            blood_type: String::new(),
            birth_date: None,
            address: String::new(),
            wallet_address: None,
            role: Role::User,
            url_file: None,
            public_id: None,
            verify_email_token: None,
            reset_password_token: None,
            is_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Administrator
    }

    /// Marks the email as verified and consumes the verification token
    pub fn verify(&mut self) {
        self.is_verified = true;
        self.verify_email_token = None;
        self.touch();
    }

    pub fn set_reset_token(&mut self, token: String) {
        self.reset_password_token = Some(token);
        self.touch();
    }

    /// Replaces the password hash and invalidates any outstanding reset token
    pub fn change_password(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.reset_password_token = None;
        self.touch();
    }

    pub fn set_image(&mut self, url: String, public_id: String) -> Option<String> {
        self.url_file = Some(url);
        self.touch();
        self.public_id.replace(public_id)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
