//! Token claims for JWT-based authentication.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::{Role, User};

/// Login token expiration time (10 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 10;

/// Reset-password token expiration time (10 minutes)
pub const RESET_TOKEN_EXPIRY_MINUTES: i64 = 10;

/// Issuer of login tokens
pub const JWT_ISSUER: &str = "Darah Connect";

/// Issuer of reset-password tokens
pub const RESET_ISSUER: &str = "Reset Password";

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    pub email: String,

    pub name: String,

    /// `User` or `Administrator`
    pub role: String,

    pub iss: String,

    pub iat: i64,

    pub exp: i64,
}

impl Claims {
    /// Creates claims for a login token
    pub fn new_access_token(user: &User, expiry_minutes: i64) -> Self {
        Self::for_user(user, JWT_ISSUER, expiry_minutes)
    }

    /// Creates claims for a reset-password token
    pub fn new_reset_token(user: &User, expiry_minutes: i64) -> Self {
        Self::for_user(user, RESET_ISSUER, expiry_minutes)
    }

    pub fn for_user(user: &User, issuer: &str, expiry_minutes: i64) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::minutes(expiry_minutes);

        Self {
            sub: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role.as_str().to_string(),
            iss: issuer.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    pub fn role(&self) -> Option<Role> {
        self.role.parse().ok()
    }
}

/// Token returned after a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginToken {
    pub token: String,

    /// Lifetime in seconds
    pub expires_in: i64,
}

impl LoginToken {
    pub fn new(token: String, expiry_minutes: i64) -> Self {
        Self {
            token,
            expires_in: expiry_minutes * 60,
        }
    }
}
