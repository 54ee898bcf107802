//! Login response value object.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{LoginToken, User};

/// Returned by password and OAuth login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub token: String,

    /// Token lifetime in seconds
    pub expires_in: i64,

    pub user: User,
}

impl LoginResponse {
    pub fn new(token: LoginToken, user: User) -> Self {
        Self {
            token: token.token,
            expires_in: token.expires_in,
            user,
        }
    }
}
