use serde::Deserialize;
use validator::Validate;

use dc_core::services::RegisterUser;

use super::common::optional_date;
use crate::handlers::ApiError;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, code = "required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub gender: String,
    #[validate(email(code = "email"))]
    pub email: String,
    #[validate(length(min = 1, max = 72, code = "required"))]
    pub password: String,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub phone: String,
    #[serde(default)]
    pub blood_type: String,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub address: String,
}

impl RegisterRequest {
    pub fn into_input(self) -> Result<RegisterUser, ApiError> {
        Ok(RegisterUser {
            birth_date: optional_date("birth_date", self.birth_date.as_deref())?,
            name: self.name,
            gender: self.gender,
            email: self.email,
            password: self.password,
            phone: self.phone,
            blood_type: self.blood_type,
            address: self.address,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(code = "email"))]
    pub email: String,
    #[validate(length(min = 1, code = "required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(email(code = "email"))]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewPasswordRequest {
    #[validate(length(min = 1, max = 72, code = "required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}
