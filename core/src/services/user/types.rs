//! Inputs for the user service

use chrono::NaiveDate;

/// Registration form
#[derive(Debug, Clone, Default)]
pub struct RegisterUser {
    pub name: String,
    pub gender: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub blood_type: String,
    pub birth_date: Option<NaiveDate>,
    pub address: String,
}

/// Profile patch; empty strings and `None` leave the field untouched
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub blood_type: Option<String>,
    /// `YYYY-MM-DD`
    pub birth_date: Option<String>,
    pub address: Option<String>,
    /// EVM account for minted certificates
    pub wallet_address: Option<String>,
}

/// Non-blank value of an optional patch field
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
