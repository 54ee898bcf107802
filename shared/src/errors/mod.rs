//! Shared error response structure and user-facing messages

use serde::{Deserialize, Serialize};

/// Error envelope used across all API endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// HTTP status code mirrored in the body
    pub code: u16,

    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Fixed user-facing messages
pub mod error_messages {
    pub const UNAUTHENTICATED: &str = "anda harus login untuk megakses resource ini.";
    pub const FORBIDDEN: &str = "anda tidak diizinkan untuk mengakses resource ini.";
    pub const NOT_FOUND: &str = "resource tidak ditemukan";
    pub const INTERNAL: &str = "ada kesalahan di server";
    pub const INVALID_CREDENTIALS: &str = "Email atau password salah";
    pub const EMAIL_NOT_VERIFIED: &str = "Silahkan verifikasi email terlebih dahulu";
    pub const EMAIL_TAKEN: &str = "Email sudah digunakan";
}
