//! Error types for authentication, token handling and input validation.
//!
//! Messages are the user-facing texts returned in the error envelope.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email atau password salah")]
    InvalidCredentials,

    #[error("Silahkan verifikasi email terlebih dahulu")]
    EmailNotVerified,

    #[error("Email sudah digunakan")]
    EmailAlreadyRegistered,

    #[error("token verifikasi tidak valid")]
    InvalidVerificationToken,

    #[error("token reset password tidak valid")]
    InvalidResetToken,

    #[error("user tidak ditemukan")]
    UserNotFound,

    #[error("anda tidak diizinkan untuk mengakses resource ini.")]
    InsufficientPermissions,

    #[error("login dengan google gagal")]
    OAuthFailed,
}

/// Token-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("token sudah kadaluarsa")]
    TokenExpired,

    #[error("format token tidak valid")]
    InvalidTokenFormat,

    #[error("tanda tangan token tidak valid")]
    InvalidSignature,

    #[error("klaim token tidak valid")]
    InvalidClaims,

    #[error("gagal membuat token")]
    TokenGenerationFailed,
}

/// Validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} wajib diisi")]
    RequiredField { field: String },

    #[error("format {field} tidak valid")]
    InvalidFormat { field: String },

    #[error("{field} harus di antara {min} dan {max}")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },

    #[error("format email tidak valid")]
    InvalidEmail,

    #[error("format tanggal {field} tidak valid, gunakan YYYY-MM-DD")]
    InvalidDate { field: String },

    #[error("golongan darah tidak valid")]
    InvalidBloodType,

    #[error("format gambar harus png atau jpeg")]
    InvalidImageType,

    #[error("status {value} tidak valid")]
    InvalidStatus { value: String },
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        Self::RequiredField {
            field: field.into(),
        }
    }

    pub fn format(field: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field: field.into(),
        }
    }
}
