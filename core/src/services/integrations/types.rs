//! Types exchanged with external collaborators

use serde::{Deserialize, Serialize};

use crate::errors::{DomainResult, ValidationError};

/// Image accepted from a client, validated against the allowed content types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl ImageUpload {
    pub fn new(bytes: Vec<u8>, content_type: impl Into<String>) -> DomainResult<Self> {
        let content_type = content_type.into().to_lowercase();
        if !dc_shared::validation::is_allowed_image(&content_type) {
            return Err(ValidationError::InvalidImageType.into());
        }
        if bytes.is_empty() {
            return Err(ValidationError::required("image").into());
        }
        Ok(Self {
            bytes,
            content_type,
        })
    }
}

/// Result of a successful image upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    pub url: String,
    pub public_id: String,
}

/// Customer details forwarded to the payment gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCustomer {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Hosted checkout session returned by the payment gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSession {
    pub token: String,
    pub redirect_url: String,
}

/// Profile returned by the OAuth provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthUser {
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}

/// Certificate to be minted on chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateMint {
    pub wallet_address: String,
    pub donor_name: String,
    /// Hospital address printed on the certificate
    pub donor_address: String,
    pub certificate_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintReceipt {
    pub tx_hash: String,
}
