//! Traits for the external services the core calls out to

use async_trait::async_trait;

use crate::errors::DomainResult;

use super::types::{
    CertificateMint, MintReceipt, OAuthUser, PaymentCustomer, PaymentSession, UploadedImage,
};

/// Transactional email sender
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send the link that verifies a freshly registered account
    async fn send_verification_email(&self, to: &str, name: &str, token: &str) -> DomainResult<()>;
    /// Send the reset-password link
    async fn send_reset_password_email(&self, to: &str, name: &str, token: &str)
        -> DomainResult<()>;
}

/// Remote image host
#[async_trait]
pub trait ImageStorage: Send + Sync {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
        folder: &str,
    ) -> DomainResult<UploadedImage>;
    async fn delete(&self, public_id: &str) -> DomainResult<()>;
}

/// Payment gateway creating hosted checkout sessions
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_transaction(
        &self,
        order_id: &str,
        amount: i64,
        customer: &PaymentCustomer,
    ) -> DomainResult<PaymentSession>;
}

/// OAuth2 login provider
#[async_trait]
pub trait OAuthProvider: Send + Sync {
    /// Consent screen URL carrying `state`
    fn authorization_url(&self, state: &str) -> String;
    /// Exchange an authorization code for the user's profile
    async fn exchange_code(&self, code: &str) -> DomainResult<OAuthUser>;
}

/// Pass-through string cache
#[async_trait]
pub trait CacheService: Send + Sync {
    async fn get(&self, key: &str) -> DomainResult<Option<String>>;
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> DomainResult<()>;
    async fn delete(&self, key: &str) -> DomainResult<()>;
}

/// Contract that mints donation certificates to the donor's wallet
#[async_trait]
pub trait CertificateMinter: Send + Sync {
    async fn mint(&self, request: &CertificateMint) -> DomainResult<MintReceipt>;
}
