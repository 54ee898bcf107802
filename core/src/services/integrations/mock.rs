//! In-memory collaborator doubles

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

use super::traits::{
    CacheService, CertificateMinter, ImageStorage, Mailer, OAuthProvider, PaymentGateway,
};
use super::types::{
    CertificateMint, MintReceipt, OAuthUser, PaymentCustomer, PaymentSession, UploadedImage,
};

/// Kind of email recorded by `MockMailer`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentMailKind {
    Verification,
    ResetPassword,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    pub kind: SentMailKind,
    pub to: String,
    pub token: String,
}

/// Records outgoing mail; can be switched to fail every send
#[derive(Default)]
pub struct MockMailer {
    sent: Arc<RwLock<Vec<SentMail>>>,
    failing: AtomicBool,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let mailer = Self::default();
        mailer.failing.store(true, Ordering::SeqCst);
        mailer
    }

    pub async fn sent(&self) -> Vec<SentMail> {
        self.sent.read().await.clone()
    }

    async fn record(&self, kind: SentMailKind, to: &str, token: &str) -> DomainResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::external("mailjet", "mock send failure"));
        }
        self.sent.write().await.push(SentMail {
            kind,
            to: to.to_string(),
            token: token.to_string(),
        });
        Ok(())
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send_verification_email(&self, to: &str, _name: &str, token: &str) -> DomainResult<()> {
        self.record(SentMailKind::Verification, to, token).await
    }

    async fn send_reset_password_email(
        &self,
        to: &str,
        _name: &str,
        token: &str,
    ) -> DomainResult<()> {
        self.record(SentMailKind::ResetPassword, to, token).await
    }
}

/// Keeps uploaded images in memory
#[derive(Default)]
pub struct MockImageStorage {
    images: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    deleted: Arc<RwLock<Vec<String>>>,
}

impl MockImageStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn stored_count(&self) -> usize {
        self.images.read().await.len()
    }

    pub async fn deleted(&self) -> Vec<String> {
        self.deleted.read().await.clone()
    }
}

#[async_trait]
impl ImageStorage for MockImageStorage {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        _content_type: &str,
        folder: &str,
    ) -> DomainResult<UploadedImage> {
        let public_id = format!("{}/{}", folder, Uuid::new_v4().simple());
        self.images.write().await.insert(public_id.clone(), bytes);
        Ok(UploadedImage {
            url: format!("https://images.test/{}", public_id),
            public_id,
        })
    }

    async fn delete(&self, public_id: &str) -> DomainResult<()> {
        self.images.write().await.remove(public_id);
        self.deleted.write().await.push(public_id.to_string());
        Ok(())
    }
}

/// Returns a deterministic checkout session per order
#[derive(Default)]
pub struct MockPaymentGateway {
    orders: Arc<RwLock<Vec<(String, i64)>>>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn orders(&self) -> Vec<(String, i64)> {
        self.orders.read().await.clone()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_transaction(
        &self,
        order_id: &str,
        amount: i64,
        _customer: &PaymentCustomer,
    ) -> DomainResult<PaymentSession> {
        self.orders.write().await.push((order_id.to_string(), amount));
        Ok(PaymentSession {
            token: format!("snap-{}", order_id),
            redirect_url: format!("https://pay.test/snap/{}", order_id),
        })
    }
}

/// Accepts a single known authorization code
pub struct MockOAuthProvider {
    code: String,
    user: OAuthUser,
}

impl MockOAuthProvider {
    pub fn new(code: impl Into<String>, user: OAuthUser) -> Self {
        Self {
            code: code.into(),
            user,
        }
    }
}

#[async_trait]
impl OAuthProvider for MockOAuthProvider {
    fn authorization_url(&self, state: &str) -> String {
        format!("https://accounts.test/o/oauth2/auth?state={}", state)
    }

    async fn exchange_code(&self, code: &str) -> DomainResult<OAuthUser> {
        if code == self.code {
            Ok(self.user.clone())
        } else {
            Err(DomainError::external("google", "invalid authorization code"))
        }
    }
}

/// Records mints and answers with a random transaction hash
#[derive(Default)]
pub struct MockCertificateMinter {
    minted: Arc<RwLock<Vec<CertificateMint>>>,
    failing: AtomicBool,
}

impl MockCertificateMinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn minted(&self) -> Vec<CertificateMint> {
        self.minted.read().await.clone()
    }
}

#[async_trait]
impl CertificateMinter for MockCertificateMinter {
    async fn mint(&self, request: &CertificateMint) -> DomainResult<MintReceipt> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::external("blockchain", "mock mint failure"));
        }
        self.minted.write().await.push(request.clone());
        Ok(MintReceipt {
            tx_hash: format!("0x{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple()),
        })
    }
}

/// Map-backed cache that ignores TTLs
#[derive(Default)]
pub struct InMemoryCache {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheService for InMemoryCache {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str, _ttl_seconds: u64) -> DomainResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> DomainResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
