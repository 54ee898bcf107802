//! # Infrastructure Layer
//!
//! Concrete implementations of the DarahConnect core interfaces:
//! - **Database**: MySQL repositories using SQLx
//! - **Cache**: Redis pass-through cache for the landing page
//! - **Mail**: Mailjet transactional email
//! - **Storage**: Cloudinary image hosting
//! - **Payment**: Midtrans Snap checkout
//! - **OAuth**: Google sign-in
//! - **Blockchain**: certificate minting through a signing relay
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//! - `redis-cache`: Enable Redis caching support (default)

use std::sync::Arc;

use dc_core::repositories::{
    BloodDonationRepository, BloodRequestRepository, CertificateRepository, DonationRepository,
    DonorRegistrationRepository, DonorScheduleRepository, HealthPassportRepository,
    HospitalRepository, NotificationRepository, UserRepository,
};
use dc_core::services::{
    CacheService, CertificateMinter, ImageStorage, Mailer, OAuthProvider, PaymentGateway,
};
use dc_shared::AppConfig;

// Re-export core types for convenience
pub use dc_core::errors::*;

pub mod blockchain;
pub mod cache;
pub mod database;
pub mod mail;
pub mod oauth;
pub mod payment;
pub mod storage;

use blockchain::RelayCertificateMinter;
use cache::{NoOpCache, RedisCache, RedisClient};
use database::mysql::{
    MySqlBloodDonationRepository, MySqlBloodRequestRepository, MySqlCertificateRepository,
    MySqlDonationRepository, MySqlDonorRegistrationRepository, MySqlDonorScheduleRepository,
    MySqlHealthPassportRepository, MySqlHospitalRepository, MySqlNotificationRepository,
    MySqlUserRepository,
};
use database::DatabasePool;
use mail::{LogMailer, MailjetMailer};
use oauth::GoogleOAuthProvider;
use payment::MidtransGateway;
use storage::CloudinaryStorage;

/// Infrastructure service container
///
/// Every repository and collaborator is exposed behind its core trait so the
/// API layer can wire services without knowing the backing technology.
#[derive(Clone)]
pub struct InfrastructureServices {
    pub database: DatabasePool,
    pub users: Arc<dyn UserRepository>,
    pub hospitals: Arc<dyn HospitalRepository>,
    pub blood_requests: Arc<dyn BloodRequestRepository>,
    pub donor_schedules: Arc<dyn DonorScheduleRepository>,
    pub donor_registrations: Arc<dyn DonorRegistrationRepository>,
    pub health_passports: Arc<dyn HealthPassportRepository>,
    pub blood_donations: Arc<dyn BloodDonationRepository>,
    pub certificates: Arc<dyn CertificateRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub donations: Arc<dyn DonationRepository>,
    pub mailer: Arc<dyn Mailer>,
    pub images: Arc<dyn ImageStorage>,
    pub payments: Arc<dyn PaymentGateway>,
    pub oauth: Arc<dyn OAuthProvider>,
    pub cache: Arc<dyn CacheService>,
    pub minter: Option<Arc<dyn CertificateMinter>>,
}

/// Initialize infrastructure services
///
/// This function sets up:
/// - Database connection pool and repositories
/// - Redis connection (falls back to a no-op cache when disabled or unreachable)
/// - HTTP clients for mail, image hosting, payment, OAuth and minting
pub async fn initialize(config: &AppConfig) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!("Initializing infrastructure services...");

    let database = DatabasePool::new(config.database.clone()).await?;
    let pool = database.get_pool().clone();

    let cache: Arc<dyn CacheService> = if config.cache.enabled {
        match RedisClient::new(config.cache.clone()).await {
            Ok(client) => Arc::new(RedisCache::new(client)),
            Err(e) => {
                tracing::warn!(error = %e, "Redis unavailable, landing page will not be cached");
                Arc::new(NoOpCache)
            }
        }
    } else {
        Arc::new(NoOpCache)
    };

    let mailer: Arc<dyn Mailer> = if config.mail.is_configured() {
        Arc::new(MailjetMailer::new(config.mail.clone())?)
    } else {
        tracing::warn!("Mailjet credentials missing, emails will only be logged");
        Arc::new(LogMailer::new(config.mail.app_base_url.clone()))
    };

    let minter: Option<Arc<dyn CertificateMinter>> = if config.blockchain.is_configured() {
        Some(Arc::new(RelayCertificateMinter::new(config.blockchain.clone())?))
    } else {
        tracing::warn!("Minting relay not configured, certificates stay off chain");
        None
    };

    let services = InfrastructureServices {
        users: Arc::new(MySqlUserRepository::new(pool.clone())),
        hospitals: Arc::new(MySqlHospitalRepository::new(pool.clone())),
        blood_requests: Arc::new(MySqlBloodRequestRepository::new(pool.clone())),
        donor_schedules: Arc::new(MySqlDonorScheduleRepository::new(pool.clone())),
        donor_registrations: Arc::new(MySqlDonorRegistrationRepository::new(pool.clone())),
        health_passports: Arc::new(MySqlHealthPassportRepository::new(pool.clone())),
        blood_donations: Arc::new(MySqlBloodDonationRepository::new(pool.clone())),
        certificates: Arc::new(MySqlCertificateRepository::new(pool.clone())),
        notifications: Arc::new(MySqlNotificationRepository::new(pool.clone())),
        donations: Arc::new(MySqlDonationRepository::new(pool)),
        mailer,
        images: Arc::new(CloudinaryStorage::new(config.cloudinary.clone())?),
        payments: Arc::new(MidtransGateway::new(config.midtrans.clone())?),
        oauth: Arc::new(GoogleOAuthProvider::new(config.auth.google.clone())?),
        cache,
        minter,
        database,
    };

    tracing::info!("Infrastructure services initialized successfully");
    Ok(services)
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl InfrastructureError {
    /// Convert into a domain error attributed to an external service
    pub fn into_external(self, service: &str) -> DomainError {
        match self {
            InfrastructureError::Database(_) | InfrastructureError::Cache(_) => {
                DomainError::internal(self.to_string())
            }
            other => DomainError::external(service, other.to_string()),
        }
    }
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::internal(err.to_string())
    }
}
