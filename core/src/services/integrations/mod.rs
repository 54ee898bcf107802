//! Collaborator interfaces for external services
//!
//! Implementations live in `dc_infra`; `mock` holds in-memory doubles used by
//! service and handler tests.

pub mod mock;
mod traits;
mod types;

pub use traits::{
    CacheService, CertificateMinter, ImageStorage, Mailer, OAuthProvider, PaymentGateway,
};
pub use types::{
    CertificateMint, ImageUpload, MintReceipt, OAuthUser, PaymentCustomer, PaymentSession,
    UploadedImage,
};
