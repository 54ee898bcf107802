//! Certificate issuance and verification

mod service;


pub use service::{CertificateRecipient, CertificateService, CertificateVerification};
