//! Unit tests for health passports and certificates

use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::entities::certificate::{generate_certificate_number, Certificate};
use crate::domain::entities::health_passport::{
    generate_passport_number, HealthPassport, PassportStatus, PASSPORT_VALIDITY_HOURS,
};

#[test]
fn test_passport_number_format() {
    // 18:00 UTC is already the next day in Jakarta
    let at = Utc.with_ymd_and_hms(2024, 6, 30, 18, 0, 0).unwrap();
    let number = generate_passport_number(at);

    assert!(number.starts_with("HP-20240701-"));
    let suffix = &number["HP-20240701-".len()..];
    assert_eq!(suffix.len(), 8);
    assert!(suffix
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
}

#[test]
fn test_new_passport_valid_for_window() {
    let now = Utc::now();
    let passport = HealthPassport::new(Uuid::new_v4(), now);

    assert_eq!(passport.status, PassportStatus::Active);
    assert_eq!(passport.expiry_date, now + Duration::hours(PASSPORT_VALIDITY_HOURS));
    assert!(passport.is_valid_at(now));
    assert!(!passport.is_valid_at(now + Duration::hours(PASSPORT_VALIDITY_HOURS)));
}

#[test]
fn test_suspended_passport_is_invalid() {
    let now = Utc::now();
    let mut passport = HealthPassport::new(Uuid::new_v4(), now);
    passport.status = PassportStatus::Suspended;
    assert!(!passport.is_valid_at(now));
}

#[test]
fn test_renew_restarts_window() {
    let issued = Utc::now() - Duration::hours(30);
    let mut passport = HealthPassport::new(Uuid::new_v4(), issued);
    passport.status = PassportStatus::Expired;
    let now = Utc::now();

    passport.renew(now);

    assert!(passport.is_valid_at(now));
    assert_eq!(passport.expiry_date, now + Duration::hours(PASSPORT_VALIDITY_HOURS));
}

#[test]
fn test_certificate_number_format() {
    let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 0, 0).unwrap();
    let number = generate_certificate_number(at);

    assert!(number.starts_with("DC-20240102-"));
    let suffix = &number["DC-20240102-".len()..];
    assert_eq!(suffix.len(), 6);
    assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_certificate_signature_verifies() {
    let cert = Certificate::issue(Uuid::new_v4(), Uuid::new_v4(), "secret", Utc::now()).unwrap();

    assert_eq!(cert.digital_signature.len(), 64);
    assert!(cert.tx_hash.is_none());
    assert!(cert.verify_signature("secret"));
    assert!(!cert.verify_signature("other-secret"));
}

#[test]
fn test_certificate_signature_is_hmac_sha256() {
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    let cert = Certificate::issue(Uuid::new_v4(), Uuid::new_v4(), "secret", Utc::now()).unwrap();
    let payload = format!(
        "{}|{}|{}|{}",
        cert.certificate_number,
        cert.donation_id,
        cert.user_id,
        cert.issued_at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    );
    let mut mac = Hmac::<Sha256>::new_from_slice(b"secret").unwrap();
    mac.update(payload.as_bytes());
    assert_eq!(cert.digital_signature, hex::encode(mac.finalize().into_bytes()));
}

#[test]
fn test_malformed_signature_fails_verification() {
    let mut cert = Certificate::issue(Uuid::new_v4(), Uuid::new_v4(), "secret", Utc::now()).unwrap();
    cert.digital_signature = "not-hex".to_string();
    assert!(!cert.verify_signature("secret"));
}

#[test]
fn test_record_mint_keeps_signature_valid() {
    let mut cert = Certificate::issue(Uuid::new_v4(), Uuid::new_v4(), "secret", Utc::now()).unwrap();
    cert.record_mint("0xabc".to_string());
    assert!(cert.is_minted());
    assert!(cert.verify_signature("secret"));
}

#[test]
fn test_tampered_certificate_fails_verification() {
    let mut cert = Certificate::issue(Uuid::new_v4(), Uuid::new_v4(), "secret", Utc::now()).unwrap();
    cert.user_id = Uuid::new_v4();
    assert!(!cert.verify_signature("secret"));
}
