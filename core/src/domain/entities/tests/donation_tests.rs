//! Unit tests for monetary donations and blood donation status

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::entities::blood_donation::{BloodDonation, BloodDonationStatus};
use crate::domain::entities::donation::{
    parse_transaction_time, Donation, PaymentStatus, MIN_DONATION_AMOUNT,
};
use crate::domain::entities::notification::{Notification, NotificationType};

#[test]
fn test_donation_minimum_amount() {
    assert!(Donation::new(Uuid::new_v4(), MIN_DONATION_AMOUNT - 1).is_err());

    let donation = Donation::new(Uuid::new_v4(), MIN_DONATION_AMOUNT).unwrap();
    assert_eq!(donation.status, PaymentStatus::Pending);
    assert!(donation.order_id.starts_with("DONATION-"));
    assert!(Uuid::parse_str(&donation.order_id["DONATION-".len()..]).is_ok());
}

#[test]
fn test_gateway_status_mapping() {
    assert_eq!(PaymentStatus::from_gateway("settlement").unwrap(), PaymentStatus::Success);
    assert_eq!(PaymentStatus::from_gateway("capture").unwrap(), PaymentStatus::Success);
    assert_eq!(PaymentStatus::from_gateway("pending").unwrap(), PaymentStatus::Pending);
    for failed in ["deny", "cancel", "expire", "failure"] {
        assert_eq!(PaymentStatus::from_gateway(failed).unwrap(), PaymentStatus::Failed);
    }
    assert!(PaymentStatus::from_gateway("refund").is_err());
}

#[test]
fn test_callback_never_downgrades_success() {
    let at = parse_transaction_time("2024-05-01 10:00:00").unwrap();
    let later = parse_transaction_time("2024-05-02 10:00:00").unwrap();
    let mut donation = Donation::new(Uuid::new_v4(), MIN_DONATION_AMOUNT).unwrap();

    assert!(donation.apply_callback(PaymentStatus::Success, at));
    assert!(!donation.apply_callback(PaymentStatus::Failed, later));
    assert!(!donation.apply_callback(PaymentStatus::Pending, later));
    assert_eq!(donation.status, PaymentStatus::Success);
    assert_eq!(donation.transaction_time, Some(at));
}

#[test]
fn test_transaction_time_format() {
    let parsed = parse_transaction_time("2024-05-01 13:45:10").unwrap();
    assert_eq!(parsed.to_string(), "2024-05-01 13:45:10");
    assert!(parse_transaction_time("2024-05-01T13:45:10Z").is_err());
}

#[test]
fn test_blood_donation_only_pending_moves() {
    let mut donation = BloodDonation::new(
        Uuid::new_v4(),
        Uuid::new_v4(),
        Uuid::new_v4(),
        NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
        "O-".to_string(),
    );
    assert_eq!(donation.status, BloodDonationStatus::Pending);

    donation.transition_to(BloodDonationStatus::Completed).unwrap();
    assert!(donation.is_completed());
    assert!(donation.transition_to(BloodDonationStatus::Rejected).is_err());
}

#[test]
fn test_notification_mark_read() {
    let mut n = Notification::new(Uuid::new_v4(), "Judul", "Isi", NotificationType::General);
    assert!(!n.is_read);
    n.mark_read();
    assert!(n.is_read);
    assert_eq!(
        serde_json::to_value(&n).unwrap()["notification_type"],
        "General"
    );
}
