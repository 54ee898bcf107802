//! Unit tests for blood requests and campaigns

use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use crate::domain::entities::blood_request::{
    BloodRequest, EventType, RequestStatus, UrgencyLevel,
};
use crate::errors::DomainError;

fn request() -> BloodRequest {
    BloodRequest::new_request(
        Uuid::new_v4(),
        Uuid::new_v4(),
        "Ani".to_string(),
        "Operasi jantung".to_string(),
        NaiveDate::from_ymd_opt(2030, 1, 15).unwrap(),
        "A+".to_string(),
        2,
        UrgencyLevel::High,
        "anemia".to_string(),
        None,
    )
}

fn time(h: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, 0, 0).unwrap()
}

#[test]
fn test_new_request_defaults() {
    let req = request();
    assert_eq!(req.status, RequestStatus::Pending);
    assert_eq!(req.event_type, EventType::BloodRequest);
    assert_eq!(req.slots_booked, 0);
    assert!(!req.is_campaign());
}

#[test]
fn test_new_campaign_is_verified() {
    let campaign = BloodRequest::new_campaign(
        Uuid::new_v4(),
        Uuid::new_v4(),
        "Donor Bersama".to_string(),
        NaiveDate::from_ymd_opt(2030, 2, 1).unwrap(),
        time(8),
        time(12),
        50,
    )
    .unwrap();

    assert_eq!(campaign.status, RequestStatus::Verified);
    assert!(campaign.is_campaign());
    assert!(campaign.counts_slots());
}

#[test]
fn test_campaign_rejects_inverted_window() {
    let result = BloodRequest::new_campaign(
        Uuid::new_v4(),
        Uuid::new_v4(),
        "Donor".to_string(),
        NaiveDate::from_ymd_opt(2030, 2, 1).unwrap(),
        time(12),
        time(8),
        10,
    );
    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

#[test]
fn test_transition_table() {
    use RequestStatus::*;

    assert!(Pending.can_transition_to(Verified));
    assert!(Pending.can_transition_to(Cancelled));
    assert!(!Pending.can_transition_to(Registered));
    assert!(!Pending.can_transition_to(Completed));
    assert!(Verified.can_transition_to(Registered));
    assert!(Registered.can_transition_to(Verified));
    assert!(!Completed.can_transition_to(Verified));
    assert!(!Cancelled.can_transition_to(Pending));
    assert!(!Expired.can_transition_to(Verified));
}

#[test]
fn test_illegal_transition_is_business_error() {
    let mut req = request();
    let err = req.transition_to(RequestStatus::Completed).unwrap_err();

    assert!(matches!(err, DomainError::BusinessRule { .. }));
    assert_eq!(req.status, RequestStatus::Pending);

    req.transition_to(RequestStatus::Verified).unwrap();
    req.transition_to(RequestStatus::Registered).unwrap();
    assert_eq!(req.status, RequestStatus::Registered);
}

#[test]
fn test_effective_status_reports_expired() {
    let mut req = request();
    let now = Utc::now();
    req.expiry_date = Some(now - Duration::hours(1));
    assert_eq!(req.effective_status(now), RequestStatus::Expired);

    req.status = RequestStatus::Completed;
    assert_eq!(req.effective_status(now), RequestStatus::Completed);

    req.status = RequestStatus::Verified;
    req.expiry_date = Some(now + Duration::hours(1));
    assert_eq!(req.effective_status(now), RequestStatus::Verified);
}

#[test]
fn test_campaign_slots() {
    let mut req = request();
    req.slots_available = 1;

    req.book_slot().unwrap();
    assert!(req.book_slot().is_err());

    req.release_slot();
    req.release_slot();
    assert_eq!(req.slots_booked, 0);
}

#[test]
fn test_status_parsing_accepts_american_spelling() {
    assert_eq!("canceled".parse::<RequestStatus>().unwrap(), RequestStatus::Cancelled);
    let parsed: RequestStatus = serde_json::from_str("\"canceled\"").unwrap();
    assert_eq!(parsed, RequestStatus::Cancelled);
    assert_eq!(serde_json::to_string(&RequestStatus::Cancelled).unwrap(), "\"cancelled\"");
}
