//! Unit tests for donor schedules and registrations

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::domain::entities::donor_registration::{DonorRegistration, RegistrationStatus};
use crate::domain::entities::donor_schedule::{DonorSchedule, ScheduleStatus};

fn schedule(slots: i32) -> DonorSchedule {
    DonorSchedule::new(
        Uuid::new_v4(),
        "Donor Pagi".to_string(),
        NaiveDate::from_ymd_opt(2030, 5, 1).unwrap(),
        NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        slots,
        String::new(),
    )
    .unwrap()
}

#[test]
fn test_new_schedule_defaults() {
    let s = schedule(3);
    assert_eq!(s.status, ScheduleStatus::Upcoming);
    assert_eq!(s.slots_booked, 0);
    assert!(s.accepts_bookings());
}

#[test]
fn test_schedule_requires_positive_slots() {
    let result = DonorSchedule::new(
        Uuid::new_v4(),
        "Donor".to_string(),
        NaiveDate::from_ymd_opt(2030, 5, 1).unwrap(),
        NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        0,
        String::new(),
    );
    assert!(result.is_err());
}

#[test]
fn test_book_until_full() {
    let mut s = schedule(2);
    s.book_slot().unwrap();
    s.book_slot().unwrap();

    assert!(!s.has_free_slot());
    assert!(s.book_slot().is_err());
    assert_eq!(s.slots_booked, 2);
}

#[test]
fn test_release_never_negative() {
    let mut s = schedule(2);
    s.release_slot();
    assert_eq!(s.slots_booked, 0);
}

#[test]
fn test_only_upcoming_accepts_bookings() {
    let mut s = schedule(2);
    s.status = ScheduleStatus::Ongoing;
    assert!(s.book_slot().is_err());
}

#[test]
fn test_registration_transitions() {
    let mut reg = DonorRegistration::new(Uuid::new_v4(), Uuid::new_v4(), None, String::new());
    assert_eq!(reg.status, RegistrationStatus::Registered);

    reg.transition_to(RegistrationStatus::NoShow).unwrap();
    assert!(reg.transition_to(RegistrationStatus::Completed).is_err());
    assert!(!RegistrationStatus::Cancelled.can_transition_to(RegistrationStatus::Registered));
}

#[test]
fn test_no_show_wire_format() {
    assert_eq!(serde_json::to_string(&RegistrationStatus::NoShow).unwrap(), "\"no_show\"");
    assert_eq!("no-show".parse::<RegistrationStatus>().unwrap(), RegistrationStatus::NoShow);
}
