//! Unit tests for the donor registration service

use dc_shared::PageQuery;
use uuid::Uuid;

use crate::domain::entities::blood_request::{BloodRequest, RequestStatus};
use crate::domain::entities::donor_registration::RegistrationStatus;
use crate::domain::entities::donor_schedule::DonorSchedule;
use crate::domain::entities::notification::NotificationType;
use crate::domain::entities::user::Role;
use crate::domain::value_objects::{Actor, RegistrationFilter};
use crate::errors::DomainError;
use crate::repositories::{BloodRequestRepository, DonorScheduleRepository};
use crate::services::donor_registration::{NewRegistration, RegistrationPatch};
use crate::services::test_support::{days_from_today, new_campaign, new_request, time, Fixture};

fn signup(request_id: Uuid, schedule_id: Option<Uuid>) -> NewRegistration {
    NewRegistration {
        request_id,
        schedule_id,
        notes: "Pagi hari".to_string(),
    }
}

async fn donor(f: &Fixture, email: &str) -> Actor {
    let (_, actor) = f.user(email, Role::User).await;
    f.passport_service.create_or_renew(&actor).await.unwrap();
    actor
}

async fn admin(f: &Fixture) -> Actor {
    f.user("admin@example.com", Role::Administrator).await.1
}

async fn campaign(f: &Fixture, admin: &Actor, slots: i32) -> BloodRequest {
    let hospital = f.hospital().await;
    f.request_service
        .create_campaign(admin, new_campaign(hospital.id, slots))
        .await
        .unwrap()
}

async fn verified_request(f: &Fixture, admin: &Actor) -> BloodRequest {
    let (_, requester) = f.user("requester@example.com", Role::User).await;
    let hospital = f.hospital().await;
    let request = f
        .request_service
        .create_request(&requester, new_request(hospital.id))
        .await
        .unwrap();
    f.request_service
        .update_status(admin, request.id, RequestStatus::Verified)
        .await
        .unwrap()
}

async fn schedule(f: &Fixture, slots: i32) -> DonorSchedule {
    let hospital = f.hospital().await;
    let schedule = DonorSchedule::new(
        hospital.id,
        "Donor Pagi".to_string(),
        days_from_today(5),
        time(8, 0),
        time(10, 0),
        slots,
        String::new(),
    )
    .unwrap();
    f.schedules.create(schedule).await.unwrap()
}

#[tokio::test]
async fn test_register_books_campaign_slot_and_notifies() {
    let f = Fixture::new();
    let admin = admin(&f).await;
    let campaign = campaign(&f, &admin, 2).await;
    let actor = donor(&f, "budi@example.com").await;

    let registration = f
        .registration_service
        .register(&actor, signup(campaign.id, None))
        .await
        .unwrap();
    assert_eq!(registration.status, RegistrationStatus::Registered);

    let stored = f.requests.find_by_id(campaign.id).await.unwrap().unwrap();
    assert_eq!(stored.slots_booked, 1);
    assert_eq!(stored.status, RequestStatus::Verified);

    let notes = f.notification_repo.for_user(actor.user_id).await;
    assert!(notes
        .iter()
        .any(|n| n.notification_type == NotificationType::Registration));
}

#[tokio::test]
async fn test_register_requires_valid_passport() {
    let f = Fixture::new();
    let admin = admin(&f).await;
    let campaign = campaign(&f, &admin, 2).await;
    let (_, actor) = f.user("nopass@example.com", Role::User).await;

    assert!(matches!(
        f.registration_service
            .register(&actor, signup(campaign.id, None))
            .await,
        Err(DomainError::NotFound { .. })
    ));
    let stored = f.requests.find_by_id(campaign.id).await.unwrap().unwrap();
    assert_eq!(stored.slots_booked, 0);
}

#[tokio::test]
async fn test_register_rejects_pending_request() {
    let f = Fixture::new();
    let (_, requester) = f.user("requester@example.com", Role::User).await;
    let hospital = f.hospital().await;
    let pending = f
        .request_service
        .create_request(&requester, new_request(hospital.id))
        .await
        .unwrap();
    let actor = donor(&f, "budi@example.com").await;

    assert!(matches!(
        f.registration_service
            .register(&actor, signup(pending.id, None))
            .await,
        Err(DomainError::BusinessRule { .. })
    ));
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let f = Fixture::new();
    let admin = admin(&f).await;
    let campaign = campaign(&f, &admin, 5).await;
    let actor = donor(&f, "budi@example.com").await;

    f.registration_service
        .register(&actor, signup(campaign.id, None))
        .await
        .unwrap();
    assert!(matches!(
        f.registration_service
            .register(&actor, signup(campaign.id, None))
            .await,
        Err(DomainError::Conflict { .. })
    ));
}

#[tokio::test]
async fn test_full_campaign_rejects_and_releases_schedule() {
    let f = Fixture::new();
    let admin = admin(&f).await;
    let campaign = campaign(&f, &admin, 1).await;
    let schedule = schedule(&f, 5).await;

    let first = donor(&f, "first@example.com").await;
    f.registration_service
        .register(&first, signup(campaign.id, None))
        .await
        .unwrap();

    let second = donor(&f, "second@example.com").await;
    assert!(matches!(
        f.registration_service
            .register(&second, signup(campaign.id, Some(schedule.id)))
            .await,
        Err(DomainError::BusinessRule { .. })
    ));

    let stored = f.schedules.find_by_id(schedule.id).await.unwrap().unwrap();
    assert_eq!(stored.slots_booked, 0);
}

#[tokio::test]
async fn test_full_schedule_rejects() {
    let f = Fixture::new();
    let admin = admin(&f).await;
    let campaign = campaign(&f, &admin, 10).await;
    let schedule = schedule(&f, 1).await;

    let first = donor(&f, "first@example.com").await;
    f.registration_service
        .register(&first, signup(campaign.id, Some(schedule.id)))
        .await
        .unwrap();

    let second = donor(&f, "second@example.com").await;
    assert!(f
        .registration_service
        .register(&second, signup(campaign.id, Some(schedule.id)))
        .await
        .is_err());

    let stored = f.requests.find_by_id(campaign.id).await.unwrap().unwrap();
    assert_eq!(stored.slots_booked, 1);
}

#[tokio::test]
async fn test_patient_request_moves_to_registered_and_back() {
    let f = Fixture::new();
    let admin = admin(&f).await;
    let request = verified_request(&f, &admin).await;
    let actor = donor(&f, "budi@example.com").await;

    let registration = f
        .registration_service
        .register(&actor, signup(request.id, None))
        .await
        .unwrap();
    let stored = f.requests.find_by_id(request.id).await.unwrap().unwrap();
    assert_eq!(stored.status, RequestStatus::Registered);

    let cancel = RegistrationPatch {
        status: Some(RegistrationStatus::Cancelled),
        notes: None,
    };
    let cancelled = f
        .registration_service
        .update(&actor, registration.id, cancel)
        .await
        .unwrap();
    assert_eq!(cancelled.status, RegistrationStatus::Cancelled);

    let stored = f.requests.find_by_id(request.id).await.unwrap().unwrap();
    assert_eq!(stored.status, RequestStatus::Verified);
}

#[tokio::test]
async fn test_cancel_releases_slots() {
    let f = Fixture::new();
    let admin = admin(&f).await;
    let campaign = campaign(&f, &admin, 3).await;
    let schedule = schedule(&f, 3).await;
    let actor = donor(&f, "budi@example.com").await;

    let registration = f
        .registration_service
        .register(&actor, signup(campaign.id, Some(schedule.id)))
        .await
        .unwrap();

    f.registration_service
        .update(
            &actor,
            registration.id,
            RegistrationPatch {
                status: Some(RegistrationStatus::Cancelled),
                notes: None,
            },
        )
        .await
        .unwrap();

    let stored_campaign = f.requests.find_by_id(campaign.id).await.unwrap().unwrap();
    let stored_schedule = f.schedules.find_by_id(schedule.id).await.unwrap().unwrap();
    assert_eq!(stored_campaign.slots_booked, 0);
    assert_eq!(stored_schedule.slots_booked, 0);

    // A cancelled registration no longer blocks signing up again
    assert!(f
        .registration_service
        .register(&actor, signup(campaign.id, None))
        .await
        .is_ok());
}

#[tokio::test]
async fn test_cancel_on_event_day_rejected() {
    let f = Fixture::new();
    let admin = admin(&f).await;
    let hospital = f.hospital().await;
    let mut input = new_campaign(hospital.id, 3);
    input.event_date = days_from_today(0);
    let campaign = f.request_service.create_campaign(&admin, input).await.unwrap();
    let actor = donor(&f, "budi@example.com").await;

    let registration = f
        .registration_service
        .register(&actor, signup(campaign.id, None))
        .await
        .unwrap();
    assert!(matches!(
        f.registration_service
            .update(
                &actor,
                registration.id,
                RegistrationPatch {
                    status: Some(RegistrationStatus::Cancelled),
                    notes: None,
                },
            )
            .await,
        Err(DomainError::BusinessRule { .. })
    ));
}

#[tokio::test]
async fn test_user_cannot_mark_completed_or_touch_others() {
    let f = Fixture::new();
    let admin = admin(&f).await;
    let campaign = campaign(&f, &admin, 3).await;
    let actor = donor(&f, "budi@example.com").await;
    let stranger = donor(&f, "stranger@example.com").await;

    let registration = f
        .registration_service
        .register(&actor, signup(campaign.id, None))
        .await
        .unwrap();

    assert!(matches!(
        f.registration_service
            .update(
                &actor,
                registration.id,
                RegistrationPatch {
                    status: Some(RegistrationStatus::Completed),
                    notes: None,
                },
            )
            .await,
        Err(DomainError::Forbidden { .. })
    ));
    assert!(matches!(
        f.registration_service.get_by_id(&stranger, registration.id).await,
        Err(DomainError::Forbidden { .. })
    ));
    assert!(matches!(
        f.registration_service.delete(&stranger, registration.id).await,
        Err(DomainError::Forbidden { .. })
    ));
}

#[tokio::test]
async fn test_admin_update_and_listing() {
    let f = Fixture::new();
    let admin = admin(&f).await;
    let campaign = campaign(&f, &admin, 3).await;
    let actor = donor(&f, "budi@example.com").await;

    let registration = f
        .registration_service
        .register(&actor, signup(campaign.id, None))
        .await
        .unwrap();

    let updated = f
        .registration_service
        .update(
            &admin,
            registration.id,
            RegistrationPatch {
                status: Some(RegistrationStatus::NoShow),
                notes: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, RegistrationStatus::NoShow);
    assert_eq!(updated.notes, "");

    let all = f
        .registration_service
        .list_all(&admin, RegistrationFilter::default(), &PageQuery::default())
        .await
        .unwrap();
    assert_eq!(all.total, 1);

    let mine = f
        .registration_service
        .list_by_user(&actor, &PageQuery::default())
        .await
        .unwrap();
    assert_eq!(mine.total, 1);
}

#[tokio::test]
async fn test_delete_active_registration_releases_slot() {
    let f = Fixture::new();
    let admin = admin(&f).await;
    let campaign = campaign(&f, &admin, 3).await;
    let actor = donor(&f, "budi@example.com").await;

    let registration = f
        .registration_service
        .register(&actor, signup(campaign.id, None))
        .await
        .unwrap();
    f.registration_service
        .delete(&actor, registration.id)
        .await
        .unwrap();

    let stored = f.requests.find_by_id(campaign.id).await.unwrap().unwrap();
    assert_eq!(stored.slots_booked, 0);
    assert!(matches!(
        f.registration_service.get_by_id(&actor, registration.id).await,
        Err(DomainError::NotFound { .. })
    ));
}
