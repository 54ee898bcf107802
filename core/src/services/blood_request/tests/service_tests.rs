//! Unit tests for the blood request service

use chrono::{Duration, Utc};
use dc_shared::PageQuery;
use uuid::Uuid;

use crate::domain::entities::blood_request::{EventType, RequestStatus};
use crate::domain::entities::notification::NotificationType;
use crate::domain::entities::user::Role;
use crate::domain::value_objects::BloodRequestFilter;
use crate::errors::{DomainError, ValidationError};
use crate::repositories::BloodRequestRepository;
use crate::services::blood_request::BloodRequestPatch;
use crate::services::integrations::ImageUpload;
use crate::services::test_support::{new_campaign, new_request, time, Fixture};

#[tokio::test]
async fn test_create_request_is_pending_and_notifies() {
    let f = Fixture::new();
    let (user, actor) = f.user("budi@example.com", Role::User).await;
    let hospital = f.hospital().await;

    let request = f
        .request_service
        .create_request(&actor, new_request(hospital.id))
        .await
        .unwrap();

    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(request.event_type, EventType::BloodRequest);
    assert_eq!(request.user_id, user.id);

    let notes = f.notification_repo.for_user(user.id).await;
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].notification_type, NotificationType::Request);
}

#[tokio::test]
async fn test_create_request_validation() {
    let f = Fixture::new();
    let (_, actor) = f.user("budi@example.com", Role::User).await;
    let hospital = f.hospital().await;

    let mut bad_blood = new_request(hospital.id);
    bad_blood.blood_type = "Z".to_string();
    assert!(matches!(
        f.request_service.create_request(&actor, bad_blood).await,
        Err(DomainError::ValidationErr(ValidationError::InvalidBloodType))
    ));

    let mut zero = new_request(hospital.id);
    zero.quantity = 0;
    assert!(matches!(
        f.request_service.create_request(&actor, zero).await,
        Err(DomainError::ValidationErr(ValidationError::OutOfRange { .. }))
    ));

    assert!(matches!(
        f.request_service
            .create_request(&actor, new_request(Uuid::new_v4()))
            .await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_campaign_creation_is_admin_only_and_verified() {
    let f = Fixture::new();
    let (_, user) = f.user("budi@example.com", Role::User).await;
    let (_, admin) = f.user("admin@example.com", Role::Administrator).await;
    let hospital = f.hospital().await;

    assert!(matches!(
        f.request_service
            .create_campaign(&user, new_campaign(hospital.id, 10))
            .await,
        Err(DomainError::Forbidden { .. })
    ));

    let mut input = new_campaign(hospital.id, 10);
    input.image = Some(ImageUpload::new(vec![9; 4], "image/jpeg").unwrap());
    let campaign = f.request_service.create_campaign(&admin, input).await.unwrap();

    assert_eq!(campaign.status, RequestStatus::Verified);
    assert!(campaign.is_campaign());
    assert!(campaign.image_url.is_some());
    assert_eq!(f.images.stored_count().await, 1);

    let fetched = f.request_service.get_campaign(campaign.id).await.unwrap();
    assert_eq!(fetched.id, campaign.id);
}

#[tokio::test]
async fn test_campaign_window_must_be_ordered() {
    let f = Fixture::new();
    let (_, admin) = f.user("admin@example.com", Role::Administrator).await;
    let hospital = f.hospital().await;

    let mut input = new_campaign(hospital.id, 10);
    input.start_time = time(12, 0);
    input.end_time = time(8, 0);
    assert!(f.request_service.create_campaign(&admin, input).await.is_err());
}

#[tokio::test]
async fn test_public_campaign_listing_hides_requests() {
    let f = Fixture::new();
    let (_, user) = f.user("budi@example.com", Role::User).await;
    let (_, admin) = f.user("admin@example.com", Role::Administrator).await;
    let hospital = f.hospital().await;

    let request = f
        .request_service
        .create_request(&user, new_request(hospital.id))
        .await
        .unwrap();
    f.request_service
        .create_campaign(&admin, new_campaign(hospital.id, 5))
        .await
        .unwrap();

    let page = f
        .request_service
        .list_campaigns(BloodRequestFilter::default(), &PageQuery::default())
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert!(page.items.iter().all(|r| r.is_campaign()));

    assert!(matches!(
        f.request_service.get_campaign(request.id).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_owner_scoping() {
    let f = Fixture::new();
    let (_, owner) = f.user("owner@example.com", Role::User).await;
    let (_, stranger) = f.user("stranger@example.com", Role::User).await;
    let (_, admin) = f.user("admin@example.com", Role::Administrator).await;
    let hospital = f.hospital().await;

    let request = f
        .request_service
        .create_request(&owner, new_request(hospital.id))
        .await
        .unwrap();

    assert!(f.request_service.get_by_id(&owner, request.id).await.is_ok());
    assert!(f.request_service.get_by_id(&admin, request.id).await.is_ok());
    assert!(matches!(
        f.request_service.get_by_id(&stranger, request.id).await,
        Err(DomainError::Forbidden { .. })
    ));

    let mine = f
        .request_service
        .list_by_user(&stranger, BloodRequestFilter::default(), &PageQuery::default())
        .await
        .unwrap();
    assert_eq!(mine.total, 0);

    assert!(matches!(
        f.request_service
            .list_all(&owner, BloodRequestFilter::default(), &PageQuery::default())
            .await,
        Err(DomainError::Forbidden { .. })
    ));
}

#[tokio::test]
async fn test_user_may_only_cancel() {
    let f = Fixture::new();
    let (_, owner) = f.user("owner@example.com", Role::User).await;
    let hospital = f.hospital().await;
    let request = f
        .request_service
        .create_request(&owner, new_request(hospital.id))
        .await
        .unwrap();

    let verify = BloodRequestPatch {
        status: Some(RequestStatus::Verified),
        ..Default::default()
    };
    assert!(matches!(
        f.request_service.update(&owner, request.id, verify).await,
        Err(DomainError::Forbidden { .. })
    ));

    let edit = BloodRequestPatch {
        quantity: Some(4),
        ..Default::default()
    };
    let edited = f.request_service.update(&owner, request.id, edit).await.unwrap();
    assert_eq!(edited.quantity, 4);

    let cancel = BloodRequestPatch {
        status: Some(RequestStatus::Cancelled),
        ..Default::default()
    };
    let cancelled = f.request_service.update(&owner, request.id, cancel).await.unwrap();
    assert_eq!(cancelled.status, RequestStatus::Cancelled);

    let late_edit = BloodRequestPatch {
        quantity: Some(1),
        ..Default::default()
    };
    assert!(matches!(
        f.request_service.update(&owner, request.id, late_edit).await,
        Err(DomainError::BusinessRule { .. })
    ));
}

#[tokio::test]
async fn test_admin_status_update_notifies_requester() {
    let f = Fixture::new();
    let (user, owner) = f.user("owner@example.com", Role::User).await;
    let (_, admin) = f.user("admin@example.com", Role::Administrator).await;
    let hospital = f.hospital().await;
    let request = f
        .request_service
        .create_request(&owner, new_request(hospital.id))
        .await
        .unwrap();

    let verified = f
        .request_service
        .update_status(&admin, request.id, RequestStatus::Verified)
        .await
        .unwrap();
    assert_eq!(verified.status, RequestStatus::Verified);

    let notes = f.notification_repo.for_user(user.id).await;
    assert!(notes
        .iter()
        .any(|n| n.notification_type == NotificationType::Status));

    assert!(matches!(
        f.request_service
            .update_status(&admin, request.id, RequestStatus::Pending)
            .await,
        Err(DomainError::BusinessRule { .. })
    ));
}

#[tokio::test]
async fn test_expired_request_reported_on_read() {
    let f = Fixture::new();
    let (_, owner) = f.user("owner@example.com", Role::User).await;
    let hospital = f.hospital().await;

    let mut input = new_request(hospital.id);
    input.expiry_date = Some(Utc::now() - Duration::hours(1));
    let request = f.request_service.create_request(&owner, input).await.unwrap();

    let read = f.request_service.get_by_id(&owner, request.id).await.unwrap();
    assert_eq!(read.status, RequestStatus::Expired);

    let stored = f.requests.find_by_id(request.id).await.unwrap().unwrap();
    assert_eq!(stored.status, RequestStatus::Pending);
}

#[tokio::test]
async fn test_slot_capacity_cannot_drop_below_booked() {
    let f = Fixture::new();
    let (_, admin) = f.user("admin@example.com", Role::Administrator).await;
    let hospital = f.hospital().await;
    let campaign = f
        .request_service
        .create_campaign(&admin, new_campaign(hospital.id, 3))
        .await
        .unwrap();
    assert!(f.requests.book_slot(campaign.id).await.unwrap());
    assert!(f.requests.book_slot(campaign.id).await.unwrap());

    let shrink = BloodRequestPatch {
        slots_available: Some(1),
        ..Default::default()
    };
    assert!(matches!(
        f.request_service.update(&admin, campaign.id, shrink).await,
        Err(DomainError::BusinessRule { .. })
    ));
}

#[tokio::test]
async fn test_delete_rules() {
    let f = Fixture::new();
    let (_, owner) = f.user("owner@example.com", Role::User).await;
    let (_, stranger) = f.user("stranger@example.com", Role::User).await;
    let (_, admin) = f.user("admin@example.com", Role::Administrator).await;
    let hospital = f.hospital().await;

    let pending = f
        .request_service
        .create_request(&owner, new_request(hospital.id))
        .await
        .unwrap();
    assert!(matches!(
        f.request_service.delete(&stranger, pending.id).await,
        Err(DomainError::Forbidden { .. })
    ));
    f.request_service.delete(&owner, pending.id).await.unwrap();

    let verified = f
        .request_service
        .create_request(&owner, new_request(hospital.id))
        .await
        .unwrap();
    f.request_service
        .update_status(&admin, verified.id, RequestStatus::Verified)
        .await
        .unwrap();
    assert!(matches!(
        f.request_service.delete(&owner, verified.id).await,
        Err(DomainError::BusinessRule { .. })
    ));
    f.request_service.delete(&admin, verified.id).await.unwrap();
    assert!(f.requests.find_by_id(verified.id).await.unwrap().is_none());
}
