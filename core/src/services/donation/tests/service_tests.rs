//! Unit tests for the monetary donation service

use dc_shared::PageQuery;

use crate::domain::entities::donation::{PaymentStatus, ORDER_ID_PREFIX};
use crate::domain::entities::notification::NotificationType;
use crate::domain::entities::user::Role;
use crate::domain::value_objects::{Actor, DonationFilter};
use crate::errors::{DomainError, ValidationError};
use crate::services::donation::WebhookNotification;
use crate::services::test_support::Fixture;
use uuid::Uuid;

fn callback(order_id: &str, status: &str) -> WebhookNotification {
    WebhookNotification {
        order_id: order_id.to_string(),
        transaction_status: status.to_string(),
        transaction_time: "2024-05-01 10:15:00".to_string(),
    }
}

#[tokio::test]
async fn test_create_transaction_opens_checkout() {
    let f = Fixture::new();
    let (user, actor) = f.user("budi@example.com", Role::User).await;

    let donation = f
        .donation_service
        .create_transaction(&actor, 50_000)
        .await
        .unwrap();

    assert!(donation.order_id.starts_with(ORDER_ID_PREFIX));
    assert_eq!(donation.status, PaymentStatus::Pending);
    assert_eq!(
        donation.snap_token.as_deref(),
        Some(format!("snap-{}", donation.order_id).as_str())
    );
    assert!(donation.redirect_url.is_some());
    assert_eq!(
        f.gateway.orders().await,
        vec![(donation.order_id.clone(), 50_000)]
    );

    let notes = f.notification_repo.for_user(user.id).await;
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].notification_type, NotificationType::Payment);
}

#[tokio::test]
async fn test_create_transaction_minimum_amount() {
    let f = Fixture::new();
    let (_, actor) = f.user("budi@example.com", Role::User).await;

    assert!(matches!(
        f.donation_service.create_transaction(&actor, 9_999).await,
        Err(DomainError::Validation { .. })
    ));
    assert!(f.gateway.orders().await.is_empty());
}

#[tokio::test]
async fn test_create_transaction_unknown_user() {
    let f = Fixture::new();
    let ghost = Actor::user(Uuid::new_v4());
    assert!(matches!(
        f.donation_service.create_transaction(&ghost, 20_000).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_settlement_webhook_marks_success_once() {
    let f = Fixture::new();
    let (user, actor) = f.user("budi@example.com", Role::User).await;
    let donation = f
        .donation_service
        .create_transaction(&actor, 25_000)
        .await
        .unwrap();

    let settled = f
        .donation_service
        .handle_webhook(callback(&donation.order_id, "settlement"))
        .await
        .unwrap();
    assert_eq!(settled.status, PaymentStatus::Success);
    assert_eq!(
        settled.transaction_time.unwrap().to_string(),
        "2024-05-01 10:15:00"
    );
    assert_eq!(f.notifications_for(user.id).await, 2);

    // A repeated callback does not notify again
    f.donation_service
        .handle_webhook(callback(&donation.order_id, "capture"))
        .await
        .unwrap();
    assert_eq!(f.notifications_for(user.id).await, 2);
}

#[tokio::test]
async fn test_settled_payment_ignores_late_callbacks() {
    let f = Fixture::new();
    let (_, actor) = f.user("budi@example.com", Role::User).await;
    let donation = f
        .donation_service
        .create_transaction(&actor, 30_000)
        .await
        .unwrap();

    f.donation_service
        .handle_webhook(callback(&donation.order_id, "settlement"))
        .await
        .unwrap();

    for late in ["expire", "pending", "deny"] {
        let after = f
            .donation_service
            .handle_webhook(callback(&donation.order_id, late))
            .await
            .unwrap();
        assert_eq!(after.status, PaymentStatus::Success, "after {}", late);
    }

    let stored = f.donation_service.get_by_id(&actor, donation.id).await.unwrap();
    assert_eq!(stored.status, PaymentStatus::Success);
}

#[tokio::test]
async fn test_failed_payment_can_still_settle() {
    let f = Fixture::new();
    let (user, actor) = f.user("budi@example.com", Role::User).await;
    let donation = f
        .donation_service
        .create_transaction(&actor, 30_000)
        .await
        .unwrap();

    f.donation_service
        .handle_webhook(callback(&donation.order_id, "deny"))
        .await
        .unwrap();
    let still_failed = f
        .donation_service
        .handle_webhook(callback(&donation.order_id, "pending"))
        .await
        .unwrap();
    assert_eq!(still_failed.status, PaymentStatus::Failed);

    let settled = f
        .donation_service
        .handle_webhook(callback(&donation.order_id, "settlement"))
        .await
        .unwrap();
    assert_eq!(settled.status, PaymentStatus::Success);
    assert_eq!(f.notifications_for(user.id).await, 2);
}

#[tokio::test]
async fn test_failed_webhook_statuses() {
    let f = Fixture::new();
    let (_, actor) = f.user("budi@example.com", Role::User).await;

    for status in ["deny", "cancel", "expire", "failure"] {
        let donation = f
            .donation_service
            .create_transaction(&actor, 10_000)
            .await
            .unwrap();
        let updated = f
            .donation_service
            .handle_webhook(callback(&donation.order_id, status))
            .await
            .unwrap();
        assert_eq!(updated.status, PaymentStatus::Failed, "status {}", status);
    }
}

#[tokio::test]
async fn test_webhook_rejects_bad_payloads() {
    let f = Fixture::new();
    let (_, actor) = f.user("budi@example.com", Role::User).await;
    let donation = f
        .donation_service
        .create_transaction(&actor, 10_000)
        .await
        .unwrap();

    assert!(matches!(
        f.donation_service
            .handle_webhook(callback(&donation.order_id, "refund"))
            .await,
        Err(DomainError::Validation { .. })
    ));

    let mut bad_time = callback(&donation.order_id, "settlement");
    bad_time.transaction_time = "01/05/2024".to_string();
    assert!(matches!(
        f.donation_service.handle_webhook(bad_time).await,
        Err(DomainError::ValidationErr(ValidationError::InvalidFormat { .. }))
    ));

    assert!(matches!(
        f.donation_service
            .handle_webhook(callback("DONATION-missing", "settlement"))
            .await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_listing_and_access() {
    let f = Fixture::new();
    let (_, owner) = f.user("owner@example.com", Role::User).await;
    let (_, stranger) = f.user("stranger@example.com", Role::User).await;
    let (_, admin) = f.user("admin@example.com", Role::Administrator).await;

    let donation = f
        .donation_service
        .create_transaction(&owner, 15_000)
        .await
        .unwrap();
    f.donation_service
        .create_transaction(&stranger, 15_000)
        .await
        .unwrap();

    let mine = f
        .donation_service
        .list_by_user(&owner, &PageQuery::default())
        .await
        .unwrap();
    assert_eq!(mine.total, 1);

    let all = f
        .donation_service
        .list_all(&admin, DonationFilter::default(), &PageQuery::default())
        .await
        .unwrap();
    assert_eq!(all.total, 2);

    assert!(matches!(
        f.donation_service.get_by_id(&stranger, donation.id).await,
        Err(DomainError::Forbidden { .. })
    ));
    assert_eq!(
        f.donation_service.get_by_id(&admin, donation.id).await.unwrap().id,
        donation.id
    );
}
