//! Unit tests for the notification service

use dc_shared::PageQuery;

use crate::domain::entities::notification::NotificationType;
use crate::domain::entities::user::Role;
use crate::domain::value_objects::NotificationFilter;
use crate::errors::DomainError;
use crate::services::notification::NotificationPatch;
use crate::services::test_support::Fixture;

#[tokio::test]
async fn test_reading_own_notification_marks_it_read() {
    let f = Fixture::new();
    let (user, actor) = f.user("budi@example.com", Role::User).await;
    let service = &f.notification_service;

    let created = service
        .notify(user.id, "Halo", "Selamat datang", NotificationType::General)
        .await
        .unwrap();
    assert!(!created.is_read);
    assert_eq!(service.unread_count(&actor).await.unwrap(), 1);

    let read = service.get_for_user(&actor, created.id).await.unwrap();
    assert!(read.is_read);
    assert_eq!(service.unread_count(&actor).await.unwrap(), 0);
}

#[tokio::test]
async fn test_admin_read_keeps_unread_state() {
    let f = Fixture::new();
    let (user, actor) = f.user("budi@example.com", Role::User).await;
    let (_, admin) = f.user("admin@example.com", Role::Administrator).await;
    let service = &f.notification_service;

    let created = service
        .notify(user.id, "Halo", "Pesan", NotificationType::General)
        .await
        .unwrap();
    let seen = service.get_for_user(&admin, created.id).await.unwrap();
    assert!(!seen.is_read);
    assert_eq!(service.unread_count(&actor).await.unwrap(), 1);
}

#[tokio::test]
async fn test_other_users_notification_forbidden() {
    let f = Fixture::new();
    let (owner, _) = f.user("owner@example.com", Role::User).await;
    let (_, stranger) = f.user("stranger@example.com", Role::User).await;
    let service = &f.notification_service;

    let created = service
        .notify(owner.id, "Halo", "Pesan", NotificationType::General)
        .await
        .unwrap();
    assert!(matches!(
        service.get_for_user(&stranger, created.id).await,
        Err(DomainError::Forbidden { .. })
    ));
    assert!(matches!(
        service.delete(&stranger, created.id).await,
        Err(DomainError::Forbidden { .. })
    ));
}

#[tokio::test]
async fn test_list_by_user_and_mark_all_read() {
    let f = Fixture::new();
    let (user, actor) = f.user("budi@example.com", Role::User).await;
    let (other, _) = f.user("other@example.com", Role::User).await;
    let service = &f.notification_service;

    for title in ["Satu", "Dua", "Tiga"] {
        service
            .notify(user.id, title, "Pesan", NotificationType::Request)
            .await
            .unwrap();
    }
    service
        .notify(other.id, "Lain", "Pesan", NotificationType::Request)
        .await
        .unwrap();

    let page = service
        .list_by_user(&actor, false, &PageQuery::default())
        .await
        .unwrap();
    assert_eq!(page.total, 3);

    assert_eq!(service.mark_all_read(&actor).await.unwrap(), 3);
    let unread = service
        .list_by_user(&actor, true, &PageQuery::default())
        .await
        .unwrap();
    assert_eq!(unread.total, 0);
}

#[tokio::test]
async fn test_admin_crud() {
    let f = Fixture::new();
    let (user, actor) = f.user("budi@example.com", Role::User).await;
    let (_, admin) = f.user("admin@example.com", Role::Administrator).await;
    let service = &f.notification_service;

    assert!(matches!(
        service
            .create(&actor, user.id, "Halo", "Pesan", NotificationType::General)
            .await,
        Err(DomainError::Forbidden { .. })
    ));
    assert!(service
        .create(&admin, user.id, " ", "Pesan", NotificationType::General)
        .await
        .is_err());

    let created = service
        .create(&admin, user.id, "Halo", "Pesan", NotificationType::General)
        .await
        .unwrap();
    let patched = service
        .update(
            &admin,
            created.id,
            NotificationPatch {
                title: Some("Judul baru".to_string()),
                is_read: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(patched.title, "Judul baru");
    assert_eq!(patched.message, "Pesan");
    assert!(patched.is_read);

    let all = service
        .list_all(&admin, NotificationFilter::default(), &PageQuery::default())
        .await
        .unwrap();
    assert_eq!(all.total, 1);

    service.delete(&admin, created.id).await.unwrap();
    assert_eq!(f.notifications_for(user.id).await, 0);
}
