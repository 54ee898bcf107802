//! Unit tests for mock user repository

use dc_shared::PageQuery;

use crate::domain::entities::user::User;
use crate::errors::DomainError;
use crate::repositories::user::{MockUserRepository, UserRepository};

fn user(name: &str, email: &str) -> User {
    User::new(name.to_string(), email.to_string(), "hash".to_string())
}

#[tokio::test]
async fn test_mock_repository_create_and_find() {
    let repo = MockUserRepository::new();
    let created = repo.create(user("Dewi", "dewi@example.com")).await.unwrap();

    let found = repo.find_by_id(created.id).await.unwrap();
    assert_eq!(found.unwrap().email, "dewi@example.com");

    let by_email = repo.find_by_email("DEWI@example.com").await.unwrap();
    assert_eq!(by_email.unwrap().id, created.id);
}

#[tokio::test]
async fn test_mock_repository_duplicate_email() {
    let repo = MockUserRepository::new();
    repo.create(user("A", "same@example.com")).await.unwrap();

    let result = repo.create(user("B", "same@example.com")).await;
    assert!(matches!(result, Err(DomainError::Conflict { .. })));
}

#[tokio::test]
async fn test_mock_repository_update_missing_user() {
    let repo = MockUserRepository::new();
    let result = repo.update(user("Ghost", "ghost@example.com")).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_mock_repository_find_by_verify_token() {
    let repo = MockUserRepository::new();
    let mut u = user("Eka", "eka@example.com");
    u.verify_email_token = Some("tok123".to_string());
    repo.create(u).await.unwrap();

    assert!(repo.find_by_verify_token("tok123").await.unwrap().is_some());
    assert!(repo.find_by_verify_token("other").await.unwrap().is_none());
}

#[tokio::test]
async fn test_mock_repository_list_search_and_paging() {
    let repo = MockUserRepository::new();
    for i in 0..12 {
        repo.create(user(&format!("User {}", i), &format!("u{}@example.com", i)))
            .await
            .unwrap();
    }
    repo.create(user("Special", "special@example.com")).await.unwrap();

    let page = repo.list(&PageQuery::default()).await.unwrap();
    assert_eq!(page.total, 13);
    assert_eq!(page.items.len(), 10);

    let query = PageQuery {
        search: Some("special".to_string()),
        ..Default::default()
    };
    let found = repo.list(&query).await.unwrap();
    assert_eq!(found.total, 1);
    assert_eq!(repo.count().await.unwrap(), 13);
}
