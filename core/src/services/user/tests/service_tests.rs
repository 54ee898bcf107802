//! Unit tests for the user service

use dc_shared::PageQuery;
use std::sync::Arc;

use crate::domain::entities::user::Role;
use crate::domain::value_objects::Actor;
use crate::errors::{AuthError, DomainError, ValidationError};
use crate::repositories::UserRepository;
use crate::services::integrations::mock::{MockMailer, MockOAuthProvider, SentMailKind};
use crate::services::integrations::{ImageUpload, OAuthUser};
use crate::services::test_support::Fixture;
use crate::services::user::{ProfileUpdate, RegisterUser, UserService};

fn registration(email: &str) -> RegisterUser {
    RegisterUser {
        name: "Dewi Lestari".to_string(),
        gender: "female".to_string(),
        email: email.to_string(),
        password: "rahasia123".to_string(),
        phone: "081200000000".to_string(),
        blood_type: "a+".to_string(),
        birth_date: None,
        address: "Bandung".to_string(),
    }
}

async fn registered_and_verified(f: &Fixture, email: &str) -> crate::domain::entities::User {
    let user = f.user_service.register(registration(email)).await.unwrap();
    let token = user.verify_email_token.clone().unwrap();
    f.user_service.verify_email(&token).await.unwrap()
}

#[tokio::test]
async fn test_register_sends_verification_mail() {
    let f = Fixture::new();
    let user = f
        .user_service
        .register(registration("Dewi@Example.com"))
        .await
        .unwrap();

    assert_eq!(user.email, "dewi@example.com");
    assert_eq!(user.blood_type, "A+");
    assert_eq!(user.role, Role::User);
    assert!(!user.is_verified);
    assert_ne!(user.password_hash, "rahasia123");

    let sent = f.mailer.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].kind, SentMailKind::Verification);
    assert_eq!(Some(sent[0].token.clone()), user.verify_email_token);
}

#[tokio::test]
async fn test_register_duplicate_email_rejected() {
    let f = Fixture::new();
    f.user_service
        .register(registration("dewi@example.com"))
        .await
        .unwrap();

    let result = f
        .user_service
        .register(registration("DEWI@example.com"))
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))
    ));
}

#[tokio::test]
async fn test_register_rejects_bad_input() {
    let f = Fixture::new();

    assert!(matches!(
        f.user_service.register(registration("not-an-email")).await,
        Err(DomainError::ValidationErr(ValidationError::InvalidEmail))
    ));

    let mut bad_blood = registration("x@example.com");
    bad_blood.blood_type = "C+".to_string();
    assert!(matches!(
        f.user_service.register(bad_blood).await,
        Err(DomainError::ValidationErr(ValidationError::InvalidBloodType))
    ));
}

#[tokio::test]
async fn test_register_survives_mail_failure() {
    let f = Fixture::with_mailer(MockMailer::failing());
    let user = f.user_service.register(registration("a@example.com")).await;
    assert!(user.is_ok());
}

#[tokio::test]
async fn test_login_requires_verified_email() {
    let f = Fixture::new();
    f.user_service
        .register(registration("dewi@example.com"))
        .await
        .unwrap();

    let result = f.user_service.login("dewi@example.com", "rahasia123").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::EmailNotVerified))
    ));
}

#[tokio::test]
async fn test_login_after_verification() {
    let f = Fixture::new();
    let user = registered_and_verified(&f, "dewi@example.com").await;
    assert!(user.is_verified);
    assert!(user.verify_email_token.is_none());

    let response = f
        .user_service
        .login("dewi@example.com", "rahasia123")
        .await
        .unwrap();
    assert_eq!(response.user.id, user.id);

    let claims = f.tokens.verify_access_token(&response.token).unwrap();
    assert_eq!(claims.user_id().unwrap(), user.id);
}

#[tokio::test]
async fn test_login_wrong_password_or_unknown_email() {
    let f = Fixture::new();
    registered_and_verified(&f, "dewi@example.com").await;

    assert!(matches!(
        f.user_service.login("dewi@example.com", "salah").await,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
    assert!(matches!(
        f.user_service.login("nobody@example.com", "rahasia123").await,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn test_verify_email_unknown_token() {
    let f = Fixture::new();
    assert!(matches!(
        f.user_service.verify_email("nope").await,
        Err(DomainError::Auth(AuthError::InvalidVerificationToken))
    ));
}

#[tokio::test]
async fn test_reset_password_flow() {
    let f = Fixture::new();
    registered_and_verified(&f, "dewi@example.com").await;

    f.user_service
        .request_reset_password("dewi@example.com")
        .await
        .unwrap();
    let sent = f.mailer.sent().await;
    let reset = sent
        .iter()
        .find(|m| m.kind == SentMailKind::ResetPassword)
        .unwrap();

    f.user_service
        .reset_password(&reset.token, "baru456")
        .await
        .unwrap();

    assert!(f.user_service.login("dewi@example.com", "baru456").await.is_ok());
    assert!(f
        .user_service
        .login("dewi@example.com", "rahasia123")
        .await
        .is_err());

    // The token is single use
    assert!(matches!(
        f.user_service.reset_password(&reset.token, "lagi789").await,
        Err(DomainError::Auth(AuthError::InvalidResetToken))
    ));
}

#[tokio::test]
async fn test_reset_password_unknown_email() {
    let f = Fixture::new();
    assert!(matches!(
        f.user_service.request_reset_password("ghost@example.com").await,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
}

#[tokio::test]
async fn test_reset_password_rejects_login_token() {
    let f = Fixture::new();
    let user = registered_and_verified(&f, "dewi@example.com").await;
    let login = f.tokens.generate_login_token(&user).unwrap();

    assert!(matches!(
        f.user_service.reset_password(&login.token, "baru456").await,
        Err(DomainError::Auth(AuthError::InvalidResetToken))
    ));
}

#[tokio::test]
async fn test_google_login_creates_verified_user_once() {
    let f = Fixture::new();
    let profile = OAuthUser {
        email: "google@example.com".to_string(),
        name: "Google User".to_string(),
        picture: Some("https://img.test/p.png".to_string()),
    };
    let service = UserService::new(
        f.users.clone(),
        f.tokens.clone(),
        f.mailer.clone(),
        f.images.clone(),
    )
    .with_password_cost(4)
    .with_oauth(Arc::new(MockOAuthProvider::new("good-code", profile)));

    let first = service.google_login("good-code").await.unwrap();
    assert!(first.user.is_verified);
    assert_eq!(first.user.url_file.as_deref(), Some("https://img.test/p.png"));

    let second = service.google_login("good-code").await.unwrap();
    assert_eq!(first.user.id, second.user.id);
    assert_eq!(f.users.count().await.unwrap(), 1);

    assert!(matches!(
        service.google_login("bad-code").await,
        Err(DomainError::Auth(AuthError::OAuthFailed))
    ));
    assert!(service.google_login_url("xyz").unwrap().contains("state=xyz"));
}

#[tokio::test]
async fn test_google_login_without_client() {
    let f = Fixture::new();
    assert!(matches!(
        f.user_service.google_login_url("state"),
        Err(DomainError::External { .. })
    ));
}

#[tokio::test]
async fn test_update_profile_ignores_blank_fields() {
    let f = Fixture::new();
    let (_, actor) = f.user("budi@example.com", Role::User).await;

    let patch = ProfileUpdate {
        name: Some("Budi Santoso".to_string()),
        phone: Some("  ".to_string()),
        blood_type: Some("ab-".to_string()),
        birth_date: Some("1990-05-17".to_string()),
        ..Default::default()
    };
    let user = f.user_service.update_profile(&actor, patch).await.unwrap();

    assert_eq!(user.name, "Budi Santoso");
    assert_eq!(user.phone, "081234567890");
    assert_eq!(user.blood_type, "AB-");
    assert_eq!(user.birth_date.unwrap().to_string(), "1990-05-17");
}

#[tokio::test]
async fn test_update_profile_rejects_taken_email_and_bad_date() {
    let f = Fixture::new();
    f.user("taken@example.com", Role::User).await;
    let (_, actor) = f.user("budi@example.com", Role::User).await;

    let taken = ProfileUpdate {
        email: Some("taken@example.com".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        f.user_service.update_profile(&actor, taken).await,
        Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))
    ));

    let bad_date = ProfileUpdate {
        birth_date: Some("17-05-1990".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        f.user_service.update_profile(&actor, bad_date).await,
        Err(DomainError::ValidationErr(ValidationError::InvalidDate { .. }))
    ));
}

#[tokio::test]
async fn test_update_profile_sets_wallet_address() {
    let f = Fixture::new();
    let (_, actor) = f.user("budi@example.com", Role::User).await;

    let invalid = ProfileUpdate {
        wallet_address: Some("0x1234".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        f.user_service.update_profile(&actor, invalid).await,
        Err(DomainError::ValidationErr(ValidationError::InvalidFormat { .. }))
    ));

    let wallet = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
    let patch = ProfileUpdate {
        wallet_address: Some(format!(" {} ", wallet)),
        ..Default::default()
    };
    let user = f.user_service.update_profile(&actor, patch).await.unwrap();
    assert_eq!(user.wallet_address.as_deref(), Some(wallet));

    // A blank value keeps the stored wallet
    let blank = ProfileUpdate {
        wallet_address: Some(String::new()),
        ..Default::default()
    };
    let user = f.user_service.update_profile(&actor, blank).await.unwrap();
    assert_eq!(user.wallet_address.as_deref(), Some(wallet));
}

#[tokio::test]
async fn test_upload_profile_image_replaces_previous() {
    let f = Fixture::new();
    let (_, actor) = f.user("budi@example.com", Role::User).await;

    let image = || ImageUpload::new(vec![1, 2, 3], "image/png").unwrap();
    let first = f
        .user_service
        .upload_profile_image(&actor, image())
        .await
        .unwrap();
    let first_id = first.public_id.clone().unwrap();

    let second = f
        .user_service
        .upload_profile_image(&actor, image())
        .await
        .unwrap();

    assert_ne!(second.public_id.unwrap(), first_id);
    assert_eq!(f.images.deleted().await, vec![first_id]);
    assert_eq!(f.images.stored_count().await, 1);
}

#[tokio::test]
async fn test_admin_user_management() {
    let f = Fixture::new();
    let (_, admin) = f.user("admin@example.com", Role::Administrator).await;
    let (other, user) = f.user("budi@example.com", Role::User).await;

    let page = f
        .user_service
        .list(&admin, &PageQuery::default())
        .await
        .unwrap();
    assert_eq!(page.total, 2);

    assert!(matches!(
        f.user_service.list(&user, &PageQuery::default()).await,
        Err(DomainError::Forbidden { .. })
    ));
    assert!(matches!(
        f.user_service.get_by_id(&user, admin.user_id).await,
        Err(DomainError::Forbidden { .. })
    ));
    assert_eq!(
        f.user_service.get_by_id(&admin, other.id).await.unwrap().id,
        other.id
    );

    assert!(f.user_service.delete(&user, other.id).await.is_err());
    f.user_service.delete(&admin, other.id).await.unwrap();
    assert!(matches!(
        f.user_service.get_profile(&Actor::user(other.id)).await,
        Err(DomainError::NotFound { .. })
    ));
}
