//! Unit tests for the blood donation service

use dc_shared::PageQuery;

use crate::domain::entities::blood_donation::BloodDonationStatus;
use crate::domain::entities::donor_registration::{DonorRegistration, RegistrationStatus};
use crate::domain::entities::hospital::Hospital;
use crate::domain::entities::notification::NotificationType;
use crate::domain::entities::user::Role;
use crate::domain::value_objects::{Actor, BloodDonationFilter};
use crate::errors::{DomainError, ValidationError};
use crate::repositories::{
    BloodDonationRepository, CertificateRepository, DonorRegistrationRepository, UserRepository,
};
use crate::services::blood_donation::{BloodDonationPatch, NewBloodDonation};
use crate::services::integrations::ImageUpload;
use crate::services::test_support::{days_from_today, Fixture};
use uuid::Uuid;

const WALLET: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

struct Setup {
    donor: Actor,
    admin: Actor,
    hospital: Hospital,
    registration: DonorRegistration,
}

async fn setup(f: &Fixture) -> Setup {
    let (_, donor) = f.user("budi@example.com", Role::User).await;
    let (_, admin) = f.user("admin@example.com", Role::Administrator).await;
    let hospital = f.hospital().await;
    let registration = f
        .registrations
        .create(DonorRegistration::new(
            donor.user_id,
            Uuid::new_v4(),
            None,
            String::new(),
        ))
        .await
        .unwrap();
    Setup {
        donor,
        admin,
        hospital,
        registration,
    }
}

fn input(s: &Setup) -> NewBloodDonation {
    NewBloodDonation {
        registration_id: s.registration.id,
        hospital_id: s.hospital.id,
        donation_date: days_from_today(0),
        blood_type: "b+".to_string(),
        image: None,
    }
}

#[tokio::test]
async fn test_create_completes_registration() {
    let f = Fixture::new();
    let s = setup(&f).await;

    let donation = f
        .blood_donation_service
        .create(&s.donor, input(&s))
        .await
        .unwrap();
    assert_eq!(donation.status, BloodDonationStatus::Pending);
    assert_eq!(donation.blood_type, "B+");
    assert_eq!(donation.registration_id, s.registration.id);

    let registration = f
        .registrations
        .find_by_id(s.registration.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(registration.status, RegistrationStatus::Completed);

    // The registration can only be turned into one donation
    assert!(matches!(
        f.blood_donation_service.create(&s.donor, input(&s)).await,
        Err(DomainError::BusinessRule { .. })
    ));
}

#[tokio::test]
async fn test_create_validation_and_ownership() {
    let f = Fixture::new();
    let s = setup(&f).await;
    let (_, stranger) = f.user("stranger@example.com", Role::User).await;

    assert!(matches!(
        f.blood_donation_service.create(&stranger, input(&s)).await,
        Err(DomainError::Forbidden { .. })
    ));

    let mut bad = input(&s);
    bad.blood_type = "X".to_string();
    assert!(matches!(
        f.blood_donation_service.create(&s.donor, bad).await,
        Err(DomainError::ValidationErr(ValidationError::InvalidBloodType))
    ));

    let mut missing = input(&s);
    missing.registration_id = Uuid::new_v4();
    assert!(matches!(
        f.blood_donation_service.create(&s.donor, missing).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_completion_issues_certificate_and_notifies() {
    let f = Fixture::new();
    let s = setup(&f).await;
    let donation = f
        .blood_donation_service
        .create(&s.donor, input(&s))
        .await
        .unwrap();

    assert!(matches!(
        f.blood_donation_service
            .update_status(&s.donor, donation.id, BloodDonationStatus::Completed)
            .await,
        Err(DomainError::Forbidden { .. })
    ));

    let completed = f
        .blood_donation_service
        .update_status(&s.admin, donation.id, BloodDonationStatus::Completed)
        .await
        .unwrap();
    assert!(completed.is_completed());

    let certificate = f
        .certificate_repo
        .find_by_donation(donation.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(certificate.user_id, s.donor.user_id);

    let notes = f.notification_repo.for_user(s.donor.user_id).await;
    assert!(notes.iter().any(|n| {
        n.notification_type == NotificationType::Certificate
            && n.message.contains(&certificate.certificate_number)
    }));

    // Completed is final
    assert!(f
        .blood_donation_service
        .update_status(&s.admin, donation.id, BloodDonationStatus::Rejected)
        .await
        .is_err());
}

#[tokio::test]
async fn test_rejection_sends_status_notification() {
    let f = Fixture::new();
    let s = setup(&f).await;
    let donation = f
        .blood_donation_service
        .create(&s.donor, input(&s))
        .await
        .unwrap();

    f.blood_donation_service
        .update_status(&s.admin, donation.id, BloodDonationStatus::Rejected)
        .await
        .unwrap();

    assert!(f
        .certificate_repo
        .find_by_donation(donation.id)
        .await
        .unwrap()
        .is_none());
    let notes = f.notification_repo.for_user(s.donor.user_id).await;
    assert!(notes
        .iter()
        .any(|n| n.notification_type == NotificationType::Donation));
}

#[tokio::test]
async fn test_update_replaces_image() {
    let f = Fixture::new();
    let s = setup(&f).await;
    let mut with_image = input(&s);
    with_image.image = Some(ImageUpload::new(vec![1], "image/png").unwrap());
    let donation = f
        .blood_donation_service
        .create(&s.donor, with_image)
        .await
        .unwrap();
    let old_id = donation.image_public_id.clone().unwrap();

    let patch = BloodDonationPatch {
        blood_type: Some("o-".to_string()),
        image: Some(ImageUpload::new(vec![2], "image/jpg").unwrap()),
        ..Default::default()
    };
    let updated = f
        .blood_donation_service
        .update(&s.donor, donation.id, patch)
        .await
        .unwrap();

    assert_eq!(updated.blood_type, "O-");
    assert_ne!(updated.image_public_id.unwrap(), old_id);
    assert_eq!(f.images.deleted().await, vec![old_id]);
}

#[tokio::test]
async fn test_completed_donation_locked_for_owner() {
    let f = Fixture::new();
    let s = setup(&f).await;
    let donation = f
        .blood_donation_service
        .create(&s.donor, input(&s))
        .await
        .unwrap();
    f.blood_donation_service
        .update_status(&s.admin, donation.id, BloodDonationStatus::Completed)
        .await
        .unwrap();

    assert!(matches!(
        f.blood_donation_service
            .update(&s.donor, donation.id, BloodDonationPatch::default())
            .await,
        Err(DomainError::BusinessRule { .. })
    ));
    assert!(matches!(
        f.blood_donation_service.delete(&s.donor, donation.id).await,
        Err(DomainError::BusinessRule { .. })
    ));
    f.blood_donation_service
        .delete(&s.admin, donation.id)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_listing() {
    let f = Fixture::new();
    let s = setup(&f).await;
    f.blood_donation_service
        .create(&s.donor, input(&s))
        .await
        .unwrap();

    let mine = f
        .blood_donation_service
        .list_by_user(&s.donor, &PageQuery::default())
        .await
        .unwrap();
    assert_eq!(mine.total, 1);

    let pending = BloodDonationFilter {
        status: Some(BloodDonationStatus::Pending),
        ..Default::default()
    };
    let all = f
        .blood_donation_service
        .list_all(&s.admin, pending, &PageQuery::default())
        .await
        .unwrap();
    assert_eq!(all.total, 1);
    assert!(f
        .blood_donation_service
        .list_all(&s.donor, BloodDonationFilter::default(), &PageQuery::default())
        .await
        .is_err());
}

async fn give_wallet(f: &Fixture, user_id: Uuid) {
    let mut user = f.users.find_by_id(user_id).await.unwrap().unwrap();
    user.wallet_address = Some(WALLET.to_string());
    f.users.update(user).await.unwrap();
}

#[tokio::test]
async fn test_failed_certificate_keeps_donation_pending() {
    let f = Fixture::new();
    let s = setup(&f).await;
    let donation = f
        .blood_donation_service
        .create(&s.donor, input(&s))
        .await
        .unwrap();

    f.certificate_repo.fail_writes(true);
    assert!(matches!(
        f.blood_donation_service
            .update_status(&s.admin, donation.id, BloodDonationStatus::Completed)
            .await,
        Err(DomainError::Internal { .. })
    ));
    let stored = f.blood_donations.find_by_id(donation.id).await.unwrap().unwrap();
    assert_eq!(stored.status, BloodDonationStatus::Pending);

    // The admin can retry once the store is back
    f.certificate_repo.fail_writes(false);
    let completed = f
        .blood_donation_service
        .update_status(&s.admin, donation.id, BloodDonationStatus::Completed)
        .await
        .unwrap();
    assert!(completed.is_completed());
    assert!(f
        .certificate_repo
        .find_by_donation(donation.id)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_failed_insert_restores_registration() {
    let f = Fixture::new();
    let s = setup(&f).await;
    let mut with_image = input(&s);
    with_image.image = Some(ImageUpload::new(vec![1], "image/png").unwrap());

    f.blood_donations.fail_inserts(true);
    assert!(f
        .blood_donation_service
        .create(&s.donor, with_image)
        .await
        .is_err());

    let registration = f
        .registrations
        .find_by_id(s.registration.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(registration.status, RegistrationStatus::Registered);
    assert_eq!(f.images.stored_count().await, 0);

    f.blood_donations.fail_inserts(false);
    f.blood_donation_service
        .create(&s.donor, input(&s))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_minting_requires_wallet_on_create() {
    let f = Fixture::with_minting();
    let s = setup(&f).await;

    assert!(matches!(
        f.blood_donation_service.create(&s.donor, input(&s)).await,
        Err(DomainError::Validation { .. })
    ));
    let registration = f
        .registrations
        .find_by_id(s.registration.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(registration.status, RegistrationStatus::Registered);

    give_wallet(&f, s.donor.user_id).await;
    f.blood_donation_service
        .create(&s.donor, input(&s))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_completion_mints_certificate_to_wallet() {
    let f = Fixture::with_minting();
    let s = setup(&f).await;
    give_wallet(&f, s.donor.user_id).await;
    let donation = f
        .blood_donation_service
        .create(&s.donor, input(&s))
        .await
        .unwrap();

    f.blood_donation_service
        .update_status(&s.admin, donation.id, BloodDonationStatus::Completed)
        .await
        .unwrap();

    let certificate = f
        .certificate_repo
        .find_by_donation(donation.id)
        .await
        .unwrap()
        .unwrap();
    let tx_hash = certificate.tx_hash.clone().unwrap();
    assert!(tx_hash.starts_with("0x"));

    let minted = f.minter.minted().await;
    assert_eq!(minted.len(), 1);
    assert_eq!(minted[0].wallet_address, WALLET);
    assert_eq!(minted[0].donor_name, "Budi");
    assert_eq!(minted[0].donor_address, "Jl. Sudirman 1, Jakarta, DKI Jakarta");
    assert_eq!(minted[0].certificate_number, certificate.certificate_number);

    let notes = f.notification_repo.for_user(s.donor.user_id).await;
    assert!(notes.iter().any(|n| n.message.contains(&tx_hash)));
}

#[tokio::test]
async fn test_failed_mint_is_retried_with_same_certificate() {
    let f = Fixture::with_minting();
    let s = setup(&f).await;
    give_wallet(&f, s.donor.user_id).await;
    let donation = f
        .blood_donation_service
        .create(&s.donor, input(&s))
        .await
        .unwrap();

    f.minter.set_failing(true);
    assert!(matches!(
        f.blood_donation_service
            .update_status(&s.admin, donation.id, BloodDonationStatus::Completed)
            .await,
        Err(DomainError::External { .. })
    ));
    let stored = f.blood_donations.find_by_id(donation.id).await.unwrap().unwrap();
    assert_eq!(stored.status, BloodDonationStatus::Pending);
    let unminted = f
        .certificate_repo
        .find_by_donation(donation.id)
        .await
        .unwrap()
        .unwrap();
    assert!(unminted.tx_hash.is_none());

    f.minter.set_failing(false);
    f.blood_donation_service
        .update_status(&s.admin, donation.id, BloodDonationStatus::Completed)
        .await
        .unwrap();
    let minted = f
        .certificate_repo
        .find_by_donation(donation.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(minted.id, unminted.id);
    assert!(minted.is_minted());
    assert_eq!(f.minter.minted().await.len(), 1);
}
