//! Service graph wired over the in-memory repositories, for unit tests

use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use dc_shared::JwtConfig;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::hospital::Hospital;
use crate::domain::entities::user::{Role, User};
use crate::domain::time::jakarta_date;
use crate::domain::value_objects::Actor;
use crate::repositories::{
    HospitalRepository, MockBloodDonationRepository,
    MockBloodRequestRepository, MockCertificateRepository, MockDonationRepository,
    MockDonorRegistrationRepository, MockDonorScheduleRepository, MockHealthPassportRepository,
    MockHospitalRepository, MockNotificationRepository, MockUserRepository, UserRepository,
};
use crate::services::blood_donation::BloodDonationService;
use crate::services::blood_request::{BloodRequestService, NewBloodRequest, NewCampaign};
use crate::services::certificate::CertificateService;
use crate::services::dashboard::{DashboardRepositories, DashboardService};
use crate::services::donation::DonationService;
use crate::services::donor_registration::DonorRegistrationService;
use crate::services::donor_schedule::DonorScheduleService;
use crate::services::health_passport::HealthPassportService;
use crate::services::hospital::HospitalService;
use crate::services::integrations::mock::{
    InMemoryCache, MockCertificateMinter, MockImageStorage, MockMailer, MockPaymentGateway,
};
use crate::services::notification::NotificationService;
use crate::services::token::TokenService;
use crate::services::user::UserService;

pub(crate) const TEST_SECRET: &str = "test-secret";

#[allow(dead_code)]
pub(crate) struct Fixture {
    pub users: Arc<MockUserRepository>,
    pub hospitals: Arc<MockHospitalRepository>,
    pub requests: Arc<MockBloodRequestRepository>,
    pub schedules: Arc<MockDonorScheduleRepository>,
    pub registrations: Arc<MockDonorRegistrationRepository>,
    pub passports: Arc<MockHealthPassportRepository>,
    pub blood_donations: Arc<MockBloodDonationRepository>,
    pub certificate_repo: Arc<MockCertificateRepository>,
    pub notification_repo: Arc<MockNotificationRepository>,
    pub donation_repo: Arc<MockDonationRepository>,
    pub mailer: Arc<MockMailer>,
    pub images: Arc<MockImageStorage>,
    pub gateway: Arc<MockPaymentGateway>,
    pub minter: Arc<MockCertificateMinter>,
    pub cache: Arc<InMemoryCache>,
    pub tokens: Arc<TokenService>,
    pub user_service: UserService,
    pub hospital_service: HospitalService,
    pub notification_service: Arc<NotificationService>,
    pub request_service: BloodRequestService,
    pub schedule_service: DonorScheduleService,
    pub passport_service: Arc<HealthPassportService>,
    pub registration_service: DonorRegistrationService,
    pub certificate_service: Arc<CertificateService>,
    pub blood_donation_service: BloodDonationService,
    pub donation_service: DonationService,
    pub dashboard_service: DashboardService,
}

impl Fixture {
    pub fn new() -> Self {
        Self::build(MockMailer::new(), false)
    }

    pub fn with_mailer(mailer: MockMailer) -> Self {
        Self::build(mailer, false)
    }

    /// Certificates are minted through `minter`
    pub fn with_minting() -> Self {
        Self::build(MockMailer::new(), true)
    }

    fn build(mailer: MockMailer, minting: bool) -> Self {
        let users = Arc::new(MockUserRepository::new());
        let hospitals = Arc::new(MockHospitalRepository::new());
        let requests = Arc::new(MockBloodRequestRepository::new());
        let schedules = Arc::new(MockDonorScheduleRepository::new());
        let registrations = Arc::new(MockDonorRegistrationRepository::new());
        let passports = Arc::new(MockHealthPassportRepository::new());
        let blood_donations = Arc::new(MockBloodDonationRepository::new());
        let certificate_repo = Arc::new(MockCertificateRepository::new());
        let notification_repo = Arc::new(MockNotificationRepository::new());
        let donation_repo = Arc::new(MockDonationRepository::new());
        let mailer = Arc::new(mailer);
        let images = Arc::new(MockImageStorage::new());
        let gateway = Arc::new(MockPaymentGateway::new());
        let minter = Arc::new(MockCertificateMinter::new());
        let cache = Arc::new(InMemoryCache::new());
        let tokens = Arc::new(TokenService::new(JwtConfig::new(TEST_SECRET)));

        let notification_service = Arc::new(NotificationService::new(notification_repo.clone()));
        let passport_service = Arc::new(HealthPassportService::new(passports.clone()));
        let mut certificate_service = CertificateService::new(certificate_repo.clone(), tokens.clone());
        if minting {
            certificate_service = certificate_service.with_minter(minter.clone());
        }
        let certificate_service = Arc::new(certificate_service);

        Self {
            user_service: UserService::new(
                users.clone(),
                tokens.clone(),
                mailer.clone(),
                images.clone(),
            )
            .with_password_cost(4),
            hospital_service: HospitalService::new(hospitals.clone()),
            request_service: BloodRequestService::new(
                requests.clone(),
                hospitals.clone(),
                notification_service.clone(),
                images.clone(),
            ),
            schedule_service: DonorScheduleService::new(schedules.clone(), hospitals.clone()),
            registration_service: DonorRegistrationService::new(
                registrations.clone(),
                requests.clone(),
                schedules.clone(),
                passport_service.clone(),
                notification_service.clone(),
            ),
            blood_donation_service: BloodDonationService::new(
                blood_donations.clone(),
                registrations.clone(),
                hospitals.clone(),
                users.clone(),
                certificate_service.clone(),
                notification_service.clone(),
                images.clone(),
            ),
            donation_service: DonationService::new(
                donation_repo.clone(),
                users.clone(),
                gateway.clone(),
                notification_service.clone(),
            ),
            dashboard_service: DashboardService::new(
                DashboardRepositories {
                    users: users.clone(),
                    requests: requests.clone(),
                    blood_donations: blood_donations.clone(),
                    passports: passports.clone(),
                    donations: donation_repo.clone(),
                },
                cache.clone(),
                60,
            ),
            users,
            hospitals,
            requests,
            schedules,
            registrations,
            passports,
            blood_donations,
            certificate_repo,
            notification_repo,
            donation_repo,
            mailer,
            images,
            gateway,
            minter,
            cache,
            tokens,
            notification_service,
            passport_service,
            certificate_service,
        }
    }

    /// Stores a verified user with the given role
    pub async fn user(&self, email: &str, role: Role) -> (User, Actor) {
        let mut user = User::new("Budi".to_string(), email.to_string(), "hash".to_string());
        user.role = role;
        user.is_verified = true;
        user.phone = "081234567890".to_string();
        let user = self.users.create(user).await.unwrap();
        let actor = Actor::new(user.id, role);
        (user, actor)
    }

    pub async fn hospital(&self) -> Hospital {
        let hospital = Hospital::new(
            "RS Harapan".to_string(),
            "Jl. Sudirman 1".to_string(),
            "Jakarta".to_string(),
            "DKI Jakarta".to_string(),
            -6.2,
            106.8,
        );
        self.hospitals.create(hospital).await.unwrap()
    }

    pub async fn notifications_for(&self, user_id: Uuid) -> usize {
        self.notification_repo.for_user(user_id).await.len()
    }
}

/// A date `days` after today in Jakarta
pub(crate) fn days_from_today(days: i64) -> NaiveDate {
    jakarta_date(Utc::now()) + Duration::days(days)
}

pub(crate) fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub(crate) fn new_request(hospital_id: Uuid) -> NewBloodRequest {
    NewBloodRequest {
        hospital_id,
        patient_name: "Siti".to_string(),
        event_name: "Operasi jantung".to_string(),
        event_date: days_from_today(7),
        blood_type: "O+".to_string(),
        quantity: 2,
        urgency_level: crate::domain::entities::UrgencyLevel::High,
        diagnosis: "Anemia".to_string(),
        expiry_date: None,
    }
}

pub(crate) fn new_campaign(hospital_id: Uuid, slots: i32) -> NewCampaign {
    NewCampaign {
        hospital_id,
        event_name: "Donor Darah Bersama".to_string(),
        event_date: days_from_today(7),
        start_time: time(8, 0),
        end_time: time(12, 0),
        slots_available: slots,
        blood_type: String::new(),
        diagnosis: String::new(),
        image: None,
    }
}

