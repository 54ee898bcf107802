//! Application wired over in-memory repositories for endpoint tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;

use dc_api::app::{AppState, Dependencies};
use dc_core::domain::entities::user::{Role, User};
use dc_core::repositories::{
    MockBloodDonationRepository, MockBloodRequestRepository, MockCertificateRepository,
    MockDonationRepository, MockDonorRegistrationRepository, MockDonorScheduleRepository,
    MockHealthPassportRepository, MockHospitalRepository, MockNotificationRepository,
    MockUserRepository, UserRepository,
};
use dc_core::services::integrations::mock::{
    InMemoryCache, MockCertificateMinter, MockImageStorage, MockMailer, MockOAuthProvider,
    MockPaymentGateway,
};
use dc_core::services::integrations::OAuthUser;
use dc_shared::{AppConfig, JwtConfig};

pub const OAUTH_CODE: &str = "valid-code";

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub users: Arc<MockUserRepository>,
    pub mailer: Arc<MockMailer>,
    pub minter: Arc<MockCertificateMinter>,
}

impl TestContext {
    pub fn new() -> Self {
        let users = Arc::new(MockUserRepository::new());
        let mailer = Arc::new(MockMailer::new());
        let minter = Arc::new(MockCertificateMinter::new());

        let deps = Dependencies {
            users: users.clone(),
            hospitals: Arc::new(MockHospitalRepository::new()),
            blood_requests: Arc::new(MockBloodRequestRepository::new()),
            donor_schedules: Arc::new(MockDonorScheduleRepository::new()),
            donor_registrations: Arc::new(MockDonorRegistrationRepository::new()),
            health_passports: Arc::new(MockHealthPassportRepository::new()),
            blood_donations: Arc::new(MockBloodDonationRepository::new()),
            certificates: Arc::new(MockCertificateRepository::new()),
            notifications: Arc::new(MockNotificationRepository::new()),
            donations: Arc::new(MockDonationRepository::new()),
            mailer: mailer.clone(),
            images: Arc::new(MockImageStorage::new()),
            payments: Arc::new(MockPaymentGateway::new()),
            oauth: Arc::new(MockOAuthProvider::new(
                OAUTH_CODE,
                OAuthUser {
                    email: "google.user@example.com".to_string(),
                    name: "Google User".to_string(),
                    picture: None,
                },
            )),
            cache: Arc::new(InMemoryCache::new()),
            minter: Some(minter.clone()),
            database: None,
        };

        let mut config = AppConfig::default();
        config.auth.jwt = JwtConfig::new("integration-test-secret");

        Self {
            state: web::Data::new(AppState::new(deps, &config)),
            users,
            mailer,
            minter,
        }
    }

    /// Stores a verified account and returns it with a bearer token
    pub async fn seed_user(&self, email: &str, role: Role) -> (User, String) {
        let mut user = User::new("Seeded".to_string(), email.to_string(), String::new());
        user.role = role;
        user.verify();
        let user = self.users.create(user).await.expect("seed user");

        let token = self
            .state
            .tokens
            .generate_login_token(&user)
            .expect("login token")
            .token;
        (user, format!("Bearer {}", token))
    }
}
