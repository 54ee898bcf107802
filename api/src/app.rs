//! Application state and factory
//!
//! This module wires the core services over their repositories and
//! collaborators, and builds the Actix-web application around them.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error,
};

use dc_core::repositories::{
    BloodDonationRepository, BloodRequestRepository, CertificateRepository, DonationRepository,
    DonorRegistrationRepository, DonorScheduleRepository, HealthPassportRepository,
    HospitalRepository, NotificationRepository, UserRepository,
};
use dc_core::services::{
    BloodDonationService, BloodRequestService, CacheService, CertificateMinter, CertificateService,
    DashboardRepositories, DashboardService, DonationService, DonorRegistrationService,
    DonorScheduleService, HealthPassportService, HospitalService, ImageStorage, Mailer,
    NotificationService, OAuthProvider, PaymentGateway, TokenService, UserService,
};
use dc_infra::database::DatabasePool;
use dc_infra::InfrastructureServices;
use dc_shared::{AppConfig, CorsConfig, Environment};

use crate::handlers::{error, health};
use crate::middleware::{create_cors, JwtAuth, RequireRole, SecurityMiddleware};
use crate::routes;

/// Repositories and collaborators the services are built from
#[derive(Clone)]
pub struct Dependencies {
    pub users: Arc<dyn UserRepository>,
    pub hospitals: Arc<dyn HospitalRepository>,
    pub blood_requests: Arc<dyn BloodRequestRepository>,
    pub donor_schedules: Arc<dyn DonorScheduleRepository>,
    pub donor_registrations: Arc<dyn DonorRegistrationRepository>,
    pub health_passports: Arc<dyn HealthPassportRepository>,
    pub blood_donations: Arc<dyn BloodDonationRepository>,
    pub certificates: Arc<dyn CertificateRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub donations: Arc<dyn DonationRepository>,
    pub mailer: Arc<dyn Mailer>,
    pub images: Arc<dyn ImageStorage>,
    pub payments: Arc<dyn PaymentGateway>,
    pub oauth: Arc<dyn OAuthProvider>,
    pub cache: Arc<dyn CacheService>,
    /// Absent when on-chain certificates are not configured
    pub minter: Option<Arc<dyn CertificateMinter>>,
    pub database: Option<DatabasePool>,
}

impl From<InfrastructureServices> for Dependencies {
    fn from(infra: InfrastructureServices) -> Self {
        Self {
            users: infra.users,
            hospitals: infra.hospitals,
            blood_requests: infra.blood_requests,
            donor_schedules: infra.donor_schedules,
            donor_registrations: infra.donor_registrations,
            health_passports: infra.health_passports,
            blood_donations: infra.blood_donations,
            certificates: infra.certificates,
            notifications: infra.notifications,
            donations: infra.donations,
            mailer: infra.mailer,
            images: infra.images,
            payments: infra.payments,
            oauth: infra.oauth,
            cache: infra.cache,
            minter: infra.minter,
            database: Some(infra.database),
        }
    }
}

/// Shared state handed to every handler
pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub users: UserService,
    pub hospitals: HospitalService,
    pub blood_requests: BloodRequestService,
    pub schedules: DonorScheduleService,
    pub registrations: DonorRegistrationService,
    pub passports: Arc<HealthPassportService>,
    pub blood_donations: BloodDonationService,
    pub certificates: Arc<CertificateService>,
    pub notifications: Arc<NotificationService>,
    pub donations: DonationService,
    pub dashboard: DashboardService,
    pub database: Option<DatabasePool>,
    pub environment: Environment,
    pub cors: CorsConfig,
    pub max_payload_size: usize,
}

impl AppState {
    pub fn new(deps: Dependencies, config: &AppConfig) -> Self {
        let tokens = Arc::new(TokenService::new(config.auth.jwt.clone()));
        let notifications = Arc::new(NotificationService::new(deps.notifications.clone()));
        let passports = Arc::new(HealthPassportService::new(deps.health_passports.clone()));
        let mut certificates = CertificateService::new(deps.certificates.clone(), tokens.clone());
        if let Some(minter) = deps.minter.clone() {
            certificates = certificates.with_minter(minter);
        }
        let certificates = Arc::new(certificates);

        let users = UserService::new(
            deps.users.clone(),
            tokens.clone(),
            deps.mailer.clone(),
            deps.images.clone(),
        )
        .with_oauth(deps.oauth.clone());

        let dashboard = DashboardService::new(
            DashboardRepositories {
                users: deps.users.clone(),
                requests: deps.blood_requests.clone(),
                blood_donations: deps.blood_donations.clone(),
                passports: deps.health_passports.clone(),
                donations: deps.donations.clone(),
            },
            deps.cache.clone(),
            config.cache.default_ttl,
        )
        .with_cache_key(config.cache.key("landing-page"));

        Self {
            users,
            hospitals: HospitalService::new(deps.hospitals.clone()),
            blood_requests: BloodRequestService::new(
                deps.blood_requests.clone(),
                deps.hospitals.clone(),
                notifications.clone(),
                deps.images.clone(),
            ),
            schedules: DonorScheduleService::new(
                deps.donor_schedules.clone(),
                deps.hospitals.clone(),
            ),
            registrations: DonorRegistrationService::new(
                deps.donor_registrations.clone(),
                deps.blood_requests.clone(),
                deps.donor_schedules.clone(),
                passports.clone(),
                notifications.clone(),
            ),
            blood_donations: BloodDonationService::new(
                deps.blood_donations.clone(),
                deps.donor_registrations.clone(),
                deps.hospitals.clone(),
                deps.users.clone(),
                certificates.clone(),
                notifications.clone(),
                deps.images.clone(),
            ),
            donations: DonationService::new(
                deps.donations.clone(),
                deps.users.clone(),
                deps.payments.clone(),
                notifications.clone(),
            ),
            dashboard,
            tokens,
            passports,
            certificates,
            notifications,
            database: deps.database,
            environment: config.environment,
            cors: config.cors.clone(),
            max_payload_size: config.server.max_payload_size,
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let cors = create_cors(&state.cors, state.environment);
    let security = SecurityMiddleware::for_environment(state.environment);
    let tokens = state.tokens.clone();
    let max_payload_size = state.max_payload_size;

    App::new()
        .app_data(state)
        .app_data(
            web::JsonConfig::default()
                .limit(max_payload_size)
                .error_handler(error::json_error_handler),
        )
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .wrap(security)
        .wrap(cors)
        .wrap(Logger::default())
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api/v1")
                .configure(routes::public)
                .service(
                    web::scope("/admin")
                        .wrap(RequireRole::admin())
                        .wrap(JwtAuth::new(tokens.clone()))
                        .configure(routes::admin),
                )
                .service(
                    web::scope("")
                        .wrap(RequireRole::any_user())
                        .wrap(JwtAuth::new(tokens))
                        .configure(routes::private),
                ),
        )
        .default_service(web::route().to(error::not_found))
}
