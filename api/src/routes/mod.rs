//! Route tables for `/api/v1`
//!
//! Handlers are grouped per resource; this module only decides which guard
//! group each path belongs to. Static segments are registered before the
//! `{id}` patterns they would otherwise collide with.

pub mod auth;
pub mod blood_donations;
pub mod blood_requests;
pub mod certificates;
pub mod dashboard;
pub mod donations;
pub mod donor_registrations;
pub mod donor_schedules;
pub mod health_passports;
pub mod hospitals;
pub mod notifications;
pub mod users;

use actix_web::web;

/// Endpoints reachable without a token
pub fn public(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(auth::register))
        .route("/login", web::post().to(auth::login))
        .route("/verify-email/{token}", web::get().to(auth::verify_email))
        .route(
            "/request-reset-password",
            web::post().to(auth::request_reset_password),
        )
        .route("/reset-password/{token}", web::post().to(auth::reset_password))
        .route("/auth/google", web::get().to(auth::google_login))
        .route("/auth/google/callback", web::get().to(auth::google_callback))
        .route("/campaigns", web::get().to(blood_requests::list_campaigns))
        .route("/campaigns/{id}", web::get().to(blood_requests::get_campaign))
        .route("/landing-page", web::get().to(dashboard::landing_page))
        .route("/donations/webhook", web::post().to(donations::webhook))
        .route(
            "/certificates/verify/{number}",
            web::get().to(certificates::verify),
        );
}

/// Endpoints for any signed-in user
pub fn private(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/user/profile")
            .route(web::get().to(users::get_profile))
            .route(web::put().to(users::update_profile)),
    )
    .route("/user/profile/image", web::post().to(users::upload_image))
    .route("/hospitals", web::get().to(hospitals::list))
    .route("/hospitals/{id}", web::get().to(hospitals::get))
    .service(
        web::resource("/blood-requests")
            .route(web::post().to(blood_requests::create))
            .route(web::get().to(blood_requests::list_mine)),
    )
    .service(
        web::resource("/blood-requests/{id}")
            .route(web::get().to(blood_requests::get))
            .route(web::put().to(blood_requests::update))
            .route(web::delete().to(blood_requests::delete)),
    )
    .route("/donor-schedules", web::get().to(donor_schedules::list))
    .route("/donor-schedules/{id}", web::get().to(donor_schedules::get))
    .service(
        web::resource("/donor-registrations")
            .route(web::post().to(donor_registrations::create))
            .route(web::get().to(donor_registrations::list_mine)),
    )
    .service(
        web::resource("/donor-registrations/{id}")
            .route(web::get().to(donor_registrations::get))
            .route(web::put().to(donor_registrations::update))
            .route(web::delete().to(donor_registrations::delete)),
    )
    .service(
        web::resource("/health-passport")
            .route(web::post().to(health_passports::create_or_renew))
            .route(web::get().to(health_passports::get_mine)),
    )
    .service(
        web::resource("/blood-donations")
            .route(web::post().to(blood_donations::create))
            .route(web::get().to(blood_donations::list_mine)),
    )
    .service(
        web::resource("/blood-donations/{id}")
            .route(web::get().to(blood_donations::get))
            .route(web::put().to(blood_donations::update))
            .route(web::delete().to(blood_donations::delete)),
    )
    .route("/certificates", web::get().to(certificates::list_mine))
    .route("/certificates/{id}", web::get().to(certificates::get))
    .route("/notifications", web::get().to(notifications::list_mine))
    .route(
        "/notifications/unread-count",
        web::get().to(notifications::unread_count),
    )
    .route(
        "/notifications/read-all",
        web::put().to(notifications::mark_all_read),
    )
    .service(
        web::resource("/notifications/{id}")
            .route(web::get().to(notifications::get))
            .route(web::delete().to(notifications::delete)),
    )
    .service(
        web::resource("/donations")
            .route(web::post().to(donations::create))
            .route(web::get().to(donations::list_mine)),
    )
    .route("/donations/{id}", web::get().to(donations::get))
    .route("/dashboard/user", web::get().to(dashboard::user_dashboard));
}

/// Endpoints mounted under `/admin`
pub fn admin(cfg: &mut web::ServiceConfig) {
    cfg.route("/users", web::get().to(users::list))
        .service(
            web::resource("/users/{id}")
                .route(web::get().to(users::get))
                .route(web::delete().to(users::delete)),
        )
        .route("/hospitals", web::post().to(hospitals::create))
        .service(
            web::resource("/hospitals/{id}")
                .route(web::put().to(hospitals::update))
                .route(web::delete().to(hospitals::delete)),
        )
        .route("/blood-requests", web::get().to(blood_requests::list_all))
        .route(
            "/blood-requests/campaigns",
            web::post().to(blood_requests::create_campaign),
        )
        .route(
            "/blood-requests/{id}/status",
            web::put().to(blood_requests::update_status),
        )
        .route("/donor-schedules", web::post().to(donor_schedules::create))
        .service(
            web::resource("/donor-schedules/{id}")
                .route(web::put().to(donor_schedules::update))
                .route(web::delete().to(donor_schedules::delete)),
        )
        .route(
            "/donor-registrations",
            web::get().to(donor_registrations::list_all),
        )
        .route("/health-passports", web::get().to(health_passports::list))
        .service(
            web::resource("/health-passports/{id}")
                .route(web::get().to(health_passports::get))
                .route(web::delete().to(health_passports::delete)),
        )
        .route(
            "/health-passports/{id}/status",
            web::put().to(health_passports::update_status),
        )
        .route("/blood-donations", web::get().to(blood_donations::list_all))
        .route(
            "/blood-donations/{id}/status",
            web::put().to(blood_donations::update_status),
        )
        .route("/certificates", web::get().to(certificates::list_all))
        .route("/certificates/{id}", web::delete().to(certificates::delete))
        .service(
            web::resource("/notifications")
                .route(web::get().to(notifications::list_all))
                .route(web::post().to(notifications::create)),
        )
        .route("/notifications/{id}", web::put().to(notifications::update))
        .route("/donations", web::get().to(donations::list_all))
        .route("/dashboard", web::get().to(dashboard::admin_dashboard));
}
