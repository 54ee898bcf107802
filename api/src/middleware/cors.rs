//! CORS middleware configuration for cross-origin requests.
//!
//! The web front end calls the API from another origin. Origins come from
//! `CorsConfig`; the default `*` allows any origin, which is how the
//! development setup runs.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use dc_shared::{CorsConfig, Environment};

/// Creates a CORS middleware instance for the configured origins.
pub fn create_cors(config: &CorsConfig, environment: Environment) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
        ])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        if environment.is_production() {
            log::warn!("CORS allows any origin in production; set ALLOWED_ORIGINS to restrict it");
        }
        log::info!("Configuring CORS for any origin");
        return cors.allow_any_origin();
    }

    config.allowed_origins.iter().fold(cors, |cors, origin| {
        log::info!("Adding allowed origin: {}", origin);
        cors.allowed_origin(origin)
    })
}
