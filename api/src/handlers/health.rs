//! `GET /health`

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::app::AppState;

pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let database = match &state.database {
        Some(pool) => match pool.health_check().await {
            Ok(true) => "up",
            Ok(false) => "down",
            Err(e) => {
                log::warn!("Database health check failed: {}", e);
                "down"
            }
        },
        None => "not_configured",
    };

    let body = json!({
        "status": if database == "down" { "degraded" } else { "healthy" },
        "service": "darah-connect-api",
        "version": env!("CARGO_PKG_VERSION"),
        "database": database,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    if database == "down" {
        HttpResponse::ServiceUnavailable().json(body)
    } else {
        HttpResponse::Ok().json(body)
    }
}
