use actix_web::{http::StatusCode, web};
use uuid::Uuid;

use dc_core::domain::entities::PassportStatus;
use dc_shared::PageQuery;

use crate::app::AppState;
use crate::dto::blood_donation::PassportQuery;
use crate::dto::StatusUpdate;
use crate::handlers::response::{created, message, ok, paginated};
use crate::handlers::ApiResult;
use crate::middleware::AuthContext;

/// POST /api/v1/health-passport: creates the passport or renews it for 24h
pub async fn create_or_renew(state: web::Data<AppState>, auth: AuthContext) -> ApiResult {
    let passport = state.passports.create_or_renew(&auth.actor()).await?;
    created("berhasil membuat health passport", passport)
}

pub async fn get_mine(state: web::Data<AppState>, auth: AuthContext) -> ApiResult {
    let passport = state.passports.get_mine(&auth.actor()).await?;
    ok("berhasil mendapatkan health passport", passport)
}

pub async fn list(
    state: web::Data<AppState>,
    auth: AuthContext,
    query: web::Query<PageQuery>,
    filter: web::Query<PassportQuery>,
) -> ApiResult {
    let query = query.into_inner().normalized();
    let passports = state
        .passports
        .list(&auth.actor(), filter.into_inner().into(), &query)
        .await?;
    paginated("berhasil menampilkan health passport", passports, &query)
}

pub async fn get(state: web::Data<AppState>, auth: AuthContext, id: web::Path<Uuid>) -> ApiResult {
    let passport = state.passports.get_by_id(&auth.actor(), *id).await?;
    ok("berhasil mendapatkan health passport", passport)
}

pub async fn update_status(
    state: web::Data<AppState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
    body: web::Json<StatusUpdate<PassportStatus>>,
) -> ApiResult {
    let passport = state
        .passports
        .update_status(&auth.actor(), *id, body.into_inner().status)
        .await?;
    ok("berhasil memperbarui health passport", passport)
}

pub async fn delete(
    state: web::Data<AppState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
) -> ApiResult {
    state.passports.delete(&auth.actor(), *id).await?;
    message(StatusCode::OK, "berhasil menghapus health passport")
}
