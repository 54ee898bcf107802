use actix_web::{http::StatusCode, web};
use uuid::Uuid;

use dc_shared::PageQuery;

use crate::app::AppState;
use crate::handlers::response::{message, ok, paginated};
use crate::handlers::ApiResult;
use crate::middleware::AuthContext;

pub async fn list_mine(
    state: web::Data<AppState>,
    auth: AuthContext,
    query: web::Query<PageQuery>,
) -> ApiResult {
    let query = query.into_inner().normalized();
    let certificates = state
        .certificates
        .list_by_user(&auth.actor(), &query)
        .await?;
    paginated("berhasil mengambil semua sertifikat", certificates, &query)
}

pub async fn list_all(
    state: web::Data<AppState>,
    auth: AuthContext,
    query: web::Query<PageQuery>,
) -> ApiResult {
    let query = query.into_inner().normalized();
    let certificates = state.certificates.list_all(&auth.actor(), &query).await?;
    paginated("berhasil mengambil semua sertifikat", certificates, &query)
}

pub async fn get(state: web::Data<AppState>, auth: AuthContext, id: web::Path<Uuid>) -> ApiResult {
    let certificate = state.certificates.get_by_id(&auth.actor(), *id).await?;
    ok("berhasil mengambil sertifikat", certificate)
}

/// GET /api/v1/certificates/verify/{number}, public
pub async fn verify(state: web::Data<AppState>, number: web::Path<String>) -> ApiResult {
    let verification = state.certificates.verify(&number).await?;
    ok("berhasil memverifikasi sertifikat", verification)
}

pub async fn delete(
    state: web::Data<AppState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
) -> ApiResult {
    state.certificates.delete(&auth.actor(), *id).await?;
    message(StatusCode::OK, "berhasil menghapus sertifikat")
}
