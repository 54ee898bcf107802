use actix_web::{http::StatusCode, web};
use uuid::Uuid;

use dc_shared::PageQuery;

use crate::app::AppState;
use crate::dto::hospital::HospitalRequest;
use crate::dto::validated;
use crate::handlers::response::{created, message, ok, paginated};
use crate::handlers::ApiResult;
use crate::middleware::AuthContext;

pub async fn list(state: web::Data<AppState>, query: web::Query<PageQuery>) -> ApiResult {
    let query = query.into_inner().normalized();
    let hospitals = state.hospitals.list(&query).await?;
    paginated("berhasil mengambil semua rumah sakit", hospitals, &query)
}

pub async fn get(state: web::Data<AppState>, id: web::Path<Uuid>) -> ApiResult {
    let hospital = state.hospitals.get_by_id(*id).await?;
    ok("berhasil mengambil rumah sakit berdasarkan id", hospital)
}

pub async fn create(
    state: web::Data<AppState>,
    auth: AuthContext,
    body: web::Json<HospitalRequest>,
) -> ApiResult {
    let input = validated(body.into_inner())?.into();
    let hospital = state.hospitals.create(&auth.actor(), input).await?;
    created("berhasil membuat rumah sakit", hospital)
}

pub async fn update(
    state: web::Data<AppState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
    body: web::Json<HospitalRequest>,
) -> ApiResult {
    let input = validated(body.into_inner())?.into();
    let hospital = state.hospitals.update(&auth.actor(), *id, input).await?;
    ok("berhasil memperbarui rumah sakit", hospital)
}

pub async fn delete(
    state: web::Data<AppState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
) -> ApiResult {
    state.hospitals.delete(&auth.actor(), *id).await?;
    message(StatusCode::OK, "berhasil menghapus rumah sakit")
}
