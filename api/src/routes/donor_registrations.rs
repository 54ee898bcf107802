use actix_web::{http::StatusCode, web};
use uuid::Uuid;

use dc_shared::PageQuery;

use crate::app::AppState;
use crate::dto::donor_registration::{
    CreateRegistrationRequest, RegistrationQuery, UpdateRegistrationRequest,
};
use crate::dto::validated;
use crate::handlers::response::{created, message, ok, paginated};
use crate::handlers::ApiResult;
use crate::middleware::AuthContext;

pub async fn create(
    state: web::Data<AppState>,
    auth: AuthContext,
    body: web::Json<CreateRegistrationRequest>,
) -> ApiResult {
    let input = validated(body.into_inner())?.into();
    let registration = state.registrations.register(&auth.actor(), input).await?;
    created("berhasil membuat pendaftaran donor", registration)
}

pub async fn list_mine(
    state: web::Data<AppState>,
    auth: AuthContext,
    query: web::Query<PageQuery>,
) -> ApiResult {
    let query = query.into_inner().normalized();
    let registrations = state
        .registrations
        .list_by_user(&auth.actor(), &query)
        .await?;
    paginated("berhasil menampilkan semua pendaftaran donor", registrations, &query)
}

pub async fn list_all(
    state: web::Data<AppState>,
    auth: AuthContext,
    query: web::Query<PageQuery>,
    filter: web::Query<RegistrationQuery>,
) -> ApiResult {
    let query = query.into_inner().normalized();
    let registrations = state
        .registrations
        .list_all(&auth.actor(), filter.into_inner().into(), &query)
        .await?;
    paginated("berhasil menampilkan semua pendaftaran donor", registrations, &query)
}

pub async fn get(state: web::Data<AppState>, auth: AuthContext, id: web::Path<Uuid>) -> ApiResult {
    let registration = state.registrations.get_by_id(&auth.actor(), *id).await?;
    ok("berhasil menampilkan pendaftaran donor", registration)
}

pub async fn update(
    state: web::Data<AppState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
    body: web::Json<UpdateRegistrationRequest>,
) -> ApiResult {
    let patch = validated(body.into_inner())?.into();
    let registration = state
        .registrations
        .update(&auth.actor(), *id, patch)
        .await?;
    ok("berhasil memperbarui pendaftaran donor", registration)
}

pub async fn delete(
    state: web::Data<AppState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
) -> ApiResult {
    state.registrations.delete(&auth.actor(), *id).await?;
    message(StatusCode::OK, "berhasil menghapus pendaftaran donor")
}
