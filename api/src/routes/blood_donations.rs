use actix_web::{http::StatusCode, web};
use uuid::Uuid;

use dc_core::domain::entities::BloodDonationStatus;
use dc_shared::PageQuery;

use crate::app::AppState;
use crate::dto::blood_donation::{
    BloodDonationQuery, CreateBloodDonationRequest, UpdateBloodDonationRequest,
};
use crate::dto::{validated, StatusUpdate};
use crate::handlers::response::{created, message, ok, paginated};
use crate::handlers::ApiResult;
use crate::middleware::AuthContext;

pub async fn create(
    state: web::Data<AppState>,
    auth: AuthContext,
    body: web::Json<CreateBloodDonationRequest>,
) -> ApiResult {
    let input = validated(body.into_inner())?.into_input()?;
    let donation = state.blood_donations.create(&auth.actor(), input).await?;
    created("berhasil membuat donasi darah", donation)
}

pub async fn list_mine(
    state: web::Data<AppState>,
    auth: AuthContext,
    query: web::Query<PageQuery>,
) -> ApiResult {
    let query = query.into_inner().normalized();
    let donations = state
        .blood_donations
        .list_by_user(&auth.actor(), &query)
        .await?;
    paginated("berhasil menampilkan semua donasi darah", donations, &query)
}

pub async fn list_all(
    state: web::Data<AppState>,
    auth: AuthContext,
    query: web::Query<PageQuery>,
    filter: web::Query<BloodDonationQuery>,
) -> ApiResult {
    let query = query.into_inner().normalized();
    let donations = state
        .blood_donations
        .list_all(&auth.actor(), filter.into_inner().into(), &query)
        .await?;
    paginated("berhasil menampilkan semua donasi darah", donations, &query)
}

pub async fn get(state: web::Data<AppState>, auth: AuthContext, id: web::Path<Uuid>) -> ApiResult {
    let donation = state.blood_donations.get_by_id(&auth.actor(), *id).await?;
    ok("berhasil menampilkan donasi darah", donation)
}

pub async fn update(
    state: web::Data<AppState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
    body: web::Json<UpdateBloodDonationRequest>,
) -> ApiResult {
    let patch = validated(body.into_inner())?.into_patch()?;
    let donation = state
        .blood_donations
        .update(&auth.actor(), *id, patch)
        .await?;
    ok("berhasil memperbarui donasi darah", donation)
}

/// PUT /api/v1/admin/blood-donations/{id}/status
///
/// Completing a donation also issues its certificate.
pub async fn update_status(
    state: web::Data<AppState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
    body: web::Json<StatusUpdate<BloodDonationStatus>>,
) -> ApiResult {
    let status = body.into_inner().status;
    let donation = state
        .blood_donations
        .update_status(&auth.actor(), *id, status)
        .await?;
    log::info!("blood donation {} moved to {:?}", donation.id, status);
    ok(
        "berhasil memperbarui status donasi darah dan membuat sertifikat",
        donation,
    )
}

pub async fn delete(
    state: web::Data<AppState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
) -> ApiResult {
    state.blood_donations.delete(&auth.actor(), *id).await?;
    message(StatusCode::OK, "berhasil menghapus donasi darah")
}
