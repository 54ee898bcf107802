//! Monetary donations through the payment gateway

use actix_web::web;
use uuid::Uuid;

use dc_shared::PageQuery;

use crate::app::AppState;
use crate::dto::donation::{CreateDonationRequest, DonationQuery, WebhookRequest};
use crate::dto::validated;
use crate::handlers::response::{created, ok, paginated};
use crate::handlers::ApiResult;
use crate::middleware::AuthContext;

/// POST /api/v1/donations: opens a pending transaction and returns the payment URL
pub async fn create(
    state: web::Data<AppState>,
    auth: AuthContext,
    body: web::Json<CreateDonationRequest>,
) -> ApiResult {
    let req = validated(body.into_inner())?;
    let donation = state
        .donations
        .create_transaction(&auth.actor(), req.amount)
        .await?;
    log::info!("donation transaction {} opened", donation.order_id);
    created("berhasil membuat transaksi", donation)
}

/// POST /api/v1/donations/webhook, called by the gateway without a token
pub async fn webhook(state: web::Data<AppState>, body: web::Json<WebhookRequest>) -> ApiResult {
    let notification = validated(body.into_inner())?.into();
    let donation = state.donations.handle_webhook(notification).await?;
    ok("berhasil memperbarui status donasi", donation)
}

pub async fn list_mine(
    state: web::Data<AppState>,
    auth: AuthContext,
    query: web::Query<PageQuery>,
) -> ApiResult {
    let query = query.into_inner().normalized();
    let donations = state.donations.list_by_user(&auth.actor(), &query).await?;
    paginated("berhasil menampilkan semua donasi", donations, &query)
}

pub async fn list_all(
    state: web::Data<AppState>,
    auth: AuthContext,
    query: web::Query<PageQuery>,
    filter: web::Query<DonationQuery>,
) -> ApiResult {
    let query = query.into_inner().normalized();
    let donations = state
        .donations
        .list_all(&auth.actor(), filter.into_inner().into(), &query)
        .await?;
    paginated("berhasil menampilkan semua donasi", donations, &query)
}

pub async fn get(state: web::Data<AppState>, auth: AuthContext, id: web::Path<Uuid>) -> ApiResult {
    let donation = state.donations.get_by_id(&auth.actor(), *id).await?;
    ok("berhasil menampilkan donasi", donation)
}
