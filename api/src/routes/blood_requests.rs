//! Blood requests and campaigns
//!
//! Campaigns are blood requests with `event_type = campaign`; verified ones
//! are readable without a token.

use actix_web::{http::StatusCode, web};
use uuid::Uuid;

use dc_core::domain::entities::RequestStatus;
use dc_shared::PageQuery;

use crate::app::AppState;
use crate::dto::blood_request::{
    BloodRequestQuery, CreateBloodRequest, CreateCampaignRequest, UpdateBloodRequest,
};
use crate::dto::{validated, StatusUpdate};
use crate::handlers::response::{created, message, ok, paginated};
use crate::handlers::ApiResult;
use crate::middleware::AuthContext;

/// GET /api/v1/campaigns
pub async fn list_campaigns(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
    filter: web::Query<BloodRequestQuery>,
) -> ApiResult {
    let query = query.into_inner().normalized();
    let filter = filter.into_inner().into_filter()?;
    let campaigns = state.blood_requests.list_campaigns(filter, &query).await?;
    paginated("berhasil menampilkan semua kampanye", campaigns, &query)
}

/// GET /api/v1/campaigns/{id}
pub async fn get_campaign(state: web::Data<AppState>, id: web::Path<Uuid>) -> ApiResult {
    let campaign = state.blood_requests.get_campaign(*id).await?;
    ok("berhasil menampilkan permintaan darah", campaign)
}

/// POST /api/v1/blood-requests
pub async fn create(
    state: web::Data<AppState>,
    auth: AuthContext,
    body: web::Json<CreateBloodRequest>,
) -> ApiResult {
    let input = validated(body.into_inner())?.into_input()?;
    let request = state.blood_requests.create_request(&auth.actor(), input).await?;
    created("berhasil membuat permintaan darah", request)
}

/// POST /api/v1/admin/blood-requests/campaigns
pub async fn create_campaign(
    state: web::Data<AppState>,
    auth: AuthContext,
    body: web::Json<CreateCampaignRequest>,
) -> ApiResult {
    let input = validated(body.into_inner())?.into_input()?;
    let campaign = state.blood_requests.create_campaign(&auth.actor(), input).await?;
    created("berhasil membuat kampanye", campaign)
}

/// GET /api/v1/blood-requests
pub async fn list_mine(
    state: web::Data<AppState>,
    auth: AuthContext,
    query: web::Query<PageQuery>,
    filter: web::Query<BloodRequestQuery>,
) -> ApiResult {
    let query = query.into_inner().normalized();
    let filter = filter.into_inner().into_filter()?;
    let requests = state
        .blood_requests
        .list_by_user(&auth.actor(), filter, &query)
        .await?;
    paginated("berhasil menampilkan semua permintaan darah", requests, &query)
}

/// GET /api/v1/admin/blood-requests
pub async fn list_all(
    state: web::Data<AppState>,
    auth: AuthContext,
    query: web::Query<PageQuery>,
    filter: web::Query<BloodRequestQuery>,
) -> ApiResult {
    let query = query.into_inner().normalized();
    let filter = filter.into_inner().into_filter()?;
    let requests = state
        .blood_requests
        .list_all(&auth.actor(), filter, &query)
        .await?;
    paginated("berhasil menampilkan semua permintaan darah", requests, &query)
}

/// GET /api/v1/blood-requests/{id}
pub async fn get(state: web::Data<AppState>, auth: AuthContext, id: web::Path<Uuid>) -> ApiResult {
    let request = state.blood_requests.get_by_id(&auth.actor(), *id).await?;
    ok("berhasil menampilkan permintaan darah", request)
}

/// PUT /api/v1/blood-requests/{id}
pub async fn update(
    state: web::Data<AppState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
    body: web::Json<UpdateBloodRequest>,
) -> ApiResult {
    let patch = validated(body.into_inner())?.into_patch()?;
    let request = state
        .blood_requests
        .update(&auth.actor(), *id, patch)
        .await?;
    ok("berhasil memperbarui permintaan darah", request)
}

/// PUT /api/v1/admin/blood-requests/{id}/status
pub async fn update_status(
    state: web::Data<AppState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
    body: web::Json<StatusUpdate<RequestStatus>>,
) -> ApiResult {
    let request = state
        .blood_requests
        .update_status(&auth.actor(), *id, body.into_inner().status)
        .await?;
    ok("berhasil memperbarui permintaan darah", request)
}

/// DELETE /api/v1/blood-requests/{id}
pub async fn delete(
    state: web::Data<AppState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
) -> ApiResult {
    state.blood_requests.delete(&auth.actor(), *id).await?;
    message(StatusCode::OK, "berhasil menghapus permintaan darah")
}
