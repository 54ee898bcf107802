use actix_web::{http::StatusCode, web};
use uuid::Uuid;

use dc_shared::PageQuery;

use crate::app::AppState;
use crate::dto::donor_schedule::{CreateScheduleRequest, ScheduleQuery, UpdateScheduleRequest};
use crate::dto::validated;
use crate::handlers::response::{created, message, ok, paginated};
use crate::handlers::ApiResult;
use crate::middleware::AuthContext;

pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
    filter: web::Query<ScheduleQuery>,
) -> ApiResult {
    let query = query.into_inner().normalized();
    let filter = filter.into_inner().into_filter()?;
    let schedules = state.schedules.list(filter, &query).await?;
    paginated("berhasil menampilkan semua jadwal donor", schedules, &query)
}

pub async fn get(state: web::Data<AppState>, id: web::Path<Uuid>) -> ApiResult {
    let schedule = state.schedules.get_by_id(*id).await?;
    ok("berhasil menampilkan jadwal donor", schedule)
}

pub async fn create(
    state: web::Data<AppState>,
    auth: AuthContext,
    body: web::Json<CreateScheduleRequest>,
) -> ApiResult {
    let input = validated(body.into_inner())?.into_input()?;
    let schedule = state.schedules.create(&auth.actor(), input).await?;
    created("berhasil membuat jadwal donor", schedule)
}

pub async fn update(
    state: web::Data<AppState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
    body: web::Json<UpdateScheduleRequest>,
) -> ApiResult {
    let patch = validated(body.into_inner())?.into_patch()?;
    let schedule = state.schedules.update(&auth.actor(), *id, patch).await?;
    ok("berhasil memperbarui jadwal donor", schedule)
}

pub async fn delete(
    state: web::Data<AppState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
) -> ApiResult {
    state.schedules.delete(&auth.actor(), *id).await?;
    message(StatusCode::OK, "berhasil menghapus jadwal donor")
}
