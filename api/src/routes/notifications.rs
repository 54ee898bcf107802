//! In-app notifications
//!
//! Reading a single notification marks it read for its owner.

use actix_web::{http::StatusCode, web};
use serde_json::json;
use uuid::Uuid;

use dc_shared::PageQuery;

use crate::app::AppState;
use crate::dto::notification::{
    CreateNotificationRequest, MyNotificationsQuery, NotificationQuery, UpdateNotificationRequest,
};
use crate::dto::validated;
use crate::handlers::response::{created, message, ok, paginated};
use crate::handlers::ApiResult;
use crate::middleware::AuthContext;

pub async fn list_mine(
    state: web::Data<AppState>,
    auth: AuthContext,
    query: web::Query<PageQuery>,
    filter: web::Query<MyNotificationsQuery>,
) -> ApiResult {
    let query = query.into_inner().normalized();
    let notifications = state
        .notifications
        .list_by_user(&auth.actor(), filter.unread_only, &query)
        .await?;
    paginated("berhasil menampilkan semua notifikasi", notifications, &query)
}

pub async fn unread_count(state: web::Data<AppState>, auth: AuthContext) -> ApiResult {
    let count = state.notifications.unread_count(&auth.actor()).await?;
    ok(
        "berhasil menampilkan jumlah notifikasi belum dibaca",
        json!({ "unread_count": count }),
    )
}

pub async fn mark_all_read(state: web::Data<AppState>, auth: AuthContext) -> ApiResult {
    let updated = state.notifications.mark_all_read(&auth.actor()).await?;
    ok(
        "berhasil menandai semua notifikasi sebagai dibaca",
        json!({ "updated": updated }),
    )
}

pub async fn get(state: web::Data<AppState>, auth: AuthContext, id: web::Path<Uuid>) -> ApiResult {
    let notification = state.notifications.get_for_user(&auth.actor(), *id).await?;
    ok("berhasil menampilkan notifikasi", notification)
}

pub async fn delete(
    state: web::Data<AppState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
) -> ApiResult {
    state.notifications.delete(&auth.actor(), *id).await?;
    message(StatusCode::OK, "berhasil menghapus notifikasi")
}

pub async fn list_all(
    state: web::Data<AppState>,
    auth: AuthContext,
    query: web::Query<PageQuery>,
    filter: web::Query<NotificationQuery>,
) -> ApiResult {
    let query = query.into_inner().normalized();
    let notifications = state
        .notifications
        .list_all(&auth.actor(), filter.into_inner().into(), &query)
        .await?;
    paginated("berhasil menampilkan semua notifikasi", notifications, &query)
}

pub async fn create(
    state: web::Data<AppState>,
    auth: AuthContext,
    body: web::Json<CreateNotificationRequest>,
) -> ApiResult {
    let req = validated(body.into_inner())?;
    let notification = state
        .notifications
        .create(
            &auth.actor(),
            req.user_id,
            &req.title,
            &req.message,
            req.notification_type,
        )
        .await?;
    created("berhasil membuat notifikasi", notification)
}

pub async fn update(
    state: web::Data<AppState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
    body: web::Json<UpdateNotificationRequest>,
) -> ApiResult {
    let patch = validated(body.into_inner())?.into();
    let notification = state
        .notifications
        .update(&auth.actor(), *id, patch)
        .await?;
    ok("berhasil memperbarui notifikasi", notification)
}
