//! Profile endpoints for the signed-in user and user administration

use actix_web::{http::StatusCode, web};
use uuid::Uuid;

use dc_shared::PageQuery;

use crate::app::AppState;
use crate::dto::user::UpdateProfileRequest;
use crate::dto::{validated, ImagePayload};
use crate::handlers::response::{message, ok, paginated};
use crate::handlers::ApiResult;
use crate::middleware::AuthContext;

/// GET /api/v1/user/profile
pub async fn get_profile(state: web::Data<AppState>, auth: AuthContext) -> ApiResult {
    let user = state.users.get_profile(&auth.actor()).await?;
    ok("successfully showing user", user)
}

/// PUT /api/v1/user/profile
pub async fn update_profile(
    state: web::Data<AppState>,
    auth: AuthContext,
    body: web::Json<UpdateProfileRequest>,
) -> ApiResult {
    let patch = validated(body.into_inner())?.into();
    let user = state.users.update_profile(&auth.actor(), patch).await?;
    ok("successfully update user", user)
}

/// POST /api/v1/user/profile/image
pub async fn upload_image(
    state: web::Data<AppState>,
    auth: AuthContext,
    body: web::Json<ImagePayload>,
) -> ApiResult {
    let image = body.into_inner().into_upload()?;
    let user = state.users.upload_profile_image(&auth.actor(), image).await?;
    ok("successfully update user", user)
}

/// GET /api/v1/admin/users
pub async fn list(
    state: web::Data<AppState>,
    auth: AuthContext,
    query: web::Query<PageQuery>,
) -> ApiResult {
    let query = query.into_inner().normalized();
    let users = state.users.list(&auth.actor(), &query).await?;
    paginated("successfully fetch all users", users, &query)
}

/// GET /api/v1/admin/users/{id}
pub async fn get(state: web::Data<AppState>, auth: AuthContext, id: web::Path<Uuid>) -> ApiResult {
    let user = state.users.get_by_id(&auth.actor(), *id).await?;
    ok("successfully showing a user", user)
}

/// DELETE /api/v1/admin/users/{id}
pub async fn delete(
    state: web::Data<AppState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
) -> ApiResult {
    state.users.delete(&auth.actor(), *id).await?;
    message(StatusCode::OK, "successfully delete user")
}
