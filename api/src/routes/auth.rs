//! Public account endpoints: registration, login, email verification,
//! password reset and Google sign-in.

use actix_web::{
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    http::{header, StatusCode},
    web, HttpRequest, HttpResponse,
};
use uuid::Uuid;

use dc_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::{
    GoogleCallbackQuery, LoginRequest, NewPasswordRequest, RegisterRequest, ResetPasswordRequest,
};
use crate::dto::validated;
use crate::handlers::response::{created, message, ok};
use crate::handlers::{ApiError, ApiResult};

const OAUTH_STATE_COOKIE: &str = "dc_oauth_state";

/// POST /api/v1/register
pub async fn register(state: web::Data<AppState>, body: web::Json<RegisterRequest>) -> ApiResult {
    let input = validated(body.into_inner())?.into_input()?;
    let user = state.users.register(input).await?;
    log::info!("User {} registered", user.id);
    created("successfully registered", user)
}

/// POST /api/v1/login
pub async fn login(state: web::Data<AppState>, body: web::Json<LoginRequest>) -> ApiResult {
    let body = validated(body.into_inner())?;
    let response = state.users.login(&body.email, &body.password).await?;
    ok("successfully login", response)
}

/// GET /api/v1/verify-email/{token}
pub async fn verify_email(state: web::Data<AppState>, token: web::Path<String>) -> ApiResult {
    let user = state.users.verify_email(&token).await?;
    ok("successfully verify email", user)
}

/// POST /api/v1/request-reset-password
pub async fn request_reset_password(
    state: web::Data<AppState>,
    body: web::Json<ResetPasswordRequest>,
) -> ApiResult {
    let body = validated(body.into_inner())?;
    state.users.request_reset_password(&body.email).await?;
    message(StatusCode::OK, "successfully request reset password")
}

/// POST /api/v1/reset-password/{token}
pub async fn reset_password(
    state: web::Data<AppState>,
    token: web::Path<String>,
    body: web::Json<NewPasswordRequest>,
) -> ApiResult {
    let body = validated(body.into_inner())?;
    state.users.reset_password(&token, &body.password).await?;
    message(StatusCode::OK, "successfully reset a password")
}

/// GET /api/v1/auth/google
///
/// Redirects to the consent screen; the `state` value is echoed back in a
/// short-lived cookie and checked on the callback.
pub async fn google_login(state: web::Data<AppState>) -> ApiResult {
    let oauth_state = Uuid::new_v4().simple().to_string();
    let url = state.users.google_login_url(&oauth_state)?;

    let cookie = Cookie::build(OAUTH_STATE_COOKIE, oauth_state)
        .path("/api/v1/auth/google")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::minutes(10))
        .finish();

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, url))
        .cookie(cookie)
        .finish())
}

/// GET /api/v1/auth/google/callback
pub async fn google_callback(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<GoogleCallbackQuery>,
) -> ApiResult {
    let query = query.into_inner();
    if let Some(error) = query.error {
        log::info!("Google sign-in declined: {}", error);
        return Err(ApiError::bad_request("login dengan google dibatalkan"));
    }

    let expected = req.cookie(OAUTH_STATE_COOKIE).map(|c| c.value().to_string());
    if expected.is_none() || expected != query.state {
        log::warn!("Google callback with mismatched state");
        return Err(ApiError::bad_request("state oauth tidak valid"));
    }

    let code = query
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::bad_request("code wajib diisi"))?;
    let response = state.users.google_login(&code).await?;

    let expired = Cookie::build(OAUTH_STATE_COOKIE, "")
        .path("/api/v1/auth/google")
        .max_age(CookieDuration::ZERO)
        .finish();

    Ok(HttpResponse::Ok()
        .cookie(expired)
        .json(ApiResponse::success(200, "successfully login", response)))
}
