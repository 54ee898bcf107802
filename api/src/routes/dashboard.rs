use actix_web::web;

use crate::app::AppState;
use crate::handlers::response::ok;
use crate::handlers::ApiResult;
use crate::middleware::AuthContext;

/// GET /api/v1/landing-page, public and cached
pub async fn landing_page(state: web::Data<AppState>) -> ApiResult {
    let page = state.dashboard.landing_page().await?;
    ok("berhasil menampilkan landing page", page)
}

pub async fn user_dashboard(state: web::Data<AppState>, auth: AuthContext) -> ApiResult {
    let dashboard = state.dashboard.user_dashboard(&auth.actor()).await?;
    ok("berhasil menampilkan dashboard pengguna", dashboard)
}

pub async fn admin_dashboard(state: web::Data<AppState>, auth: AuthContext) -> ApiResult {
    let dashboard = state.dashboard.admin_dashboard(&auth.actor()).await?;
    ok("berhasil menampilkan dashboard admin", dashboard)
}
