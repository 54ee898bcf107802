//! Success envelope helpers

use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;

use dc_shared::{ApiResponse, PageMeta, PageQuery, Paginated};

use super::ApiError;

pub type ApiResult = Result<HttpResponse, ApiError>;

/// `200` with a data payload
pub fn ok<T: Serialize>(message: &str, data: T) -> ApiResult {
    Ok(HttpResponse::Ok().json(ApiResponse::success(200, message, data)))
}

/// `201` with a data payload
pub fn created<T: Serialize>(message: &str, data: T) -> ApiResult {
    Ok(HttpResponse::Created().json(ApiResponse::success(201, message, data)))
}

/// Envelope without data
pub fn message(status: StatusCode, message: &str) -> ApiResult {
    Ok(HttpResponse::build(status).json(ApiResponse::message(status.as_u16(), message)))
}

/// `200` with one page of items and its pagination metadata
pub fn paginated<T: Serialize>(message: &str, page: Paginated<T>, query: &PageQuery) -> ApiResult {
    let meta = PageMeta::new(query, page.total);
    Ok(HttpResponse::Ok().json(ApiResponse::success(200, message, page.items).with_pagination(meta)))
}
