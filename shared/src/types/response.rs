//! API response envelope

use serde::{Deserialize, Serialize};

use super::pagination::PageMeta;

/// Standard success envelope
///
/// ```json
/// { "code": 200, "message": "...", "data": {...}, "pagination": {...} }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// HTTP status code mirrored in the body
    pub code: u16,

    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageMeta>,
}

impl<T> ApiResponse<T> {
    pub fn success(code: u16, message: impl Into<String>, data: T) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data),
            pagination: None,
        }
    }

    pub fn with_pagination(mut self, meta: PageMeta) -> Self {
        self.pagination = Some(meta);
        self
    }
}

impl ApiResponse<()> {
    /// Envelope without a data payload
    pub fn message(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
            pagination: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::pagination::PageQuery;

    #[test]
    fn test_success_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::success(200, "ok", vec![1, 2])).unwrap();
        assert_eq!(body["code"], 200);
        assert_eq!(body["data"], serde_json::json!([1, 2]));
        assert!(body.get("pagination").is_none());
    }

    #[test]
    fn test_paginated_envelope_shape() {
        let meta = PageMeta::new(&PageQuery::default(), 11);
        let body =
            serde_json::to_value(ApiResponse::success(200, "ok", vec![1]).with_pagination(meta))
                .unwrap();
        assert_eq!(body["pagination"]["total"], 11);
        assert_eq!(body["pagination"]["total_pages"], 2);
    }

    #[test]
    fn test_message_only_envelope() {
        let body = serde_json::to_value(ApiResponse::message(201, "dibuat")).unwrap();
        assert!(body.get("data").is_none());
        assert_eq!(body["message"], "dibuat");
    }
}
