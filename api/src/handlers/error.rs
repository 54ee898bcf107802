//! Mapping of domain errors onto HTTP responses
//!
//! Every failure leaves the API as the error envelope
//! `{ "code": <status>, "message": <text> }`.

use actix_web::{
    error::{JsonPayloadError, PathError, QueryPayloadError},
    http::StatusCode,
    HttpRequest, HttpResponse, ResponseError,
};
use std::fmt;

use dc_core::errors::{AuthError, DomainError, ValidationError};
use dc_shared::{error_messages, ErrorResponse};

/// Error type returned by every handler
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl ApiError {
    pub fn unauthenticated() -> Self {
        Self(DomainError::Unauthorized)
    }

    pub fn forbidden() -> Self {
        Self(DomainError::forbidden(error_messages::FORBIDDEN))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(DomainError::validation(message))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

/// HTTP status for a domain error
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Validation { .. }
        | DomainError::ValidationErr(_)
        | DomainError::BusinessRule { .. } => StatusCode::BAD_REQUEST,
        DomainError::Unauthorized | DomainError::Token(_) => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden { .. } => StatusCode::FORBIDDEN,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Conflict { .. } => StatusCode::CONFLICT,
        DomainError::External { .. } => StatusCode::BAD_GATEWAY,
        DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Auth(auth) => match auth {
            AuthError::EmailAlreadyRegistered => StatusCode::CONFLICT,
            AuthError::InvalidVerificationToken | AuthError::InvalidResetToken => {
                StatusCode::BAD_REQUEST
            }
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::InsufficientPermissions => StatusCode::FORBIDDEN,
            AuthError::InvalidCredentials
            | AuthError::EmailNotVerified
            | AuthError::OAuthFailed => StatusCode::UNAUTHORIZED,
        },
    }
}

/// User-facing message; internal details never leave the server
pub fn message_for(error: &DomainError) -> String {
    match error {
        DomainError::Internal { .. } => error_messages::INTERNAL.to_string(),
        DomainError::Token(_) => error_messages::UNAUTHENTICATED.to_string(),
        other => other.to_string(),
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        status_for(&self.0)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("Request failed: {:?}", self.0);
        } else {
            log::debug!("Request rejected ({}): {}", status.as_u16(), self.0);
        }

        HttpResponse::build(status).json(ErrorResponse::new(status.as_u16(), message_for(&self.0)))
    }
}

/// Envelope for malformed JSON bodies
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Invalid JSON payload: {}", err);
    let message = match &err {
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            "ukuran payload terlalu besar".to_string()
        }
        JsonPayloadError::ContentType => "content-type harus application/json".to_string(),
        other => format!("payload tidak valid: {}", other),
    };
    ApiError::bad_request(message).into()
}

/// Envelope for unparsable query strings
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::bad_request(format!("query tidak valid: {}", err)).into()
}

/// Envelope for unparsable path segments (e.g. malformed UUIDs)
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Invalid path parameter: {}", err);
    ApiError(DomainError::not_found("resource")).into()
}

/// Default handler for unknown routes
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(404, error_messages::NOT_FOUND))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dc_core::errors::TokenError;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&DomainError::validation("x")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&ValidationError::InvalidEmail.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_for(&DomainError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_for(&TokenError::TokenExpired.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_for(&DomainError::forbidden("no")),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_for(&DomainError::not_found("user")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&AuthError::EmailAlreadyRegistered.into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&AuthError::InvalidVerificationToken.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&DomainError::external("midtrans", "down")),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_internal_message_is_hidden() {
        let err = DomainError::internal("connection refused on 10.0.0.3");
        assert_eq!(message_for(&err), error_messages::INTERNAL);
    }

    #[actix_web::test]
    async fn test_error_envelope() {
        let resp = ApiError(AuthError::InvalidCredentials.into()).error_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], 401);
        assert_eq!(json["message"], "Email atau password salah");
    }
}
