//! JWT authentication middleware for protecting API endpoints.
//!
//! `JwtAuth` extracts the bearer token from the Authorization header,
//! verifies it with the core `TokenService` and injects an `AuthContext`
//! into the request. `RequireRole` wraps a scope and rejects callers whose
//! role is not in the allowed set. Requests that match no route pass
//! through untouched so they still end in the 404 envelope.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use uuid::Uuid;

use dc_core::domain::entities::{Claims, Role};
use dc_core::domain::value_objects::Actor;
use dc_core::errors::{DomainError, TokenError};
use dc_core::services::TokenService;

use crate::handlers::ApiError;

/// Authenticated caller injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl AuthContext {
    /// Creates a new authentication context from JWT claims
    pub fn from_claims(claims: Claims) -> Result<Self, DomainError> {
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidClaims))?;
        let role = claims
            .role()
            .ok_or(DomainError::Token(TokenError::InvalidClaims))?;
        Ok(Self {
            user_id,
            email: claims.email,
            name: claims.name,
            role,
        })
    }

    /// The caller as seen by the service layer
    pub fn actor(&self) -> Actor {
        Actor::new(self.user_id, self.role)
    }
}

/// JWT authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    tokens: Arc<TokenService>,
}

impl JwtAuth {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            tokens: self.tokens.clone(),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    tokens: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let tokens = self.tokens.clone();

        Box::pin(async move {
            // unknown paths fall through to the 404 handler
            if req.match_pattern().is_none() {
                return service.call(req).await;
            }

            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => return Err(ApiError::unauthenticated().into()),
            };

            let context = match tokens
                .verify_access_token(&token)
                .and_then(AuthContext::from_claims)
            {
                Ok(context) => context,
                Err(e) => {
                    log::debug!("Token rejected for {} {}: {}", req.method(), req.path(), e);
                    return Err(ApiError::unauthenticated().into());
                }
            };

            req.extensions_mut().insert(context);
            service.call(req).await
        })
    }
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Role gate; must run inside `JwtAuth`
#[derive(Clone)]
pub struct RequireRole {
    allowed: Rc<Vec<Role>>,
}

impl RequireRole {
    pub fn new(allowed: &[Role]) -> Self {
        Self {
            allowed: Rc::new(allowed.to_vec()),
        }
    }

    /// `User` and `Administrator`
    pub fn any_user() -> Self {
        Self::new(&[Role::User, Role::Administrator])
    }

    pub fn admin() -> Self {
        Self::new(&[Role::Administrator])
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            allowed: self.allowed.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    allowed: Rc<Vec<Role>>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let role = req.extensions().get::<AuthContext>().map(|ctx| ctx.role);
        let service = Rc::clone(&self.service);
        let allowed = self.allowed.clone();

        Box::pin(async move {
            if req.match_pattern().is_none() {
                return service.call(req).await;
            }

            match role {
                None => Err(ApiError::unauthenticated().into()),
                Some(role) if !allowed.contains(&role) => {
                    log::warn!("Role {} denied for {} {}", role, req.method(), req.path());
                    Err(ApiError::forbidden().into())
                }
                Some(_) => service.call(req).await,
            }
        })
    }
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::unauthenticated().into());

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test as actix_test;

    #[test]
    fn test_extract_bearer_token() {
        let req = actix_test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req), Some("test_token_123".to_string()));

        let req_no_bearer = actix_test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_empty = actix_test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer "))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_empty), None);

        let req_no_header = actix_test::TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }

    #[test]
    fn test_context_from_claims() {
        let user = dc_core::domain::entities::User::new(
            "Ani".to_string(),
            "ani@example.com".to_string(),
            "hash".to_string(),
        );
        let claims = Claims::new_access_token(&user, 10);
        let context = AuthContext::from_claims(claims).unwrap();

        assert_eq!(context.user_id, user.id);
        assert_eq!(context.role, Role::User);
        assert_eq!(context.actor(), Actor::user(user.id));
    }

    #[test]
    fn test_context_rejects_unknown_role() {
        let user = dc_core::domain::entities::User::new(
            "Ani".to_string(),
            "ani@example.com".to_string(),
            "hash".to_string(),
        );
        let mut claims = Claims::new_access_token(&user, 10);
        claims.role = "Root".to_string();
        assert!(AuthContext::from_claims(claims).is_err());
    }
}
