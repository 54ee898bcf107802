//! Main token service implementation

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use dc_shared::JwtConfig;

use crate::domain::entities::token::{Claims, LoginToken};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, DomainResult, TokenError};

/// Service for issuing and verifying JWTs
pub struct TokenService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Signing secret, also used to key certificate signatures
    pub fn secret(&self) -> &str {
        &self.config.secret
    }

    pub fn access_expiry_minutes(&self) -> i64 {
        self.config.access_token_expiry_minutes
    }

    /// Generates a login token for a user
    pub fn generate_login_token(&self, user: &User) -> DomainResult<LoginToken> {
        let claims = Claims::for_user(
            user,
            &self.config.issuer,
            self.config.access_token_expiry_minutes,
        );
        let token = self.encode_jwt(&claims)?;
        Ok(LoginToken::new(token, self.config.access_token_expiry_minutes))
    }

    /// Generates a reset-password token for a user
    pub fn generate_reset_token(&self, user: &User) -> DomainResult<String> {
        let claims = Claims::for_user(
            user,
            &self.config.reset_issuer,
            self.config.reset_token_expiry_minutes,
        );
        self.encode_jwt(&claims)
    }

    /// Verifies a login token and returns its claims
    pub fn verify_access_token(&self, token: &str) -> DomainResult<Claims> {
        self.decode_jwt(token, &self.config.issuer)
    }

    /// Verifies a reset-password token and returns its claims
    pub fn verify_reset_token(&self, token: &str) -> DomainResult<Claims> {
        self.decode_jwt(token, &self.config.reset_issuer)
    }

    fn encode_jwt(&self, claims: &Claims) -> DomainResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    fn decode_jwt(&self, token: &str, issuer: &str) -> DomainResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.validate_exp = true;
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => DomainError::Token(TokenError::TokenExpired),
                ErrorKind::InvalidSignature => DomainError::Token(TokenError::InvalidSignature),
                ErrorKind::InvalidIssuer => DomainError::Token(TokenError::InvalidClaims),
                _ => DomainError::Token(TokenError::InvalidTokenFormat),
            }
        })?;

        Ok(token_data.claims)
    }
}
