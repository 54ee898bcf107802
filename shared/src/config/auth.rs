//! Authentication and authorization configuration

use serde::{Deserialize, Serialize};

use super::{env_or, env_string};

const DEFAULT_SECRET: &str = "darah-connect-secret-change-in-production";

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret key for HS256 signing
    pub secret: String,

    /// Login token lifetime in minutes
    pub access_token_expiry_minutes: i64,

    /// Reset-password token lifetime in minutes
    pub reset_token_expiry_minutes: i64,

    /// Issuer of login tokens
    pub issuer: String,

    /// Issuer of reset-password tokens
    pub reset_issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            access_token_expiry_minutes: 10,
            reset_token_expiry_minutes: 10,
            issuer: String::from("Darah Connect"),
            reset_issuer: String::from("Reset Password"),
        }
    }
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry_minutes = minutes;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

/// Google OAuth client configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GoogleOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
}

impl GoogleOAuthConfig {
    pub fn from_env() -> Self {
        Self {
            client_id: env_string("GOOGLE_CLIENT_ID", ""),
            client_secret: env_string("GOOGLE_CLIENT_SECRET", ""),
            redirect_url: env_string(
                "GOOGLE_REDIRECT_URL",
                "http://localhost:8080/api/v1/auth/google/callback",
            ),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    pub jwt: JwtConfig,

    #[serde(default)]
    pub google: GoogleOAuthConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = JwtConfig::default();
        Self {
            jwt: JwtConfig {
                secret: env_string("JWT_SECRET_KEY", DEFAULT_SECRET),
                access_token_expiry_minutes: env_or(
                    "JWT_EXPIRY_MINUTES",
                    defaults.access_token_expiry_minutes,
                ),
                reset_token_expiry_minutes: env_or(
                    "JWT_RESET_EXPIRY_MINUTES",
                    defaults.reset_token_expiry_minutes,
                ),
                ..defaults
            },
            google: GoogleOAuthConfig::from_env(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry_minutes, 10);
        assert_eq!(config.issuer, "Darah Connect");
        assert_eq!(config.reset_issuer, "Reset Password");
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret").with_access_expiry_minutes(30);
        assert_eq!(config.access_token_expiry_minutes, 30);
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_google_config_requires_credentials() {
        assert!(!GoogleOAuthConfig::default().is_configured());
    }
}
