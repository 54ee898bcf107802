//! Google OAuth2 login
//!
//! Authorization code flow: the consent URL carries an opaque `state`, the
//! callback code is exchanged for an access token, and the token is used to
//! read the user's profile.

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;
use tracing::{error, info, warn};

use dc_core::errors::{DomainError, DomainResult};
use dc_core::services::{OAuthProvider, OAuthUser};
use dc_shared::GoogleOAuthConfig;

use crate::InfrastructureError;

const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";
const SCOPES: &str = "openid email profile";
const SERVICE: &str = "google";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    email: String,
    #[serde(default)]
    verified_email: bool,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    picture: Option<String>,
}

/// Google OAuth2 provider
pub struct GoogleOAuthProvider {
    http: reqwest::Client,
    config: GoogleOAuthConfig,
    auth_url: Url,
}

impl GoogleOAuthProvider {
    pub fn new(config: GoogleOAuthConfig) -> Result<Self, InfrastructureError> {
        if !config.is_configured() {
            warn!("Google OAuth credentials missing, Google login will fail");
        }

        let auth_url = Url::parse(AUTH_URL)
            .map_err(|e| InfrastructureError::Config(format!("Invalid OAuth URL: {}", e)))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            http,
            config,
            auth_url,
        })
    }

    async fn fetch_access_token(&self, code: &str) -> DomainResult<String> {
        let response = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", self.config.redirect_url.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| InfrastructureError::from(e).into_external(SERVICE))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Google rejected the authorization code");
            return Err(DomainError::external(SERVICE, "gagal menukar kode otorisasi"));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| InfrastructureError::from(e).into_external(SERVICE))?;
        Ok(token.access_token)
    }

    async fn fetch_user_info(&self, access_token: &str) -> DomainResult<UserInfo> {
        let response = self
            .http
            .get(USERINFO_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| InfrastructureError::from(e).into_external(SERVICE))?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, "Failed to read Google profile");
            return Err(DomainError::external(SERVICE, "gagal mengambil profil pengguna"));
        }

        response
            .json()
            .await
            .map_err(|e| InfrastructureError::from(e).into_external(SERVICE))
    }
}

#[async_trait]
impl OAuthProvider for GoogleOAuthProvider {
    fn authorization_url(&self, state: &str) -> String {
        let mut url = self.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_url)
            .append_pair("response_type", "code")
            .append_pair("scope", SCOPES)
            .append_pair("access_type", "online")
            .append_pair("state", state);
        url.into()
    }

    async fn exchange_code(&self, code: &str) -> DomainResult<OAuthUser> {
        if !self.config.is_configured() {
            return Err(DomainError::external(SERVICE, "Google login is not configured"));
        }

        let access_token = self.fetch_access_token(code).await?;
        let info = self.fetch_user_info(&access_token).await?;

        if !info.verified_email {
            return Err(DomainError::external(SERVICE, "email Google belum terverifikasi"));
        }

        info!(email = %info.email, "Google login exchanged");
        let name = info
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| info.email.clone());
        Ok(OAuthUser {
            email: info.email,
            name,
            picture: info.picture,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_url() {
        let provider = GoogleOAuthProvider::new(GoogleOAuthConfig {
            client_id: "client-123".to_string(),
            client_secret: "secret".to_string(),
            redirect_url: "http://localhost:8080/api/v1/auth/google/callback".to_string(),
        })
        .unwrap();

        let url = Url::parse(&provider.authorization_url("xyz")).unwrap();
        assert_eq!(url.host_str(), Some("accounts.google.com"));

        let params: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(params["client_id"], "client-123");
        assert_eq!(params["state"], "xyz");
        assert_eq!(params["scope"], "openid email profile");
        assert_eq!(params["response_type"], "code");
        assert_eq!(
            params["redirect_uri"],
            "http://localhost:8080/api/v1/auth/google/callback"
        );
    }

    #[tokio::test]
    async fn test_exchange_requires_configuration() {
        let provider = GoogleOAuthProvider::new(GoogleOAuthConfig::default()).unwrap();
        assert!(matches!(
            provider.exchange_code("code").await,
            Err(DomainError::External { .. })
        ));
    }
}
