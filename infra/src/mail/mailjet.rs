//! Mailjet mail delivery
//!
//! Sends HTML email through the Mailjet send API v3.1 using HTTP basic
//! authentication with the API key pair.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, error, info};

use dc_core::errors::DomainResult;
use dc_core::services::Mailer;
use dc_shared::MailConfig;

use super::template::EmailKind;
use crate::InfrastructureError;

const SEND_URL: &str = "https://api.mailjet.com/v3.1/send";
const SERVICE: &str = "mailjet";

/// Mailjet-backed mailer
pub struct MailjetMailer {
    http: reqwest::Client,
    config: MailConfig,
}

impl MailjetMailer {
    /// Create a new Mailjet mailer
    ///
    /// # Arguments
    /// * `config` - API credentials, sender identity and the web client URL
    pub fn new(config: MailConfig) -> Result<Self, InfrastructureError> {
        if !config.is_configured() {
            return Err(InfrastructureError::Config(
                "MAILJET_API_KEY and MAILJET_SECRET_KEY must be set".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;

        info!(sender = %config.sender_email, "Mailjet mailer initialized");
        Ok(Self { http, config })
    }

    /// Build the v3.1 send payload for a single recipient
    pub(crate) fn payload(&self, kind: EmailKind, to: &str, name: &str, token: &str) -> Value {
        json!({
            "Messages": [{
                "From": {
                    "Email": self.config.sender_email,
                    "Name": self.config.sender_name,
                },
                "To": [{ "Email": to, "Name": name }],
                "Subject": kind.subject(),
                "HTMLPart": kind.render(&self.config.app_base_url, name, token),
            }]
        })
    }

    async fn send(&self, kind: EmailKind, to: &str, name: &str, token: &str) -> DomainResult<()> {
        debug!(to = %to, subject = kind.subject(), "Sending email");

        let response = self
            .http
            .post(SEND_URL)
            .basic_auth(&self.config.api_key, Some(&self.config.secret_key))
            .json(&self.payload(kind, to, name, token))
            .send()
            .await
            .map_err(|e| InfrastructureError::from(e).into_external(SERVICE))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(to = %to, status = %status, body = %body, "Mailjet rejected the message");
            return Err(InfrastructureError::General(format!(
                "send failed with status {}",
                status
            ))
            .into_external(SERVICE));
        }

        info!(to = %to, subject = kind.subject(), "Email sent");
        Ok(())
    }
}

#[async_trait]
impl Mailer for MailjetMailer {
    async fn send_verification_email(&self, to: &str, name: &str, token: &str) -> DomainResult<()> {
        self.send(EmailKind::Verification, to, name, token).await
    }

    async fn send_reset_password_email(
        &self,
        to: &str,
        name: &str,
        token: &str,
    ) -> DomainResult<()> {
        self.send(EmailKind::ResetPassword, to, name, token).await
    }
}
