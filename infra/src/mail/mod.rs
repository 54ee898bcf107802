//! Transactional email
//!
//! `MailjetMailer` delivers through the Mailjet send API. `LogMailer` only
//! logs the links and is used when no Mailjet credentials are configured.

pub mod mailjet;
mod template;

pub use mailjet::MailjetMailer;
pub use template::EmailKind;

use async_trait::async_trait;
use tracing::info;

use dc_core::errors::DomainResult;
use dc_core::services::Mailer;

/// Mailer that writes the would-be email links to the log
#[derive(Debug, Clone)]
pub struct LogMailer {
    app_base_url: String,
}

impl LogMailer {
    pub fn new(app_base_url: impl Into<String>) -> Self {
        Self {
            app_base_url: app_base_url.into(),
        }
    }

    fn log(&self, kind: EmailKind, to: &str, token: &str) {
        info!(
            to = %to,
            subject = kind.subject(),
            link = %kind.link(&self.app_base_url, token),
            "Mail delivery disabled, email not sent"
        );
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send_verification_email(&self, to: &str, _name: &str, token: &str) -> DomainResult<()> {
        self.log(EmailKind::Verification, to, token);
        Ok(())
    }

    async fn send_reset_password_email(
        &self,
        to: &str,
        _name: &str,
        token: &str,
    ) -> DomainResult<()> {
        self.log(EmailKind::ResetPassword, to, token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_mailer_never_fails() {
        let mailer = LogMailer::new("http://localhost:5173");
        assert!(mailer
            .send_verification_email("budi@example.com", "Budi", "abc123")
            .await
            .is_ok());
        assert!(mailer
            .send_reset_password_email("budi@example.com", "Budi", "jwt")
            .await
            .is_ok());
    }
}
