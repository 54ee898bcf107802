//! Midtrans Snap payment gateway
//!
//! Creates hosted checkout sessions. Authentication is HTTP basic with the
//! server key as the user name and an empty password.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info, warn};

use dc_core::errors::{DomainError, DomainResult};
use dc_core::services::{PaymentCustomer, PaymentGateway, PaymentSession};
use dc_shared::MidtransConfig;

use crate::InfrastructureError;

const SERVICE: &str = "midtrans";

#[derive(Debug, Serialize)]
pub(crate) struct SnapRequest<'a> {
    transaction_details: TransactionDetails<'a>,
    customer_details: CustomerDetails<'a>,
}

#[derive(Debug, Serialize)]
struct TransactionDetails<'a> {
    order_id: &'a str,
    gross_amount: i64,
}

#[derive(Debug, Serialize)]
struct CustomerDetails<'a> {
    first_name: &'a str,
    email: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    phone: &'a str,
}

#[derive(Debug, Deserialize)]
struct SnapResponse {
    token: String,
    redirect_url: String,
}

impl<'a> SnapRequest<'a> {
    pub(crate) fn new(order_id: &'a str, amount: i64, customer: &'a PaymentCustomer) -> Self {
        Self {
            transaction_details: TransactionDetails {
                order_id,
                gross_amount: amount,
            },
            customer_details: CustomerDetails {
                first_name: &customer.name,
                email: &customer.email,
                phone: &customer.phone,
            },
        }
    }
}

/// Midtrans Snap client
pub struct MidtransGateway {
    http: reqwest::Client,
    config: MidtransConfig,
}

impl MidtransGateway {
    pub fn new(config: MidtransConfig) -> Result<Self, InfrastructureError> {
        if config.server_key.is_empty() {
            warn!("MIDTRANS_SERVER_KEY not set, donations cannot be paid");
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        info!(sandbox = config.sandbox, "Midtrans gateway initialized");
        Ok(Self { http, config })
    }

    /// `Authorization` header value for the server key
    pub(crate) fn authorization(&self) -> String {
        format!("Basic {}", STANDARD.encode(format!("{}:", self.config.server_key)))
    }

    fn transactions_url(&self) -> String {
        format!("{}/transactions", self.config.snap_base_url())
    }
}

#[async_trait]
impl PaymentGateway for MidtransGateway {
    async fn create_transaction(
        &self,
        order_id: &str,
        amount: i64,
        customer: &PaymentCustomer,
    ) -> DomainResult<PaymentSession> {
        if self.config.server_key.is_empty() {
            return Err(DomainError::external(SERVICE, "payment gateway is not configured"));
        }

        let response = self
            .http
            .post(self.transactions_url())
            .header(reqwest::header::AUTHORIZATION, self.authorization())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&SnapRequest::new(order_id, amount, customer))
            .send()
            .await
            .map_err(|e| InfrastructureError::from(e).into_external(SERVICE))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(order_id = %order_id, status = %status, body = %body, "Snap transaction rejected");
            return Err(DomainError::external(
                SERVICE,
                format!("transaction failed with status {}", status),
            ));
        }

        let session: SnapResponse = response
            .json()
            .await
            .map_err(|e| InfrastructureError::from(e).into_external(SERVICE))?;

        info!(order_id = %order_id, amount = amount, "Snap transaction created");
        Ok(PaymentSession {
            token: session.token,
            redirect_url: session.redirect_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer() -> PaymentCustomer {
        PaymentCustomer {
            name: "Budi".to_string(),
            email: "budi@example.com".to_string(),
            phone: String::new(),
        }
    }

    #[test]
    fn test_request_body() {
        let customer = customer();
        let body = serde_json::to_value(SnapRequest::new("DONATE-1", 50_000, &customer)).unwrap();

        assert_eq!(body["transaction_details"]["order_id"], "DONATE-1");
        assert_eq!(body["transaction_details"]["gross_amount"], 50_000);
        assert_eq!(body["customer_details"]["first_name"], "Budi");
        assert!(body["customer_details"].get("phone").is_none());
    }

    #[test]
    fn test_authorization_header() {
        let gateway = MidtransGateway::new(MidtransConfig {
            server_key: "SB-Mid-server-abc".to_string(),
            sandbox: true,
        })
        .unwrap();
        assert_eq!(
            gateway.authorization(),
            format!("Basic {}", STANDARD.encode("SB-Mid-server-abc:"))
        );
        assert_eq!(
            gateway.transactions_url(),
            "https://app.sandbox.midtrans.com/snap/v1/transactions"
        );
    }

    #[tokio::test]
    async fn test_missing_server_key() {
        let gateway = MidtransGateway::new(MidtransConfig {
            server_key: String::new(),
            sandbox: true,
        })
        .unwrap();
        let result = gateway.create_transaction("DONATE-1", 10_000, &customer()).await;
        assert!(matches!(result, Err(DomainError::External { .. })));
    }
}
