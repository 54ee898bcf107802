//! Mints `SertifikatDonasi` tokens through a signing relay
//!
//! The relay holds the issuer key and submits the contract call; this client
//! posts the certificate and reads back the transaction hash.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

use dc_core::errors::{DomainError, DomainResult};
use dc_core::services::{CertificateMint, CertificateMinter, MintReceipt};
use dc_shared::BlockchainConfig;

use crate::InfrastructureError;

const SERVICE: &str = "blockchain";

#[derive(Debug, Serialize)]
pub(crate) struct MintRequest<'a> {
    contract_address: &'a str,
    recipient: &'a str,
    donor_name: &'a str,
    donor_address: &'a str,
    certificate_number: &'a str,
}

#[derive(Debug, Deserialize)]
struct MintResponse {
    tx_hash: String,
}

impl<'a> MintRequest<'a> {
    pub(crate) fn new(contract_address: &'a str, mint: &'a CertificateMint) -> Self {
        Self {
            contract_address,
            recipient: &mint.wallet_address,
            donor_name: &mint.donor_name,
            donor_address: &mint.donor_address,
            certificate_number: &mint.certificate_number,
        }
    }
}

pub struct RelayCertificateMinter {
    http: reqwest::Client,
    config: BlockchainConfig,
}

impl RelayCertificateMinter {
    pub fn new(config: BlockchainConfig) -> Result<Self, InfrastructureError> {
        if !config.is_configured() {
            return Err(InfrastructureError::Config(
                "BLOCKCHAIN_RELAY_URL and CERTIFICATE_CONTRACT_ADDRESS are required".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;

        info!(contract = %config.contract_address, "Certificate minter initialized");
        Ok(Self { http, config })
    }

    fn mint_url(&self) -> String {
        format!("{}/certificates", self.config.relay_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CertificateMinter for RelayCertificateMinter {
    async fn mint(&self, request: &CertificateMint) -> DomainResult<MintReceipt> {
        let mut call = self
            .http
            .post(self.mint_url())
            .json(&MintRequest::new(&self.config.contract_address, request));
        if !self.config.api_key.is_empty() {
            call = call.bearer_auth(&self.config.api_key);
        }

        let response = call
            .send()
            .await
            .map_err(|e| InfrastructureError::from(e).into_external(SERVICE))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                certificate_number = %request.certificate_number,
                status = %status,
                body = %body,
                "certificate mint rejected"
            );
            return Err(DomainError::external(
                SERVICE,
                format!("mint failed with status {}", status),
            ));
        }

        let minted: MintResponse = response
            .json()
            .await
            .map_err(|e| InfrastructureError::from(e).into_external(SERVICE))?;

        info!(
            certificate_number = %request.certificate_number,
            tx_hash = %minted.tx_hash,
            "certificate minted"
        );
        Ok(MintReceipt {
            tx_hash: minted.tx_hash,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BlockchainConfig {
        BlockchainConfig {
            relay_url: "https://relay.test/".to_string(),
            api_key: String::new(),
            contract_address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
        }
    }

    #[test]
    fn test_request_body() {
        let mint = CertificateMint {
            wallet_address: "0x70997970C51812dc3A010C7d01b50e0d17dc79C8".to_string(),
            donor_name: "Budi".to_string(),
            donor_address: "Jl. Sudirman 1, Jakarta, DKI Jakarta".to_string(),
            certificate_number: "DC-20240101-00ABCD".to_string(),
        };
        let body = serde_json::to_value(MintRequest::new("0xcontract", &mint)).unwrap();

        assert_eq!(body["contract_address"], "0xcontract");
        assert_eq!(body["recipient"], "0x70997970C51812dc3A010C7d01b50e0d17dc79C8");
        assert_eq!(body["donor_address"], "Jl. Sudirman 1, Jakarta, DKI Jakarta");
        assert_eq!(body["certificate_number"], "DC-20240101-00ABCD");
    }

    #[test]
    fn test_mint_url_trims_slash() {
        let minter = RelayCertificateMinter::new(config()).unwrap();
        assert_eq!(minter.mint_url(), "https://relay.test/certificates");
    }

    #[test]
    fn test_requires_configuration() {
        assert!(matches!(
            RelayCertificateMinter::new(BlockchainConfig::default()),
            Err(InfrastructureError::Config(_))
        ));
    }
}
