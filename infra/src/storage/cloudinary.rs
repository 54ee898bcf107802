//! Cloudinary image storage
//!
//! Uploads use the signed upload API: the request parameters are sorted,
//! joined as `k=v&k=v`, suffixed with the API secret and hashed with
//! SHA-256. Images are sent inline as base64 data URIs.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::time::Duration;
use tracing::{error, info, warn};

use dc_core::errors::{DomainError, DomainResult};
use dc_core::services::{ImageStorage, UploadedImage};
use dc_shared::CloudinaryConfig;

use crate::InfrastructureError;

const API_BASE: &str = "https://api.cloudinary.com/v1_1";
const SERVICE: &str = "cloudinary";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

/// Cloudinary-backed image storage
pub struct CloudinaryStorage {
    http: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryStorage {
    pub fn new(config: CloudinaryConfig) -> Result<Self, InfrastructureError> {
        if config.cloud_name.is_empty() || config.api_secret.is_empty() {
            warn!("Cloudinary credentials missing, image uploads will fail");
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { http, config })
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/{}/image/{}", API_BASE, self.config.cloud_name, action)
    }

    fn ensure_configured(&self) -> DomainResult<()> {
        if self.config.cloud_name.is_empty()
            || self.config.api_key.is_empty()
            || self.config.api_secret.is_empty()
        {
            return Err(DomainError::external(SERVICE, "image storage is not configured"));
        }
        Ok(())
    }

    /// Sign request parameters; `params` must not contain `file`, `api_key`
    /// or the signature fields themselves
    pub(crate) fn sign(&self, params: &[(&str, String)]) -> String {
        let mut sorted: Vec<&(&str, String)> = params.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));

        let to_sign = sorted
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha256::new();
        hasher.update(to_sign.as_bytes());
        hasher.update(self.config.api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Build the signed form for an API call
    fn signed_form(&self, mut params: Vec<(&'static str, String)>) -> Vec<(&'static str, String)> {
        params.push(("timestamp", Utc::now().timestamp().to_string()));
        let signature = self.sign(&params);
        params.push(("api_key", self.config.api_key.clone()));
        params.push(("signature_algorithm", "sha256".to_string()));
        params.push(("signature", signature));
        params
    }

    async fn post(&self, action: &str, form: &[(&str, String)]) -> DomainResult<reqwest::Response> {
        let response = self
            .http
            .post(self.endpoint(action))
            .form(form)
            .send()
            .await
            .map_err(|e| InfrastructureError::from(e).into_external(SERVICE))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(action = action, status = %status, body = %body, "Cloudinary request failed");
            return Err(DomainError::external(
                SERVICE,
                format!("{} failed with status {}", action, status),
            ));
        }
        Ok(response)
    }
}

/// Inline the bytes as a `data:` URI accepted by the upload API
pub(crate) fn data_uri(bytes: &[u8], content_type: &str) -> String {
    format!("data:{};base64,{}", content_type, STANDARD.encode(bytes))
}

#[async_trait]
impl ImageStorage for CloudinaryStorage {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
        folder: &str,
    ) -> DomainResult<UploadedImage> {
        self.ensure_configured()?;

        let mut form = self.signed_form(vec![("folder", folder.to_string())]);
        form.push(("file", data_uri(&bytes, content_type)));

        let uploaded: UploadResponse = self
            .post("upload", &form)
            .await?
            .json()
            .await
            .map_err(|e| InfrastructureError::from(e).into_external(SERVICE))?;

        info!(public_id = %uploaded.public_id, size = bytes.len(), "Image uploaded");
        Ok(UploadedImage {
            url: uploaded.secure_url,
            public_id: uploaded.public_id,
        })
    }

    async fn delete(&self, public_id: &str) -> DomainResult<()> {
        self.ensure_configured()?;

        let form = self.signed_form(vec![("public_id", public_id.to_string())]);
        let destroyed: DestroyResponse = self
            .post("destroy", &form)
            .await?
            .json()
            .await
            .map_err(|e| InfrastructureError::from(e).into_external(SERVICE))?;

        // "not found" is fine: the image is gone either way
        if destroyed.result != "ok" {
            warn!(public_id = %public_id, result = %destroyed.result, "Image was not deleted");
        }
        Ok(())
    }
}
