//! Credentials for third-party collaborators

use serde::{Deserialize, Serialize};

use super::{env_string, Environment};

/// Transactional mail (Mailjet) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    pub api_key: String,
    pub secret_key: String,
    pub sender_email: String,
    pub sender_name: String,
    /// Base URL of the web client, used to build links in emails
    pub app_base_url: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            secret_key: String::new(),
            sender_email: String::from("no-reply@darahconnect.id"),
            sender_name: String::from("Darah Connect"),
            app_base_url: String::from("http://localhost:5173"),
        }
    }
}

impl MailConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: env_string("MAILJET_API_KEY", ""),
            secret_key: env_string("MAILJET_SECRET_KEY", ""),
            sender_email: env_string("MAIL_SENDER_EMAIL", &defaults.sender_email),
            sender_name: env_string("MAIL_SENDER_NAME", &defaults.sender_name),
            app_base_url: env_string("APP_BASE_URL", &defaults.app_base_url),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.secret_key.is_empty()
    }
}

/// Image hosting (Cloudinary) configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl CloudinaryConfig {
    pub fn from_env() -> Self {
        Self {
            cloud_name: env_string("CLOUDINARY_CLOUD_NAME", ""),
            api_key: env_string("CLOUDINARY_API_KEY", ""),
            api_secret: env_string("CLOUDINARY_API_SECRET", ""),
        }
    }
}

/// Payment gateway (Midtrans Snap) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MidtransConfig {
    pub server_key: String,
    /// Sandbox endpoints are used outside production
    pub sandbox: bool,
}

impl MidtransConfig {
    pub fn for_environment(env: Environment) -> Self {
        Self {
            server_key: String::new(),
            sandbox: !env.is_production(),
        }
    }

    pub fn from_env(env: Environment) -> Self {
        Self {
            server_key: env_string("MIDTRANS_SERVER_KEY", ""),
            ..Self::for_environment(env)
        }
    }

    /// Base URL of the Snap API
    pub fn snap_base_url(&self) -> &'static str {
        if self.sandbox {
            "https://app.sandbox.midtrans.com/snap/v1"
        } else {
            "https://app.midtrans.com/snap/v1"
        }
    }
}

/// Relay that submits `SertifikatDonasi` mint transactions
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BlockchainConfig {
    /// Base URL of the signing relay
    pub relay_url: String,
    pub api_key: String,
    pub contract_address: String,
}

impl BlockchainConfig {
    pub fn from_env() -> Self {
        Self {
            relay_url: env_string("BLOCKCHAIN_RELAY_URL", ""),
            api_key: env_string("BLOCKCHAIN_API_KEY", ""),
            contract_address: env_string("CERTIFICATE_CONTRACT_ADDRESS", ""),
        }
    }

    /// Certificates are only minted when a relay and contract are set
    pub fn is_configured(&self) -> bool {
        !self.relay_url.is_empty() && !self.contract_address.is_empty()
    }
}
