//! Donation certificate with a keyed digital signature.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use hmac::{Hmac, Mac};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

use crate::domain::time::jakarta_date;
use crate::errors::{DomainError, DomainResult};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: Uuid,
    pub user_id: Uuid,
    pub donation_id: Uuid,
    pub certificate_number: String,
    pub digital_signature: String,
    /// Transaction that minted the certificate on chain
    pub tx_hash: Option<String>,
    pub issued_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Certificate {
    /// Issues a signed certificate for a completed donation
    pub fn issue(
        user_id: Uuid,
        donation_id: Uuid,
        secret: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let now = now.trunc_subsecs(0);
        let certificate_number = generate_certificate_number(now);
        let payload = signing_payload(&certificate_number, donation_id, user_id, now);
        let digital_signature = hex::encode(keyed(secret)?.chain_update(payload).finalize().into_bytes());

        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            donation_id,
            certificate_number,
            digital_signature,
            tx_hash: None,
            issued_at: now,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn verify_signature(&self, secret: &str) -> bool {
        let Ok(signature) = hex::decode(&self.digital_signature) else {
            return false;
        };
        let payload = signing_payload(
            &self.certificate_number,
            self.donation_id,
            self.user_id,
            self.issued_at,
        );
        match keyed(secret) {
            Ok(mac) => mac.chain_update(payload).verify_slice(&signature).is_ok(),
            Err(_) => false,
        }
    }

    pub fn is_minted(&self) -> bool {
        self.tx_hash.is_some()
    }

    pub fn record_mint(&mut self, tx_hash: String) {
        self.tx_hash = Some(tx_hash);
        self.updated_at = Utc::now();
    }
}

/// `DC-<YYYYMMDD>-<6 hex>`
pub fn generate_certificate_number(now: DateTime<Utc>) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..0x100_0000);
    format!("DC-{}-{:06X}", jakarta_date(now).format("%Y%m%d"), suffix)
}

fn keyed(secret: &str) -> DomainResult<HmacSha256> {
    HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| DomainError::internal(format!("certificate signing key: {}", e)))
}

/// `number|donation_id|user_id|issued_at`, with `issued_at` at second
/// precision so stored values re-verify.
fn signing_payload(
    number: &str,
    donation_id: Uuid,
    user_id: Uuid,
    issued_at: DateTime<Utc>,
) -> String {
    format!(
        "{}|{}|{}|{}",
        number,
        donation_id,
        user_id,
        issued_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}
