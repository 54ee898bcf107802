use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use dc_core::domain::entities::{PaymentStatus, MIN_DONATION_AMOUNT};
use dc_core::domain::value_objects::DonationFilter;
use dc_core::services::WebhookNotification;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDonationRequest {
    #[validate(range(min = "MIN_DONATION_AMOUNT"))]
    pub amount: i64,
}

/// Payment gateway notification; extra gateway fields are ignored
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WebhookRequest {
    #[validate(length(min = 1, code = "required"))]
    pub order_id: String,
    #[validate(length(min = 1, code = "required"))]
    pub transaction_status: String,
    #[serde(default)]
    pub transaction_time: String,
}

impl From<WebhookRequest> for WebhookNotification {
    fn from(req: WebhookRequest) -> Self {
        WebhookNotification {
            order_id: req.order_id,
            transaction_status: req.transaction_status,
            transaction_time: req.transaction_time,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DonationQuery {
    pub user_id: Option<Uuid>,
    pub order_id: Option<String>,
    pub status: Option<PaymentStatus>,
}

impl From<DonationQuery> for DonationFilter {
    fn from(query: DonationQuery) -> Self {
        DonationFilter {
            user_id: query.user_id,
            order_id: query.order_id.filter(|o| !o.trim().is_empty()),
            status: query.status,
        }
    }
}
