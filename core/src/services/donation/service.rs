//! Main donation service implementation

use std::sync::Arc;

use dc_shared::{PageQuery, Paginated};
use uuid::Uuid;

use crate::domain::entities::donation::{parse_transaction_time, Donation, PaymentStatus};
use crate::domain::entities::notification::NotificationType;
use crate::domain::value_objects::{Actor, DonationFilter};
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::{DonationRepository, UserRepository};
use crate::services::integrations::{PaymentCustomer, PaymentGateway};
use crate::services::notification::NotificationService;

/// Fields of a gateway status callback
#[derive(Debug, Clone)]
pub struct WebhookNotification {
    pub order_id: String,
    pub transaction_status: String,
    pub transaction_time: String,
}

pub struct DonationService {
    donations: Arc<dyn DonationRepository>,
    users: Arc<dyn UserRepository>,
    gateway: Arc<dyn PaymentGateway>,
    notifications: Arc<NotificationService>,
}

impl DonationService {
    pub fn new(
        donations: Arc<dyn DonationRepository>,
        users: Arc<dyn UserRepository>,
        gateway: Arc<dyn PaymentGateway>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            donations,
            users,
            gateway,
            notifications,
        }
    }

    async fn find(&self, id: Uuid) -> DomainResult<Donation> {
        self.donations
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("donasi"))
    }

    /// Opens a checkout session for the caller
    pub async fn create_transaction(&self, actor: &Actor, amount: i64) -> DomainResult<Donation> {
        let mut donation = Donation::new(actor.user_id, amount)?;
        let user = self
            .users
            .find_by_id(actor.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("user"))?;

        let customer = PaymentCustomer {
            name: user.name,
            email: user.email,
            phone: user.phone,
        };
        let session = self
            .gateway
            .create_transaction(&donation.order_id, donation.amount, &customer)
            .await?;
        donation.attach_session(session.token, session.redirect_url);

        let donation = self.donations.create(donation).await?;

        self.notifications
            .notify_quietly(
                actor.user_id,
                "Donasi dibuat",
                &format!(
                    "Silahkan selesaikan pembayaran donasi sebesar Rp{}.",
                    donation.amount
                ),
                NotificationType::Payment,
            )
            .await;

        tracing::info!(order_id = %donation.order_id, amount = donation.amount, "donation transaction created");
        Ok(donation)
    }

    /// Applies a gateway status callback
    pub async fn handle_webhook(&self, notification: WebhookNotification) -> DomainResult<Donation> {
        if notification.order_id.trim().is_empty() {
            return Err(ValidationError::required("order_id").into());
        }
        let status = PaymentStatus::from_gateway(&notification.transaction_status)?;
        let transaction_time = parse_transaction_time(&notification.transaction_time)?;

        let mut donation = self
            .donations
            .find_by_order_id(&notification.order_id)
            .await?
            .ok_or_else(|| DomainError::not_found("donasi"))?;

        let newly_settled = status == PaymentStatus::Success && donation.status != PaymentStatus::Success;
        if !donation.apply_callback(status, transaction_time) {
            tracing::info!(
                order_id = %donation.order_id,
                transaction_status = %notification.transaction_status,
                status = %donation.status,
                "stale payment callback ignored"
            );
            return Ok(donation);
        }
        let donation = self.donations.update(donation).await?;

        if newly_settled {
            self.notifications
                .notify_quietly(
                    donation.user_id,
                    "Donasi berhasil",
                    &format!(
                        "Terima kasih, donasi sebesar Rp{} telah kami terima.",
                        donation.amount
                    ),
                    NotificationType::Payment,
                )
                .await;
        }

        tracing::info!(
            order_id = %donation.order_id,
            transaction_status = %notification.transaction_status,
            status = %donation.status,
            "payment callback applied"
        );
        Ok(donation)
    }

    pub async fn list_all(
        &self,
        actor: &Actor,
        filter: DonationFilter,
        query: &PageQuery,
    ) -> DomainResult<Paginated<Donation>> {
        actor.ensure_admin()?;
        self.donations.list(&filter, query).await
    }

    pub async fn list_by_user(
        &self,
        actor: &Actor,
        query: &PageQuery,
    ) -> DomainResult<Paginated<Donation>> {
        let filter = DonationFilter {
            user_id: Some(actor.user_id),
            ..Default::default()
        };
        self.donations.list(&filter, query).await
    }

    pub async fn get_by_id(&self, actor: &Actor, id: Uuid) -> DomainResult<Donation> {
        let donation = self.find(id).await?;
        actor.ensure_owner(donation.user_id)?;
        Ok(donation)
    }
}
