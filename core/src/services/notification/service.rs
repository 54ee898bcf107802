//! User-addressed notifications and their read state

use std::sync::Arc;

use dc_shared::{PageQuery, Paginated};
use uuid::Uuid;

use crate::domain::entities::notification::{Notification, NotificationType};
use crate::domain::value_objects::{Actor, NotificationFilter};
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::NotificationRepository;

/// Admin edit of a notification
#[derive(Debug, Clone, Default)]
pub struct NotificationPatch {
    pub title: Option<String>,
    pub message: Option<String>,
    pub notification_type: Option<NotificationType>,
    pub is_read: Option<bool>,
}

pub struct NotificationService {
    notifications: Arc<dyn NotificationRepository>,
}

impl NotificationService {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    pub async fn notify(
        &self,
        user_id: Uuid,
        title: &str,
        message: &str,
        notification_type: NotificationType,
    ) -> DomainResult<Notification> {
        let notification = Notification::new(user_id, title, message, notification_type);
        self.notifications.create(notification).await
    }

    /// Sends a notification as a side effect; failures are logged, not returned
    pub async fn notify_quietly(
        &self,
        user_id: Uuid,
        title: &str,
        message: &str,
        notification_type: NotificationType,
    ) {
        if let Err(e) = self.notify(user_id, title, message, notification_type).await {
            tracing::warn!(
                user_id = %user_id,
                notification_type = %notification_type,
                error = %e,
                "failed to store notification"
            );
        }
    }

    async fn find(&self, id: Uuid) -> DomainResult<Notification> {
        self.notifications
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("notifikasi"))
    }

    pub async fn list_all(
        &self,
        actor: &Actor,
        filter: NotificationFilter,
        query: &PageQuery,
    ) -> DomainResult<Paginated<Notification>> {
        actor.ensure_admin()?;
        self.notifications.list(&filter, query).await
    }

    pub async fn list_by_user(
        &self,
        actor: &Actor,
        unread_only: bool,
        query: &PageQuery,
    ) -> DomainResult<Paginated<Notification>> {
        let filter = NotificationFilter {
            user_id: Some(actor.user_id),
            unread_only,
            ..Default::default()
        };
        self.notifications.list(&filter, query).await
    }

    /// Reads one notification; the addressee reading it marks it read
    pub async fn get_for_user(&self, actor: &Actor, id: Uuid) -> DomainResult<Notification> {
        let mut notification = self.find(id).await?;
        actor.ensure_owner(notification.user_id)?;

        if actor.owns(notification.user_id) && !notification.is_read {
            notification.mark_read();
            notification = self.notifications.update(notification).await?;
        }
        Ok(notification)
    }

    pub async fn unread_count(&self, actor: &Actor) -> DomainResult<u64> {
        self.notifications.count_unread(actor.user_id).await
    }

    pub async fn mark_all_read(&self, actor: &Actor) -> DomainResult<u64> {
        self.notifications.mark_all_read(actor.user_id).await
    }

    pub async fn create(
        &self,
        actor: &Actor,
        user_id: Uuid,
        title: &str,
        message: &str,
        notification_type: NotificationType,
    ) -> DomainResult<Notification> {
        actor.ensure_admin()?;
        if title.trim().is_empty() {
            return Err(ValidationError::required("title").into());
        }
        self.notify(user_id, title, message, notification_type).await
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        patch: NotificationPatch,
    ) -> DomainResult<Notification> {
        actor.ensure_admin()?;
        let mut notification = self.find(id).await?;

        if let Some(title) = patch.title.filter(|t| !t.trim().is_empty()) {
            notification.title = title;
        }
        if let Some(message) = patch.message.filter(|m| !m.trim().is_empty()) {
            notification.message = message;
        }
        if let Some(notification_type) = patch.notification_type {
            notification.notification_type = notification_type;
        }
        if let Some(is_read) = patch.is_read {
            notification.is_read = is_read;
        }
        notification.updated_at = chrono::Utc::now();

        self.notifications.update(notification).await
    }

    pub async fn delete(&self, actor: &Actor, id: Uuid) -> DomainResult<()> {
        let notification = self.find(id).await?;
        actor.ensure_owner(notification.user_id)?;
        self.notifications.delete(id).await?;
        Ok(())
    }
}
