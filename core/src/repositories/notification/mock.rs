//! Mock implementation of NotificationRepository for testing

use async_trait::async_trait;
use dc_shared::{PageQuery, Paginated};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::notification::Notification;
use crate::domain::value_objects::NotificationFilter;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::sort_page;

use super::trait_::NotificationRepository;

#[derive(Default)]
pub struct MockNotificationRepository {
    notifications: Arc<RwLock<HashMap<Uuid, Notification>>>,
}

impl MockNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications addressed to a user, newest first
    pub async fn for_user(&self, user_id: Uuid) -> Vec<Notification> {
        let notifications = self.notifications.read().await;
        let mut items: Vec<Notification> = notifications
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items
    }
}

#[async_trait]
impl NotificationRepository for MockNotificationRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Notification>> {
        Ok(self.notifications.read().await.get(&id).cloned())
    }

    async fn create(&self, notification: Notification) -> DomainResult<Notification> {
        let mut notifications = self.notifications.write().await;
        notifications.insert(notification.id, notification.clone());
        Ok(notification)
    }

    async fn update(&self, notification: Notification) -> DomainResult<Notification> {
        let mut notifications = self.notifications.write().await;
        if !notifications.contains_key(&notification.id) {
            return Err(DomainError::not_found("notifikasi"));
        }
        notifications.insert(notification.id, notification.clone());
        Ok(notification)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        Ok(self.notifications.write().await.remove(&id).is_some())
    }

    async fn list(
        &self,
        filter: &NotificationFilter,
        query: &PageQuery,
    ) -> DomainResult<Paginated<Notification>> {
        let notifications = self.notifications.read().await;
        let search = query.search_term();
        let matching = notifications
            .values()
            .filter(|n| filter.matches(n, search.as_deref()))
            .cloned()
            .collect();
        Ok(sort_page(matching, query, |n| n.created_at))
    }

    async fn count_unread(&self, user_id: Uuid) -> DomainResult<u64> {
        let notifications = self.notifications.read().await;
        Ok(notifications
            .values()
            .filter(|n| n.user_id == user_id && !n.is_read)
            .count() as u64)
    }

    async fn mark_all_read(&self, user_id: Uuid) -> DomainResult<u64> {
        let mut notifications = self.notifications.write().await;
        let mut changed = 0;
        for n in notifications
            .values_mut()
            .filter(|n| n.user_id == user_id && !n.is_read)
        {
            n.mark_read();
            changed += 1;
        }
        Ok(changed)
    }
}
