//! Notification repository trait.

use async_trait::async_trait;
use dc_shared::{PageQuery, Paginated};
use uuid::Uuid;

use crate::domain::entities::notification::Notification;
use crate::domain::value_objects::NotificationFilter;
use crate::errors::DomainResult;

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Notification>>;

    async fn create(&self, notification: Notification) -> DomainResult<Notification>;

    async fn update(&self, notification: Notification) -> DomainResult<Notification>;

    async fn delete(&self, id: Uuid) -> DomainResult<bool>;

    async fn list(
        &self,
        filter: &NotificationFilter,
        query: &PageQuery,
    ) -> DomainResult<Paginated<Notification>>;

    async fn count_unread(&self, user_id: Uuid) -> DomainResult<u64>;

    /// Marks every unread notification of the user as read, returning how many changed
    async fn mark_all_read(&self, user_id: Uuid) -> DomainResult<u64>;
}
