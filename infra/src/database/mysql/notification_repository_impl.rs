//! MySQL implementation of the NotificationRepository trait.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{mysql::MySqlRow, MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

use dc_core::domain::entities::notification::Notification;
use dc_core::domain::value_objects::NotificationFilter;
use dc_core::errors::{DomainError, DomainResult};
use dc_core::repositories::NotificationRepository;
use dc_shared::{PageQuery, Paginated};

use super::common::{
    column, enum_column, fetch_total, like_pattern, push_page, query_error, uuid_column,
};

const COLUMNS: &str =
    "id, user_id, title, message, notification_type, is_read, created_at, updated_at";

const SORTABLE: &[&str] = &["created_at", "updated_at", "is_read", "notification_type"];

pub struct MySqlNotificationRepository {
    pool: MySqlPool,
}

impl MySqlNotificationRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_notification(row: &MySqlRow) -> Result<Notification, DomainError> {
        Ok(Notification {
            id: uuid_column(row, "id")?,
            user_id: uuid_column(row, "user_id")?,
            title: column(row, "title")?,
            message: column(row, "message")?,
            notification_type: enum_column(row, "notification_type")?,
            is_read: column(row, "is_read")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }

    fn push_conditions(
        builder: &mut QueryBuilder<'_, MySql>,
        filter: &NotificationFilter,
        search: Option<&str>,
    ) {
        builder.push(" WHERE 1 = 1");
        if let Some(user_id) = filter.user_id {
            builder.push(" AND user_id = ").push_bind(user_id.to_string());
        }
        if filter.unread_only {
            builder.push(" AND is_read = FALSE");
        }
        if let Some(kind) = filter.notification_type {
            builder.push(" AND notification_type = ").push_bind(kind.as_str());
        }
        if let Some(term) = search {
            let pattern = like_pattern(term);
            builder
                .push(" AND (LOWER(title) LIKE ")
                .push_bind(pattern.clone())
                .push(" OR LOWER(message) LIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }
}

#[async_trait]
impl NotificationRepository for MySqlNotificationRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Notification>> {
        let query = format!("SELECT {} FROM notifications WHERE id = ? LIMIT 1", COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;
        row.as_ref().map(Self::row_to_notification).transpose()
    }

    async fn create(&self, notification: Notification) -> DomainResult<Notification> {
        sqlx::query(
            r#"
            INSERT INTO notifications (
                id, user_id, title, message, notification_type, is_read,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(notification.id.to_string())
        .bind(notification.user_id.to_string())
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.notification_type.as_str())
        .bind(notification.is_read)
        .bind(notification.created_at)
        .bind(notification.updated_at)
        .execute(&self.pool)
        .await
        .map_err(query_error)?;
        Ok(notification)
    }

    async fn update(&self, notification: Notification) -> DomainResult<Notification> {
        sqlx::query(
            r#"
            UPDATE notifications SET
                user_id = ?, title = ?, message = ?, notification_type = ?,
                is_read = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(notification.user_id.to_string())
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.notification_type.as_str())
        .bind(notification.is_read)
        .bind(notification.updated_at)
        .bind(notification.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(query_error)?;
        Ok(notification)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(
        &self,
        filter: &NotificationFilter,
        query: &PageQuery,
    ) -> DomainResult<Paginated<Notification>> {
        let search = query.search_term();

        let mut count = QueryBuilder::new("SELECT COUNT(*) AS total FROM notifications");
        Self::push_conditions(&mut count, filter, search.as_deref());
        let total = fetch_total(&mut count, &self.pool).await?;

        let mut select = QueryBuilder::new(format!("SELECT {} FROM notifications", COLUMNS));
        Self::push_conditions(&mut select, filter, search.as_deref());
        push_page(&mut select, query, SORTABLE, "");

        let rows = select
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;
        let items = rows
            .iter()
            .map(Self::row_to_notification)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Paginated::new(items, total))
    }

    async fn count_unread(&self, user_id: Uuid) -> DomainResult<u64> {
        let mut count = QueryBuilder::new(
            "SELECT COUNT(*) AS total FROM notifications WHERE is_read = FALSE AND user_id = ",
        );
        count.push_bind(user_id.to_string());
        fetch_total(&mut count, &self.pool).await
    }

    async fn mark_all_read(&self, user_id: Uuid) -> DomainResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE, updated_at = ? WHERE user_id = ? AND is_read = FALSE",
        )
        .bind(Utc::now())
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(query_error)?;
        Ok(result.rows_affected())
    }
}
