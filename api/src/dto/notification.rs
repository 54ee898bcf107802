use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use dc_core::domain::entities::NotificationType;
use dc_core::domain::value_objects::NotificationFilter;
use dc_core::services::NotificationPatch;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MyNotificationsQuery {
    #[serde(default)]
    pub unread_only: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationQuery {
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub unread_only: bool,
    #[serde(rename = "type")]
    pub notification_type: Option<NotificationType>,
}

impl From<NotificationQuery> for NotificationFilter {
    fn from(query: NotificationQuery) -> Self {
        NotificationFilter {
            user_id: query.user_id,
            unread_only: query.unread_only,
            notification_type: query.notification_type,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNotificationRequest {
    pub user_id: Uuid,
    #[validate(length(min = 1, max = 150, code = "required"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub message: String,
    #[serde(default = "general")]
    pub notification_type: NotificationType,
}

fn general() -> NotificationType {
    NotificationType::General
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateNotificationRequest {
    #[validate(length(min = 1, max = 150, code = "required"))]
    pub title: Option<String>,
    #[validate(length(max = 1000))]
    pub message: Option<String>,
    pub notification_type: Option<NotificationType>,
    pub is_read: Option<bool>,
}

impl From<UpdateNotificationRequest> for NotificationPatch {
    fn from(req: UpdateNotificationRequest) -> Self {
        NotificationPatch {
            title: req.title,
            message: req.message,
            notification_type: req.notification_type,
            is_read: req.is_read,
        }
    }
}
