use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use dc_core::domain::entities::RegistrationStatus;
use dc_core::domain::value_objects::RegistrationFilter;
use dc_core::services::{NewRegistration, RegistrationPatch};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRegistrationRequest {
    pub request_id: Uuid,
    pub schedule_id: Option<Uuid>,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub notes: String,
}

impl From<CreateRegistrationRequest> for NewRegistration {
    fn from(req: CreateRegistrationRequest) -> Self {
        NewRegistration {
            request_id: req.request_id,
            schedule_id: req.schedule_id,
            notes: req.notes,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRegistrationRequest {
    pub status: Option<RegistrationStatus>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

impl From<UpdateRegistrationRequest> for RegistrationPatch {
    fn from(req: UpdateRegistrationRequest) -> Self {
        RegistrationPatch {
            status: req.status,
            notes: req.notes,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationQuery {
    pub user_id: Option<Uuid>,
    pub request_id: Option<Uuid>,
    pub status: Option<RegistrationStatus>,
}

impl From<RegistrationQuery> for RegistrationFilter {
    fn from(query: RegistrationQuery) -> Self {
        RegistrationFilter {
            user_id: query.user_id,
            request_id: query.request_id,
            status: query.status,
        }
    }
}
