use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use dc_core::domain::entities::{BloodDonationStatus, PassportStatus};
use dc_core::domain::value_objects::{BloodDonationFilter, PassportFilter};
use dc_core::services::{BloodDonationPatch, NewBloodDonation};

use super::common::{date, optional_date, optional_image, ImagePayload};
use crate::handlers::ApiError;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBloodDonationRequest {
    pub registration_id: Uuid,
    pub hospital_id: Uuid,
    pub donation_date: String,
    #[validate(length(min = 1, max = 3, code = "required"))]
    pub blood_type: String,
    pub image: Option<ImagePayload>,
}

impl CreateBloodDonationRequest {
    pub fn into_input(self) -> Result<NewBloodDonation, ApiError> {
        Ok(NewBloodDonation {
            donation_date: date("donation_date", &self.donation_date)?,
            image: optional_image(self.image)?,
            registration_id: self.registration_id,
            hospital_id: self.hospital_id,
            blood_type: self.blood_type,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBloodDonationRequest {
    pub hospital_id: Option<Uuid>,
    pub donation_date: Option<String>,
    #[validate(length(max = 3))]
    pub blood_type: Option<String>,
    pub image: Option<ImagePayload>,
}

impl UpdateBloodDonationRequest {
    pub fn into_patch(self) -> Result<BloodDonationPatch, ApiError> {
        Ok(BloodDonationPatch {
            donation_date: optional_date("donation_date", self.donation_date.as_deref())?,
            image: optional_image(self.image)?,
            hospital_id: self.hospital_id,
            blood_type: self.blood_type,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BloodDonationQuery {
    pub user_id: Option<Uuid>,
    pub status: Option<BloodDonationStatus>,
    pub blood_type: Option<String>,
}

impl From<BloodDonationQuery> for BloodDonationFilter {
    fn from(query: BloodDonationQuery) -> Self {
        BloodDonationFilter {
            user_id: query.user_id,
            status: query.status,
            blood_type: query.blood_type.filter(|b| !b.trim().is_empty()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PassportQuery {
    pub status: Option<PassportStatus>,
}

impl From<PassportQuery> for PassportFilter {
    fn from(query: PassportQuery) -> Self {
        PassportFilter {
            status: query.status,
        }
    }
}
