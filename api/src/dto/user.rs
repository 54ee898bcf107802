use serde::Deserialize;
use validator::Validate;

use dc_core::services::ProfileUpdate;

/// Profile patch; blank fields are ignored
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 20))]
    pub gender: Option<String>,
    pub email: Option<String>,
    #[validate(length(max = 72))]
    pub password: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    pub blood_type: Option<String>,
    pub birth_date: Option<String>,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    pub wallet_address: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(req: UpdateProfileRequest) -> Self {
        ProfileUpdate {
            name: req.name,
            gender: req.gender,
            email: req.email,
            password: req.password,
            phone: req.phone,
            blood_type: req.blood_type,
            birth_date: req.birth_date,
            address: req.address,
            wallet_address: req.wallet_address,
        }
    }
}
