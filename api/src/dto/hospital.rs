use serde::Deserialize;
use validator::Validate;

use dc_core::services::HospitalInput;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct HospitalRequest {
    #[validate(length(min = 1, max = 150, code = "required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub address: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub city: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub province: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl From<HospitalRequest> for HospitalInput {
    fn from(req: HospitalRequest) -> Self {
        HospitalInput {
            name: req.name,
            address: req.address,
            city: req.city,
            province: req.province,
            latitude: req.latitude,
            longitude: req.longitude,
        }
    }
}
