//! Hospital CRUD; writes are admin-only

use std::sync::Arc;

use dc_shared::{validation, PageQuery, Paginated};
use uuid::Uuid;

use crate::domain::entities::hospital::Hospital;
use crate::domain::value_objects::Actor;
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::HospitalRepository;

#[derive(Debug, Clone, Default)]
pub struct HospitalInput {
    pub name: String,
    pub address: String,
    pub city: String,
    pub province: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl HospitalInput {
    fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::required("name").into());
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ValidationError::OutOfRange {
                field: "latitude".to_string(),
                min: "-90".to_string(),
                max: "90".to_string(),
            }
            .into());
        }
        if !validation::is_valid_coordinate(self.latitude, self.longitude) {
            return Err(ValidationError::OutOfRange {
                field: "longitude".to_string(),
                min: "-180".to_string(),
                max: "180".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

pub struct HospitalService {
    hospitals: Arc<dyn HospitalRepository>,
}

impl HospitalService {
    pub fn new(hospitals: Arc<dyn HospitalRepository>) -> Self {
        Self { hospitals }
    }

    pub async fn create(&self, actor: &Actor, input: HospitalInput) -> DomainResult<Hospital> {
        actor.ensure_admin()?;
        input.validate()?;

        let hospital = Hospital::new(
            input.name.trim().to_string(),
            input.address,
            input.city,
            input.province,
            input.latitude,
            input.longitude,
        );
        self.hospitals.create(hospital).await
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        input: HospitalInput,
    ) -> DomainResult<Hospital> {
        actor.ensure_admin()?;
        input.validate()?;

        let mut hospital = self.get_by_id(id).await?;
        hospital.name = input.name.trim().to_string();
        hospital.address = input.address;
        hospital.city = input.city;
        hospital.province = input.province;
        hospital.latitude = input.latitude;
        hospital.longitude = input.longitude;
        hospital.touch();

        self.hospitals.update(hospital).await
    }

    pub async fn delete(&self, actor: &Actor, id: Uuid) -> DomainResult<()> {
        actor.ensure_admin()?;
        if !self.hospitals.delete(id).await? {
            return Err(DomainError::not_found("rumah sakit"));
        }
        Ok(())
    }

    pub async fn list(&self, query: &PageQuery) -> DomainResult<Paginated<Hospital>> {
        self.hospitals.list(query).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> DomainResult<Hospital> {
        self.hospitals
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("rumah sakit"))
    }
}
