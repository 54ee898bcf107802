//! Issues, renews and checks health passports. Validity is judged against the
//! current instant; passport numbers carry the Jakarta calendar date.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use dc_shared::{PageQuery, Paginated};
use uuid::Uuid;

use crate::domain::entities::health_passport::{
    HealthPassport, PassportStatus, PASSPORT_NUMBER_RETRIES,
};
use crate::domain::time::jakarta_now;
use crate::domain::value_objects::{Actor, PassportFilter};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::HealthPassportRepository;

pub struct HealthPassportService {
    passports: Arc<dyn HealthPassportRepository>,
}

impl HealthPassportService {
    pub fn new(passports: Arc<dyn HealthPassportRepository>) -> Self {
        Self { passports }
    }

    fn now() -> DateTime<Utc> {
        jakarta_now().with_timezone(&Utc)
    }

    async fn find(&self, id: Uuid) -> DomainResult<HealthPassport> {
        self.passports
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("paspor kesehatan"))
    }

    /// Renews the caller's passport, or issues one if they have none
    pub async fn create_or_renew(&self, actor: &Actor) -> DomainResult<HealthPassport> {
        let now = Self::now();
        let existing = self.passports.find_by_user(actor.user_id).await?;
        let renewing = existing.is_some();
        let mut passport = match existing {
            Some(mut passport) => {
                passport.renew(now);
                passport
            }
            None => HealthPassport::new(actor.user_id, now),
        };

        let mut attempt = 0;
        loop {
            attempt += 1;
            let saved = if renewing {
                self.passports.update(passport.clone()).await
            } else {
                self.passports.create(passport.clone()).await
            };

            match saved {
                Ok(saved) => {
                    tracing::info!(
                        user_id = %actor.user_id,
                        passport_number = %saved.passport_number,
                        renewed = renewing,
                        "health passport issued"
                    );
                    return Ok(saved);
                }
                Err(e) if e.is_conflict() && attempt < PASSPORT_NUMBER_RETRIES => {
                    tracing::warn!(attempt, "passport number collision, regenerating");
                    passport.regenerate_number(now);
                }
                Err(e) => return Err(e),
            }
        }
    }

    pub async fn get_mine(&self, actor: &Actor) -> DomainResult<HealthPassport> {
        self.passports
            .find_by_user(actor.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("paspor kesehatan"))
    }

    /// The user's passport if it is active and unexpired
    pub async fn require_valid(&self, user_id: Uuid) -> DomainResult<HealthPassport> {
        let passport = self
            .passports
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("paspor kesehatan"))?;

        if !passport.is_valid_at(Self::now()) {
            return Err(DomainError::business("paspor kesehatan sudah kadaluarsa"));
        }
        Ok(passport)
    }

    pub async fn list(
        &self,
        actor: &Actor,
        filter: PassportFilter,
        query: &PageQuery,
    ) -> DomainResult<Paginated<HealthPassport>> {
        actor.ensure_admin()?;
        self.passports.list(&filter, query).await
    }

    pub async fn get_by_id(&self, actor: &Actor, id: Uuid) -> DomainResult<HealthPassport> {
        let passport = self.find(id).await?;
        actor.ensure_owner(passport.user_id)?;
        Ok(passport)
    }

    pub async fn update_status(
        &self,
        actor: &Actor,
        id: Uuid,
        status: PassportStatus,
    ) -> DomainResult<HealthPassport> {
        actor.ensure_admin()?;
        let mut passport = self.find(id).await?;
        passport.status = status;
        passport.updated_at = Utc::now();
        self.passports.update(passport).await
    }

    pub async fn delete(&self, actor: &Actor, id: Uuid) -> DomainResult<()> {
        actor.ensure_admin()?;
        if !self.passports.delete(id).await? {
            return Err(DomainError::not_found("paspor kesehatan"));
        }
        Ok(())
    }
}
