//! Main dashboard service implementation

use chrono::Utc;
use std::sync::Arc;

use crate::domain::entities::blood_donation::BloodDonationStatus;
use crate::domain::entities::health_passport::PassportStatus;
use crate::domain::entities::donation::PaymentStatus;
use crate::domain::time::jakarta_date;
use crate::domain::value_objects::{
    Actor, AdminDashboard, BloodDonationFilter, LandingPage, UserDashboard,
};
use crate::errors::DomainResult;
use crate::repositories::{
    BloodDonationRepository, BloodRequestRepository, DonationRepository,
    HealthPassportRepository, UserRepository,
};
use crate::services::integrations::CacheService;

pub const LANDING_PAGE_CACHE_KEY: &str = "darah-connect:landing-page";

/// Number of campaigns shown on the landing page
const LANDING_PAGE_CAMPAIGNS: u32 = 3;

/// Repositories read by the dashboards
pub struct DashboardRepositories {
    pub users: Arc<dyn UserRepository>,
    pub requests: Arc<dyn BloodRequestRepository>,
    pub blood_donations: Arc<dyn BloodDonationRepository>,
    pub passports: Arc<dyn HealthPassportRepository>,
    pub donations: Arc<dyn DonationRepository>,
}

pub struct DashboardService {
    repos: DashboardRepositories,
    cache: Arc<dyn CacheService>,
    cache_key: String,
    cache_ttl: u64,
}

impl DashboardService {
    pub fn new(repos: DashboardRepositories, cache: Arc<dyn CacheService>, cache_ttl: u64) -> Self {
        Self {
            repos,
            cache,
            cache_key: LANDING_PAGE_CACHE_KEY.to_string(),
            cache_ttl,
        }
    }

    pub fn with_cache_key(mut self, key: impl Into<String>) -> Self {
        self.cache_key = key.into();
        self
    }

    pub async fn user_dashboard(&self, actor: &Actor) -> DomainResult<UserDashboard> {
        let mine = BloodDonationFilter {
            user_id: Some(actor.user_id),
            ..Default::default()
        };
        let completed = BloodDonationFilter {
            status: Some(BloodDonationStatus::Completed),
            ..mine.clone()
        };

        let total_donor = self.repos.blood_donations.count(&mine).await?;
        let total_sertifikat = self.repos.blood_donations.count(&completed).await?;
        let last_donation = self
            .repos
            .blood_donations
            .latest_for_user(actor.user_id)
            .await?
            .map(|d| d.donation_date);
        let health_passport = self
            .repos
            .passports
            .find_by_user(actor.user_id)
            .await?
            .map(|p| {
                if p.is_expired_at(Utc::now()) {
                    PassportStatus::Expired
                } else {
                    p.status
                }
            });

        Ok(UserDashboard {
            total_donor,
            last_donation,
            total_sertifikat,
            health_passport,
        })
    }

    pub async fn admin_dashboard(&self, actor: &Actor) -> DomainResult<AdminDashboard> {
        actor.ensure_admin()?;
        let today = jakarta_date(Utc::now());
        let stats = self.repos.requests.stats(today).await?;

        Ok(AdminDashboard {
            total_blood_requests: stats.total_requests,
            total_campaigns: stats.total_campaigns,
            total_verified: stats.verified,
            total_pending: stats.pending,
            active_campaigns: stats.active_campaigns,
            total_users: self.repos.users.count().await?,
            total_donation_amount: self
                .repos
                .donations
                .total_amount(PaymentStatus::Success)
                .await?,
        })
    }

    /// Public figures, served from the cache when present
    pub async fn landing_page(&self) -> DomainResult<LandingPage> {
        match self.cache.get(&self.cache_key).await {
            Ok(Some(cached)) => match serde_json::from_str::<LandingPage>(&cached) {
                Ok(page) => return Ok(page),
                Err(e) => tracing::warn!(error = %e, "discarding unreadable landing page cache"),
            },
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "landing page cache read failed"),
        }

        let page = self.compute_landing_page().await?;

        match serde_json::to_string(&page) {
            Ok(json) => {
                if let Err(e) = self.cache.set(&self.cache_key, &json, self.cache_ttl).await {
                    tracing::warn!(error = %e, "landing page cache write failed");
                }
            }
            Err(e) => tracing::warn!(error = %e, "failed to serialize landing page"),
        }
        Ok(page)
    }

    async fn compute_landing_page(&self) -> DomainResult<LandingPage> {
        let today = jakarta_date(Utc::now());
        let stats = self.repos.requests.stats(today).await?;
        let completed = BloodDonationFilter {
            status: Some(BloodDonationStatus::Completed),
            ..Default::default()
        };

        Ok(LandingPage {
            active_campaigns: stats.active_campaigns,
            total_donors: self.repos.blood_donations.count_donors().await?,
            total_completed_donations: self.repos.blood_donations.count(&completed).await?,
            latest_campaigns: self
                .repos
                .requests
                .latest_active_campaigns(today, LANDING_PAGE_CAMPAIGNS)
                .await?,
        })
    }
}
