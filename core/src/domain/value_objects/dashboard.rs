//! Aggregated figures for the dashboards and the public landing page.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{BloodRequest, PassportStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDashboard {
    pub total_donor: u64,
    pub last_donation: Option<NaiveDate>,
    pub total_sertifikat: u64,
    pub health_passport: Option<PassportStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminDashboard {
    pub total_blood_requests: u64,
    pub total_campaigns: u64,
    pub total_verified: u64,
    pub total_pending: u64,
    pub active_campaigns: u64,
    pub total_users: u64,
    pub total_donation_amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandingPage {
    pub active_campaigns: u64,
    pub total_donors: u64,
    pub total_completed_donations: u64,
    pub latest_campaigns: Vec<BloodRequest>,
}

/// Counters for blood requests and campaigns computed by the repository
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestStats {
    pub total_requests: u64,
    pub total_campaigns: u64,
    pub verified: u64,
    pub pending: u64,
    pub active_campaigns: u64,
}
