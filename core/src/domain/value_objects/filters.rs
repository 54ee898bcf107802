//! List filters. Each filter is translated into SQL predicates by the MySQL
//! repositories and evaluated with `matches` by the in-memory ones.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::entities::{
    BloodDonation, BloodDonationStatus, BloodRequest, Certificate, Donation, DonorRegistration,
    DonorSchedule, EventType, HealthPassport, Hospital, Notification, NotificationType,
    PassportStatus, PaymentStatus, RegistrationStatus, RequestStatus, ScheduleStatus,
    UrgencyLevel, User,
};

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn eq_opt<T: PartialEq>(filter: &Option<T>, value: &T) -> bool {
    filter.as_ref().map_or(true, |f| f == value)
}

/// Search over user name and email
pub fn user_matches(user: &User, search: Option<&str>) -> bool {
    search.map_or(true, |s| contains(&user.name, s) || contains(&user.email, s))
}

/// Search over hospital name, city and province
pub fn hospital_matches(hospital: &Hospital, search: Option<&str>) -> bool {
    search.map_or(true, |s| {
        contains(&hospital.name, s) || contains(&hospital.city, s) || contains(&hospital.province, s)
    })
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BloodRequestFilter {
    pub user_id: Option<Uuid>,
    pub event_type: Option<EventType>,
    pub status: Option<RequestStatus>,
    pub urgency_level: Option<UrgencyLevel>,
    pub blood_type: Option<String>,
    pub min_quantity: Option<i32>,
    pub max_quantity: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl BloodRequestFilter {
    pub fn campaigns() -> Self {
        Self {
            event_type: Some(EventType::Campaign),
            status: Some(RequestStatus::Verified),
            ..Default::default()
        }
    }

    pub fn for_user(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
            ..Default::default()
        }
    }

    /// Search covers patient and event name in memory; the SQL version also
    /// searches requester and hospital columns.
    pub fn matches(&self, req: &BloodRequest, search: Option<&str>) -> bool {
        eq_opt(&self.user_id, &req.user_id)
            && eq_opt(&self.event_type, &req.event_type)
            && eq_opt(&self.status, &req.status)
            && eq_opt(&self.urgency_level, &req.urgency_level)
            && self
                .blood_type
                .as_ref()
                .map_or(true, |b| b.eq_ignore_ascii_case(&req.blood_type))
            && self.min_quantity.map_or(true, |q| req.quantity >= q)
            && self.max_quantity.map_or(true, |q| req.quantity <= q)
            && self.start_date.map_or(true, |d| req.event_date >= d)
            && self.end_date.map_or(true, |d| req.event_date <= d)
            && search.map_or(true, |s| {
                contains(&req.patient_name, s) || contains(&req.event_name, s)
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DonorScheduleFilter {
    pub hospital_id: Option<Uuid>,
    pub status: Option<ScheduleStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// `true` keeps only schedules with a free slot
    pub slots_available: Option<bool>,
}

impl DonorScheduleFilter {
    pub fn matches(&self, schedule: &DonorSchedule, search: Option<&str>) -> bool {
        eq_opt(&self.hospital_id, &schedule.hospital_id)
            && eq_opt(&self.status, &schedule.status)
            && self.start_date.map_or(true, |d| schedule.event_date >= d)
            && self.end_date.map_or(true, |d| schedule.event_date <= d)
            && self
                .slots_available
                .map_or(true, |free| schedule.has_free_slot() == free)
            && search.map_or(true, |s| contains(&schedule.event_name, s))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationFilter {
    pub user_id: Option<Uuid>,
    pub request_id: Option<Uuid>,
    pub status: Option<RegistrationStatus>,
}

impl RegistrationFilter {
    pub fn matches(&self, reg: &DonorRegistration) -> bool {
        eq_opt(&self.user_id, &reg.user_id)
            && eq_opt(&self.request_id, &reg.request_id)
            && eq_opt(&self.status, &reg.status)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassportFilter {
    pub status: Option<PassportStatus>,
}

impl PassportFilter {
    pub fn matches(&self, passport: &HealthPassport, search: Option<&str>) -> bool {
        eq_opt(&self.status, &passport.status)
            && search.map_or(true, |s| contains(&passport.passport_number, s))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BloodDonationFilter {
    pub user_id: Option<Uuid>,
    pub status: Option<BloodDonationStatus>,
    pub blood_type: Option<String>,
}

impl BloodDonationFilter {
    pub fn matches(&self, donation: &BloodDonation) -> bool {
        eq_opt(&self.user_id, &donation.user_id)
            && eq_opt(&self.status, &donation.status)
            && self
                .blood_type
                .as_ref()
                .map_or(true, |b| b.eq_ignore_ascii_case(&donation.blood_type))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CertificateFilter {
    pub user_id: Option<Uuid>,
}

impl CertificateFilter {
    pub fn matches(&self, cert: &Certificate, search: Option<&str>) -> bool {
        eq_opt(&self.user_id, &cert.user_id)
            && search.map_or(true, |s| contains(&cert.certificate_number, s))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationFilter {
    pub user_id: Option<Uuid>,
    pub unread_only: bool,
    pub notification_type: Option<NotificationType>,
}

impl NotificationFilter {
    pub fn matches(&self, n: &Notification, search: Option<&str>) -> bool {
        eq_opt(&self.user_id, &n.user_id)
            && (!self.unread_only || !n.is_read)
            && eq_opt(&self.notification_type, &n.notification_type)
            && search.map_or(true, |s| contains(&n.title, s) || contains(&n.message, s))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DonationFilter {
    pub user_id: Option<Uuid>,
    pub order_id: Option<String>,
    pub status: Option<PaymentStatus>,
}

impl DonationFilter {
    /// Search on donor name only exists in SQL; in memory it matches the order id
    pub fn matches(&self, d: &Donation, search: Option<&str>) -> bool {
        eq_opt(&self.user_id, &d.user_id)
            && eq_opt(&self.order_id, &d.order_id)
            && eq_opt(&self.status, &d.status)
            && search.map_or(true, |s| contains(&d.order_id, s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(quantity: i32, day: u32) -> BloodRequest {
        BloodRequest::new_request(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "Rina".to_string(),
            "Transfusi".to_string(),
            NaiveDate::from_ymd_opt(2030, 3, day).unwrap(),
            "B+".to_string(),
            quantity,
            UrgencyLevel::Critical,
            String::new(),
            None,
        )
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(BloodRequestFilter::default().matches(&request(1, 1), None));
    }

    #[test]
    fn test_quantity_and_date_bounds() {
        let filter = BloodRequestFilter {
            min_quantity: Some(2),
            max_quantity: Some(4),
            start_date: NaiveDate::from_ymd_opt(2030, 3, 5),
            end_date: NaiveDate::from_ymd_opt(2030, 3, 10),
            ..Default::default()
        };
        assert!(filter.matches(&request(3, 7), None));
        assert!(!filter.matches(&request(1, 7), None));
        assert!(!filter.matches(&request(5, 7), None));
        assert!(!filter.matches(&request(3, 11), None));
    }

    #[test]
    fn test_blood_type_case_insensitive_and_search() {
        let filter = BloodRequestFilter {
            blood_type: Some("b+".to_string()),
            ..Default::default()
        };
        let req = request(1, 1);
        assert!(filter.matches(&req, Some("rin")));
        assert!(!filter.matches(&req, Some("zzz")));
    }

    #[test]
    fn test_campaign_filter() {
        let req = request(1, 1);
        assert!(!BloodRequestFilter::campaigns().matches(&req, None));
    }
}
