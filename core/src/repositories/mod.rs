//! Repository traits and their in-memory implementations.
//!
//! MySQL implementations live in `dc_infra::database::mysql`.

pub mod blood_donation;
pub mod blood_request;
pub mod certificate;
pub mod donation;
pub mod donor_registration;
pub mod donor_schedule;
pub mod health_passport;
pub mod hospital;
pub mod notification;
pub mod user;

pub use blood_donation::{BloodDonationRepository, MockBloodDonationRepository};
pub use blood_request::{BloodRequestRepository, MockBloodRequestRepository};
pub use certificate::{CertificateRepository, MockCertificateRepository};
pub use donation::{DonationRepository, MockDonationRepository};
pub use donor_registration::{DonorRegistrationRepository, MockDonorRegistrationRepository};
pub use donor_schedule::{DonorScheduleRepository, MockDonorScheduleRepository};
pub use health_passport::{HealthPassportRepository, MockHealthPassportRepository};
pub use hospital::{HospitalRepository, MockHospitalRepository};
pub use notification::{MockNotificationRepository, NotificationRepository};
pub use user::{MockUserRepository, UserRepository};

use chrono::{DateTime, Utc};
use dc_shared::{PageQuery, Paginated, SortOrder};

/// Sort an in-memory result set by creation time and cut the requested page
pub(crate) fn sort_page<T, F>(mut items: Vec<T>, query: &PageQuery, created_at: F) -> Paginated<T>
where
    F: Fn(&T) -> DateTime<Utc>,
{
    items.sort_by_key(|item| created_at(item));
    if query.order == SortOrder::Desc {
        items.reverse();
    }
    Paginated::from_vec(items, query)
}
