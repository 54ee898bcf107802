//! MySQL-specific database implementations
//!
//! This module contains MySQL implementations of the core repository traits
//! using SQLx for database operations.

mod common;

pub mod blood_donation_repository_impl;
pub mod blood_request_repository_impl;
pub mod certificate_repository_impl;
pub mod donation_repository_impl;
pub mod donor_registration_repository_impl;
pub mod donor_schedule_repository_impl;
pub mod health_passport_repository_impl;
pub mod hospital_repository_impl;
pub mod notification_repository_impl;
pub mod user_repository_impl;

// Re-export the MySQL implementations
pub use blood_donation_repository_impl::MySqlBloodDonationRepository;
pub use blood_request_repository_impl::MySqlBloodRequestRepository;
pub use certificate_repository_impl::MySqlCertificateRepository;
pub use donation_repository_impl::MySqlDonationRepository;
pub use donor_registration_repository_impl::MySqlDonorRegistrationRepository;
pub use donor_schedule_repository_impl::MySqlDonorScheduleRepository;
pub use health_passport_repository_impl::MySqlHealthPassportRepository;
pub use hospital_repository_impl::MySqlHospitalRepository;
pub use notification_repository_impl::MySqlNotificationRepository;
pub use user_repository_impl::MySqlUserRepository;
