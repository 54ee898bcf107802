//! Value objects representing immutable domain concepts.

pub mod actor;
pub mod auth_response;
pub mod dashboard;
pub mod filters;

pub use actor::Actor;
pub use auth_response::LoginResponse;
pub use dashboard::{AdminDashboard, LandingPage, RequestStats, UserDashboard};
pub use filters::{
    BloodDonationFilter, BloodRequestFilter, CertificateFilter, DonationFilter,
    DonorScheduleFilter, NotificationFilter, PassportFilter, RegistrationFilter,
};
