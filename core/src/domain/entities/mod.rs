//! Domain entities representing core business objects.

pub mod blood_donation;
pub mod blood_request;
pub mod certificate;
pub mod donation;
pub mod donor_registration;
pub mod donor_schedule;
pub mod health_passport;
pub mod hospital;
pub mod notification;
pub mod token;
pub mod user;

#[cfg(test)]
mod tests;

pub use blood_donation::{BloodDonation, BloodDonationStatus};
pub use blood_request::{BloodRequest, EventType, RequestStatus, UrgencyLevel};
pub use certificate::Certificate;
pub use donation::{Donation, PaymentStatus, MIN_DONATION_AMOUNT};
pub use donor_registration::{DonorRegistration, RegistrationStatus};
pub use donor_schedule::{DonorSchedule, ScheduleStatus};
pub use health_passport::{HealthPassport, PassportStatus, PASSPORT_VALIDITY_HOURS};
pub use hospital::Hospital;
pub use notification::{Notification, NotificationType};
pub use token::{Claims, LoginToken, ACCESS_TOKEN_EXPIRY_MINUTES, JWT_ISSUER, RESET_ISSUER};
pub use user::{Role, User};
