//! Business services containing domain logic and use cases.

pub mod blood_donation;
pub mod blood_request;
pub mod certificate;
pub mod dashboard;
pub mod donation;
pub mod donor_registration;
pub mod donor_schedule;
pub mod health_passport;
pub mod hospital;
pub mod integrations;
pub mod notification;
pub mod token;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use blood_donation::{BloodDonationPatch, BloodDonationService, NewBloodDonation};
pub use blood_request::{BloodRequestPatch, BloodRequestService, NewBloodRequest, NewCampaign};
pub use certificate::{CertificateRecipient, CertificateService, CertificateVerification};
pub use dashboard::{DashboardRepositories, DashboardService};
pub use donation::{DonationService, WebhookNotification};
pub use donor_registration::{DonorRegistrationService, NewRegistration, RegistrationPatch};
pub use donor_schedule::{DonorScheduleService, NewSchedule, SchedulePatch};
pub use health_passport::HealthPassportService;
pub use hospital::{HospitalInput, HospitalService};
pub use integrations::{
    CacheService, CertificateMint, CertificateMinter, ImageStorage, ImageUpload, Mailer,
    MintReceipt, OAuthProvider, OAuthUser, PaymentCustomer, PaymentGateway, PaymentSession,
    UploadedImage,
};
pub use notification::{NotificationPatch, NotificationService};
pub use token::TokenService;
pub use user::{ProfileUpdate, RegisterUser, UserService};
