//! Request and query DTOs
//!
//! Bodies are validated with `validator` and converted into the service
//! inputs of `dc_core`.

pub mod auth;
pub mod blood_donation;
pub mod blood_request;
pub mod common;
pub mod donation;
pub mod donor_registration;
pub mod donor_schedule;
pub mod hospital;
pub mod notification;
pub mod user;

pub use common::{validated, ImagePayload, StatusUpdate};
