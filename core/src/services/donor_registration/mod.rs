//! Donor registration service

mod service;

#[cfg(test)]
mod tests;

pub use service::{DonorRegistrationService, NewRegistration, RegistrationPatch};
