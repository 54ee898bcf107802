//! Blood donation service

mod service;

#[cfg(test)]
mod tests;

pub use service::{BloodDonationPatch, BloodDonationService, NewBloodDonation};
