//! Blood request and campaign service

mod service;
mod types;

#[cfg(test)]
mod tests;

pub use service::BloodRequestService;
pub use types::{BloodRequestPatch, NewBloodRequest, NewCampaign};
