//! Monetary donation service backed by the payment gateway

mod service;

#[cfg(test)]
mod tests;

pub use service::{DonationService, WebhookNotification};
