//! Notification service

mod service;

#[cfg(test)]
mod tests;

pub use service::{NotificationPatch, NotificationService};
