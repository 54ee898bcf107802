//! # DarahConnect Core
//!
//! Core business logic and domain layer for the DarahConnect backend.
//! This crate contains domain entities, business services, repository interfaces,
//! and error types shared by the infrastructure and API layers.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
