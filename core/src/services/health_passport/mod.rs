//! Health passport service

mod service;


pub use service::HealthPassportService;
