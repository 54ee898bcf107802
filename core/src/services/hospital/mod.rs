//! Hospital reference data service

mod service;


pub use service::{HospitalInput, HospitalService};
