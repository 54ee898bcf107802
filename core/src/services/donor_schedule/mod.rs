//! Donor schedule service

mod service;


pub use service::{DonorScheduleService, NewSchedule, SchedulePatch};
