//! Dashboard aggregates for users, admins and the public landing page

mod service;


pub use service::{DashboardRepositories, DashboardService, LANDING_PAGE_CACHE_KEY};
