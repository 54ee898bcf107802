//! User account service: registration, login, email verification, password
//! reset, Google login, profile management and admin user management.

mod service;
mod types;

#[cfg(test)]
mod tests;

pub use service::UserService;
pub use types::{ProfileUpdate, RegisterUser};
