//! Token service module for JWT management
//!
//! Issues and verifies HS256 login tokens and reset-password tokens.

mod service;


pub use service::TokenService;
