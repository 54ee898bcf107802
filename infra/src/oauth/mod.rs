//! OAuth2 login providers

pub mod google;

pub use google::GoogleOAuthProvider;
