//! Shared utilities and common types for the DarahConnect server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Response envelopes and pagination
//! - Small validation helpers (email, blood type, image payloads)

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, BlockchainConfig, CacheConfig, CloudinaryConfig, CorsConfig, DatabaseConfig,
    Environment, GoogleOAuthConfig, JwtConfig, LoggingConfig, MailConfig, MidtransConfig,
    ServerConfig,
};
pub use errors::{error_messages, ErrorResponse};
pub use types::{ApiResponse, PageMeta, PageQuery, Paginated, SortOrder};
pub use utils::validation;
