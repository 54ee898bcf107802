//! Type definitions module
//!
//! - `pagination` - Query parameters and metadata for list endpoints
//! - `response` - API response envelope

pub mod pagination;
pub mod response;

pub use pagination::{PageMeta, PageQuery, Paginated, SortOrder};
pub use response::ApiResponse;
