//! Cross-cutting handler pieces: error mapping, response envelopes and
//! the health probe.

pub mod error;
pub mod health;
pub mod response;

pub use error::ApiError;
pub use response::ApiResult;
