//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management
//! - MySQL implementations of every core repository trait

pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
