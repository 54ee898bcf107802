//! Domain layer containing business entities and value objects.

pub mod entities;
pub mod time;
pub mod value_objects;

// Re-export commonly used domain types
pub use entities::*;
pub use value_objects::*;
