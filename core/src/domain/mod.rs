//! Domain layer containing the passcode entity and its purpose tag.

pub mod entities;

// Re-export commonly used domain types
pub use entities::*;
