//! Data models
//!
//! Shared between the inventory client and anything that talks to the
//! same REST backend. IDs are strings as assigned by the backend.

pub mod category;
pub mod product;
pub mod serde_helpers;

// Re-exports
pub use category::*;
pub use product::*;
