//! Shared types for the inventory dashboard
//!
//! Wire and domain models for products and categories, used by the
//! client crate and by anything else that talks to the same REST API.

pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    Category, CategoryCreate, CategoryField, CategoryRef, DraftProduct, Product, ProductCreate,
    ProductUpdate, Scalar, ServerProduct, Subcategory, Variant,
};
