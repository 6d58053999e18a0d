//! Inventory Client - data layer of the inventory dashboard
//!
//! Talks to the inventory REST API, normalizes what it returns, and derives
//! the filtered, sorted and aggregated views the dashboard renders.

pub mod api;
pub mod codes;
pub mod config;
pub mod dashboard;
pub mod editor;
pub mod error;
pub mod http;
pub mod image;
pub mod logger;
pub mod normalize;
pub mod store;
pub mod validation;
pub mod view;

pub use api::InventoryApi;
pub use config::ClientConfig;
pub use dashboard::Dashboard;
pub use editor::{DraftAction, DraftEditor};
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use store::CatalogStore;
pub use validation::{MissingField, ValidationReport, VariantPolicy};
pub use view::{CategoryFilter, InventoryStats, ProductView, SortKey, ViewQuery, compute_view};

// Re-export shared models for convenience
pub use shared::models::{Category, CategoryRef, DraftProduct, Product, Variant};
