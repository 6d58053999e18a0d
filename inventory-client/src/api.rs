//! Backend seam
//!
//! The dashboard only ever talks to the backend through [`InventoryApi`].
//! [`HttpClient`] is the production implementation; tests plug in an
//! in-memory one.

use async_trait::async_trait;
use shared::models::{Category, CategoryCreate, ProductCreate, ProductUpdate, ServerProduct};

use crate::normalize::parse_records;
use crate::{ClientResult, HttpClient};

#[async_trait]
pub trait InventoryApi: Send + Sync {
    /// `GET products`
    async fn list_products(&self) -> ClientResult<Vec<ServerProduct>>;

    /// `POST products`
    async fn create_product(&self, body: &ProductCreate) -> ClientResult<ServerProduct>;

    /// `PATCH products/{id}`
    async fn update_product(&self, id: &str, updates: &ProductUpdate)
    -> ClientResult<ServerProduct>;

    /// `DELETE products/{id}`
    async fn delete_product(&self, id: &str) -> ClientResult<()>;

    /// `GET categories`
    async fn list_categories(&self) -> ClientResult<Vec<Category>>;

    /// `POST categories`
    async fn create_category(&self, body: &CategoryCreate) -> ClientResult<Category>;
}

#[async_trait]
impl InventoryApi for HttpClient {
    async fn list_products(&self) -> ClientResult<Vec<ServerProduct>> {
        let values: Vec<serde_json::Value> = self.get("products").await?;
        Ok(parse_records(values))
    }

    async fn create_product(&self, body: &ProductCreate) -> ClientResult<ServerProduct> {
        tracing::debug!(name = %body.name, "Sending create product request");
        self.post("products", body).await
    }

    async fn update_product(
        &self,
        id: &str,
        updates: &ProductUpdate,
    ) -> ClientResult<ServerProduct> {
        self.patch(&format!("products/{}", urlencoding::encode(id)), updates).await
    }

    async fn delete_product(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("products/{}", urlencoding::encode(id))).await
    }

    async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        self.get("categories").await
    }

    async fn create_category(&self, body: &CategoryCreate) -> ClientResult<Category> {
        self.post("categories", body).await
    }
}
