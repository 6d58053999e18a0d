//! Catalog store
//!
//! Owns the category cache and the canonical product set. Both are only ever
//! replaced wholesale from a backend response: every mutation is sent to the
//! backend first and the affected list is refetched afterwards, so the cache
//! never diverges from server state through local edits. A failed request
//! leaves both lists untouched. When a mutation succeeds but the refetch
//! after it fails, the mutation is still reported as done and the product
//! set is flagged stale until the next successful fetch.

use chrono::{DateTime, Utc};
use shared::models::{Category, CategoryCreate, Product, ProductCreate, ProductUpdate};

use crate::api::InventoryApi;
use crate::normalize::{lookup_category, normalize_all, resolve_unknown_categories};
use crate::{ClientError, ClientResult};

pub struct CatalogStore<A> {
    api: A,
    categories: Vec<Category>,
    products: Vec<Product>,
    last_updated: Option<DateTime<Utc>>,
    stale: bool,
}

impl<A: InventoryApi> CatalogStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            categories: Vec::new(),
            products: Vec::new(),
            last_updated: None,
            stale: false,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        lookup_category(&self.categories, id)
    }

    /// When the product set was last replaced from the backend
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Whether a mutation went through without the product list being refetched
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    // ========== Fetch-replace ==========

    /// Replace the category cache from `GET categories`.
    ///
    /// Cached products still showing "Unknown" pick up names the new cache
    /// now knows.
    pub async fn refresh_categories(&mut self) -> ClientResult<()> {
        let categories = self.api.list_categories().await.inspect_err(|e| {
            tracing::error!(error = %e, "Error fetching categories");
        })?;
        tracing::debug!(count = categories.len(), "Categories refreshed");
        self.categories = categories;
        resolve_unknown_categories(&mut self.products, &self.categories);
        Ok(())
    }

    /// Replace the product set from `GET products`
    pub async fn refresh_products(&mut self) -> ClientResult<()> {
        let records = self.api.list_products().await.inspect_err(|e| {
            tracing::error!(error = %e, "Error fetching products");
        })?;
        let fetched = records.len();
        self.products = normalize_all(records, &self.categories);
        self.last_updated = Some(Utc::now());
        self.stale = false;
        tracing::debug!(fetched, kept = self.products.len(), "Products refreshed");
        Ok(())
    }

    /// Refresh categories, then products so names resolve against fresh data.
    ///
    /// Products are fetched even when categories fail; they show "Unknown"
    /// and the category error is returned once the product set is in.
    pub async fn refresh(&mut self) -> ClientResult<()> {
        let categories = self.refresh_categories().await;
        self.refresh_products().await?;
        categories
    }

    // ========== Mutations (round-trip, then refetch) ==========

    async fn refetch_after_mutation(&mut self) {
        if let Err(e) = self.refresh_products().await {
            tracing::warn!(error = %e, "Product list not refreshed after mutation");
            self.stale = true;
        }
    }

    /// `POST products`, then refetch the product list.
    ///
    /// Returns the id the backend assigned, when it reported one.
    pub async fn create_product(&mut self, body: &ProductCreate) -> ClientResult<Option<String>> {
        let created = self.api.create_product(body).await.inspect_err(|e| {
            tracing::error!(error = %e, name = %body.name, "Error creating product");
        })?;
        let id = created.identifier();
        tracing::info!(product_id = ?id, name = %body.name, "Product created");
        self.refetch_after_mutation().await;
        Ok(id)
    }

    /// `PATCH products/{id}` with a partial update, then refetch.
    pub async fn update_product(&mut self, id: &str, updates: &ProductUpdate) -> ClientResult<()> {
        self.api
            .update_product(id, updates)
            .await
            .inspect_err(|e| {
                tracing::error!(error = %e, product_id = %id, "Error updating product");
            })?;
        tracing::info!(product_id = %id, "Product updated");
        self.refetch_after_mutation().await;
        Ok(())
    }

    /// Toggle availability through the backend, then refetch.
    pub async fn set_availability(&mut self, id: &str, availability: bool) -> ClientResult<()> {
        self.update_product(id, &ProductUpdate::availability(availability))
            .await
    }

    /// `DELETE products/{id}`, then refetch.
    pub async fn delete_product(&mut self, id: &str) -> ClientResult<()> {
        self.api.delete_product(id).await.inspect_err(|e| {
            tracing::error!(error = %e, product_id = %id, "Error deleting product");
        })?;
        tracing::info!(product_id = %id, "Product deleted");
        self.refetch_after_mutation().await;
        Ok(())
    }

    /// `POST categories`, then refetch the category list.
    ///
    /// A blank name is ignored and yields `Ok(None)`.
    pub async fn create_category(&mut self, name: &str) -> ClientResult<Option<Category>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        let body = CategoryCreate {
            name: name.to_string(),
        };
        let created = self.api.create_category(&body).await.inspect_err(|e| {
            tracing::error!(error = %e, %name, "Failed to create category");
        })?;
        if created.id.is_empty() {
            tracing::error!(%name, "New category data is invalid");
            return Err(ClientError::InvalidResponse(
                "created category has no id".to_string(),
            ));
        }
        tracing::info!(category_id = %created.id, %name, "Category created");
        if let Err(e) = self.refresh_categories().await {
            tracing::warn!(error = %e, "Category list not refreshed after creation");
        }
        Ok(Some(created))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::parse_records;
    use async_trait::async_trait;
    use shared::models::ServerProduct;
    use std::sync::Mutex;

    /// Backend that serves fixed lists and fails every mutation
    struct ReadOnlyApi {
        products: Vec<serde_json::Value>,
        fail_reads: Mutex<bool>,
        fail_categories: Mutex<bool>,
    }

    impl ReadOnlyApi {
        fn new(products: Vec<serde_json::Value>) -> Self {
            Self {
                products,
                fail_reads: Mutex::new(false),
                fail_categories: Mutex::new(false),
            }
        }

        fn down() -> ClientError {
            ClientError::Api {
                status: 503,
                body: "down".into(),
            }
        }
    }

    #[async_trait]
    impl InventoryApi for ReadOnlyApi {
        async fn list_products(&self) -> ClientResult<Vec<ServerProduct>> {
            if *self.fail_reads.lock().unwrap() {
                return Err(Self::down());
            }
            Ok(parse_records(self.products.clone()))
        }

        async fn create_product(&self, _body: &ProductCreate) -> ClientResult<ServerProduct> {
            Err(Self::down())
        }

        async fn update_product(
            &self,
            _id: &str,
            _updates: &ProductUpdate,
        ) -> ClientResult<ServerProduct> {
            Err(Self::down())
        }

        async fn delete_product(&self, _id: &str) -> ClientResult<()> {
            Err(Self::down())
        }

        async fn list_categories(&self) -> ClientResult<Vec<Category>> {
            if *self.fail_categories.lock().unwrap() {
                return Err(Self::down());
            }
            Ok(vec![Category::new("c1", "Shirts")])
        }

        async fn create_category(&self, _body: &CategoryCreate) -> ClientResult<Category> {
            Err(Self::down())
        }
    }

    fn api() -> ReadOnlyApi {
        ReadOnlyApi::new(vec![
            serde_json::json!({ "_id": "p1", "name": "Blue Shirt", "price": "20", "categoryId": "c1", "availability": true }),
            serde_json::json!({ "_id": "p2", "name": "Red Dress", "price": 50, "categoryId": "c2" }),
        ])
    }

    #[tokio::test]
    async fn test_refresh_resolves_categories() {
        let mut store = CatalogStore::new(api());
        assert!(store.last_updated().is_none());

        store.refresh().await.unwrap();
        assert_eq!(store.products().len(), 2);
        assert_eq!(store.product("p1").unwrap().category.name, "Shirts");
        assert!(store.product("p2").unwrap().category.is_unknown());
        assert!(store.last_updated().is_some());
    }

    #[tokio::test]
    async fn test_failed_mutations_leave_cache_untouched() {
        let mut store = CatalogStore::new(api());
        store.refresh().await.unwrap();
        let before = store.products().to_vec();

        assert!(store.delete_product("p1").await.is_err());
        assert!(store.set_availability("p2", true).await.is_err());
        assert!(store.create_category("Hats").await.is_err());

        assert_eq!(store.products(), before.as_slice());
        assert_eq!(store.categories().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_products() {
        let mut store = CatalogStore::new(api());
        store.refresh().await.unwrap();
        let stamp = store.last_updated();

        *store.api().fail_reads.lock().unwrap() = true;
        assert!(store.refresh_products().await.is_err());
        assert_eq!(store.products().len(), 2);
        assert_eq!(store.last_updated(), stamp);
    }

    #[tokio::test]
    async fn test_products_load_when_categories_fail() {
        let api = api();
        *api.fail_categories.lock().unwrap() = true;
        let mut store = CatalogStore::new(api);

        assert!(store.refresh().await.is_err());
        assert_eq!(store.products().len(), 2);
        assert!(store.products().iter().all(|p| p.category.is_unknown()));
        assert!(store.last_updated().is_some());

        *store.api().fail_categories.lock().unwrap() = false;
        store.refresh_categories().await.unwrap();
        assert_eq!(store.product("p1").unwrap().category.name, "Shirts");
        assert!(store.product("p2").unwrap().category.is_unknown());
    }

    #[tokio::test]
    async fn test_malformed_record_keeps_the_rest() {
        let mut store = CatalogStore::new(ReadOnlyApi::new(vec![
            serde_json::json!({ "_id": "p1", "name": "Blue Shirt", "price": 20 }),
            serde_json::json!({ "_id": "p2", "name": 42, "availability": "true" }),
            serde_json::json!("not a record"),
        ]));
        store.refresh().await.unwrap();
        assert_eq!(store.products().len(), 2);
        assert!(store.product("p2").unwrap().availability);
    }

    #[tokio::test]
    async fn test_blank_category_name_is_ignored() {
        let mut store = CatalogStore::new(api());
        assert!(store.create_category("   ").await.unwrap().is_none());
    }
}
