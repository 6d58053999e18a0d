// inventory-client/tests/dashboard_flow.rs
// End-to-end flows against an in-memory backend

use std::sync::Mutex;

use async_trait::async_trait;
use inventory_client::{
    CategoryFilter, CategoryRef, ClientError, ClientResult, Dashboard, DraftAction, InventoryApi,
    MissingField, SortKey, VariantPolicy,
};
use inventory_client::normalize::parse_records;
use shared::models::{Category, CategoryCreate, ProductCreate, ProductUpdate, ServerProduct};

/// Mimics the REST backend: Mongo-style `_id`, prices stored as text,
/// category stored as a bare id.
#[derive(Default)]
struct MemoryBackend {
    products: Mutex<Vec<serde_json::Value>>,
    categories: Mutex<Vec<Category>>,
    requests: Mutex<Vec<String>>,
    next_id: Mutex<u32>,
    fail_writes: Mutex<bool>,
}

impl MemoryBackend {
    fn with_categories(categories: Vec<Category>) -> Self {
        let backend = Self::default();
        *backend.categories.lock().unwrap() = categories;
        backend
    }

    fn seed(&self, record: serde_json::Value) {
        self.products.lock().unwrap().push(record);
    }

    fn record(&self, request: impl Into<String>) {
        self.requests.lock().unwrap().push(request.into());
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn writes(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|r| !r.starts_with("GET"))
            .collect()
    }

    fn next_id(&self, prefix: &str) -> String {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        format!("{prefix}{next}")
    }

    fn check_writable(&self) -> ClientResult<()> {
        if *self.fail_writes.lock().unwrap() {
            return Err(ClientError::Api {
                status: 500,
                body: "write failed".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl InventoryApi for MemoryBackend {
    async fn list_products(&self) -> ClientResult<Vec<ServerProduct>> {
        self.record("GET products");
        let records = self.products.lock().unwrap().clone();
        Ok(parse_records(records))
    }

    async fn create_product(&self, body: &ProductCreate) -> ClientResult<ServerProduct> {
        self.record("POST products");
        self.check_writable()?;
        let mut record = serde_json::to_value(body)?;
        record["_id"] = serde_json::json!(self.next_id("p"));
        record["price"] = serde_json::json!(body.price.to_string());
        self.products.lock().unwrap().push(record.clone());
        Ok(serde_json::from_value(record)?)
    }

    async fn update_product(
        &self,
        id: &str,
        updates: &ProductUpdate,
    ) -> ClientResult<ServerProduct> {
        self.record(format!("PATCH products/{id}"));
        self.check_writable()?;
        let mut products = self.products.lock().unwrap();
        let record = products
            .iter_mut()
            .find(|r| r["_id"] == id)
            .ok_or_else(|| ClientError::NotFound(id.to_string()))?;
        if let serde_json::Value::Object(patch) = serde_json::to_value(updates)? {
            for (key, value) in patch {
                record[key] = value;
            }
        }
        Ok(serde_json::from_value(record.clone())?)
    }

    async fn delete_product(&self, id: &str) -> ClientResult<()> {
        self.record(format!("DELETE products/{id}"));
        self.check_writable()?;
        self.products.lock().unwrap().retain(|r| r["_id"] != id);
        Ok(())
    }

    async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        self.record("GET categories");
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn create_category(&self, body: &CategoryCreate) -> ClientResult<Category> {
        self.record("POST categories");
        self.check_writable()?;
        let category = Category::new(self.next_id("cat"), body.name.clone());
        self.categories.lock().unwrap().push(category.clone());
        Ok(category)
    }
}

fn shirts() -> Category {
    Category::new("c1", "Shirts").with_subcategory("Casual")
}

fn fill_blue_shirt<A: InventoryApi>(dashboard: &mut Dashboard<A>) {
    dashboard.edit(DraftAction::SetName("Blue Shirt".into()));
    dashboard.edit(DraftAction::SetPrice(20.0));
    dashboard.edit(DraftAction::SetStock(5));
    dashboard.edit(DraftAction::SetCategory("c1".into()));
    dashboard.edit(DraftAction::SetSubcategory("Casual".into()));
    dashboard.edit(DraftAction::SetPendingColor("Blue".into()));
    dashboard.edit(DraftAction::SetPendingImage("data:image/png;base64,AAAA".into()));
    dashboard.edit(DraftAction::AddVariant);
}

#[tokio::test]
async fn test_submit_creates_exactly_one_product() {
    let mut dashboard = Dashboard::new(MemoryBackend::with_categories(vec![shirts()]));
    dashboard.load().await.unwrap();
    fill_blue_shirt(&mut dashboard);

    let id = dashboard.submit().await.unwrap();
    assert_eq!(id.as_deref(), Some("p1"));

    let backend = dashboard.store().api();
    assert_eq!(backend.writes(), vec!["POST products"]);

    let products = dashboard.store().products();
    assert_eq!(products.len(), 1);
    let product = &products[0];
    assert_eq!(product.category, CategoryRef::new("c1", "Shirts"));
    assert_eq!(product.price, 20.0);
    assert_eq!(product.stock, 5);
    assert!(product.qr_code.starts_with("QR-BLUESHIRT-"));
    assert!(product.barcode.chars().all(|c| c.is_ascii_digit()));

    // Draft is reset after a successful submission
    assert!(dashboard.editor().draft().name.is_empty());
    assert!(dashboard.editor().draft().variants.is_empty());
}

#[tokio::test]
async fn test_invalid_draft_sends_nothing() {
    let mut dashboard = Dashboard::new(MemoryBackend::with_categories(vec![shirts()]));
    dashboard.load().await.unwrap();
    dashboard.edit(DraftAction::SetName("Blue Shirt".into()));
    dashboard.edit(DraftAction::SetPrice(20.0));
    dashboard.edit(DraftAction::SetCategory("c1".into()));

    match dashboard.submit().await {
        Err(ClientError::Rejected(report)) => {
            assert!(report.contains(MissingField::Subcategory));
            assert!(report.contains(MissingField::Variants));
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert!(dashboard.store().api().writes().is_empty());
    assert_eq!(dashboard.editor().draft().name, "Blue Shirt");
}

#[tokio::test]
async fn test_simple_flow_does_not_need_variants() {
    let backend = MemoryBackend::with_categories(vec![shirts()]);
    let mut dashboard = Dashboard::new(backend).with_policy(VariantPolicy::Optional);
    dashboard.load().await.unwrap();
    dashboard.edit(DraftAction::SetName("Plain Tee".into()));
    dashboard.edit(DraftAction::SetPrice(9.5));
    dashboard.edit(DraftAction::SetCategory("c1".into()));

    dashboard.submit().await.unwrap();
    assert_eq!(dashboard.store().products().len(), 1);
}

#[tokio::test]
async fn test_supplied_codes_are_kept() {
    let mut dashboard = Dashboard::new(MemoryBackend::with_categories(vec![shirts()]));
    dashboard.load().await.unwrap();
    fill_blue_shirt(&mut dashboard);
    dashboard.edit(DraftAction::SetQrCode("QR-CUSTOM".into()));
    dashboard.edit(DraftAction::SetBarcode("0001".into()));

    dashboard.submit().await.unwrap();
    let product = &dashboard.store().products()[0];
    assert_eq!(product.qr_code, "QR-CUSTOM");
    assert_eq!(product.barcode, "0001");
}

#[tokio::test]
async fn test_failed_create_keeps_draft_and_cache() {
    let backend = MemoryBackend::with_categories(vec![shirts()]);
    *backend.fail_writes.lock().unwrap() = true;
    let mut dashboard = Dashboard::new(backend);
    dashboard.load().await.unwrap();
    fill_blue_shirt(&mut dashboard);

    assert!(dashboard.submit().await.is_err());
    assert!(dashboard.store().products().is_empty());
    assert_eq!(dashboard.editor().draft().name, "Blue Shirt");
    assert_eq!(dashboard.editor().draft().variants.len(), 1);
}

#[tokio::test]
async fn test_filters_survive_submission() {
    let mut dashboard = Dashboard::new(MemoryBackend::with_categories(vec![shirts()]));
    dashboard.load().await.unwrap();
    dashboard.set_search("shirt");
    dashboard.set_sort(SortKey::Price);
    fill_blue_shirt(&mut dashboard);

    dashboard.submit().await.unwrap();
    assert_eq!(dashboard.query().search, "shirt");
    assert_eq!(dashboard.query().sort, SortKey::Price);
    assert_eq!(dashboard.view().visible.len(), 1);
}

#[tokio::test]
async fn test_toggle_and_delete_refetch_from_backend() {
    let backend = MemoryBackend::with_categories(vec![shirts()]);
    backend.seed(serde_json::json!({
        "_id": "a", "name": "Blue Shirt", "price": "20", "categoryId": "c1", "availability": false
    }));
    backend.seed(serde_json::json!({
        "_id": "b", "name": "Red Dress", "price": 50, "categoryId": "c2", "availability": true
    }));
    let mut dashboard = Dashboard::new(backend);
    dashboard.load().await.unwrap();
    assert_eq!(dashboard.view().stats.available, 1);

    dashboard.toggle_availability("a", true).await.unwrap();
    assert!(dashboard.store().product("a").unwrap().availability);
    assert_eq!(dashboard.view().stats.available, 2);

    dashboard.delete("b").await.unwrap();
    assert!(dashboard.store().product("b").is_none());
    assert_eq!(dashboard.view().stats.total, 1);

    let requests = dashboard.store().api().requests();
    let tail: Vec<&str> = requests.iter().rev().take(4).map(String::as_str).collect();
    assert_eq!(
        tail,
        vec!["GET products", "DELETE products/b", "GET products", "PATCH products/a"]
    );
}

#[tokio::test]
async fn test_failed_toggle_changes_nothing() {
    let backend = MemoryBackend::with_categories(vec![shirts()]);
    backend.seed(serde_json::json!({ "_id": "a", "name": "Hat", "price": 5, "availability": false }));
    *backend.fail_writes.lock().unwrap() = true;
    let mut dashboard = Dashboard::new(backend);
    dashboard.load().await.unwrap();

    assert!(dashboard.toggle_availability("a", true).await.is_err());
    assert!(!dashboard.store().product("a").unwrap().availability);
}

#[tokio::test]
async fn test_category_filter_and_stats() {
    let backend = MemoryBackend::with_categories(vec![shirts(), Category::new("c2", "Dresses")]);
    backend.seed(serde_json::json!({ "_id": "1", "name": "Blue Shirt", "price": "20", "categoryId": "c1", "availability": true }));
    backend.seed(serde_json::json!({ "_id": "2", "name": "Red Dress", "price": "50.5", "categoryId": { "_id": "c2", "name": "Dresses" } }));
    backend.seed(serde_json::json!({ "_id": "3", "name": "Green Shirt", "price": "oops", "categoryId": "c9", "availability": true }));
    let mut dashboard = Dashboard::new(backend);
    dashboard.load().await.unwrap();

    dashboard.set_category_filter(CategoryFilter::from("c1"));
    let view = dashboard.view();
    assert_eq!(view.visible.len(), 1);
    assert_eq!(view.visible[0].id, "1");
    assert_eq!(view.stats.total, 3);
    assert_eq!(view.stats.available, 2);
    assert_eq!(view.stats.formatted_total_value(), "70.50");

    dashboard.set_category_filter(CategoryFilter::All);
    assert_eq!(dashboard.view().visible.len(), 3);
    assert!(dashboard.store().product("3").unwrap().category.is_unknown());
}

#[tokio::test]
async fn test_add_category_selects_it() {
    let mut dashboard = Dashboard::new(MemoryBackend::with_categories(vec![shirts()]));
    dashboard.load().await.unwrap();

    let created = dashboard.add_category("Hats").await.unwrap().unwrap();
    assert_eq!(dashboard.store().categories().len(), 2);
    assert_eq!(dashboard.editor().draft().category_id, created.id);
    assert!(dashboard.subcategory_options().is_empty());

    dashboard.edit(DraftAction::SetCategory("c1".into()));
    assert_eq!(dashboard.subcategory_options(), vec!["Casual"]);
}
