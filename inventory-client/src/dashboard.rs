//! Dashboard controller
//!
//! Single owner of everything the inventory screen needs: the catalog store,
//! the draft editor and the current view query.

use chrono::Utc;
use shared::models::{Category, ProductCreate};

use crate::api::InventoryApi;
use crate::codes::generate_codes;
use crate::editor::{DraftAction, DraftEditor};
use crate::store::CatalogStore;
use crate::validation::{VariantPolicy, validate_draft};
use crate::view::{CategoryFilter, ProductView, SortKey, ViewQuery, compute_view};
use crate::{ClientError, ClientResult};

pub struct Dashboard<A> {
    store: CatalogStore<A>,
    editor: DraftEditor,
    query: ViewQuery,
    policy: VariantPolicy,
}

impl<A: InventoryApi> Dashboard<A> {
    pub fn new(api: A) -> Self {
        Self {
            store: CatalogStore::new(api),
            editor: DraftEditor::new(),
            query: ViewQuery::default(),
            policy: VariantPolicy::default(),
        }
    }

    /// Use the simple flow that does not require subcategory or variants
    pub fn with_policy(mut self, policy: VariantPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn store(&self) -> &CatalogStore<A> {
        &self.store
    }

    pub fn editor(&self) -> &DraftEditor {
        &self.editor
    }

    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    /// Initial load of categories and products
    pub async fn load(&mut self) -> ClientResult<()> {
        self.store.refresh().await
    }

    // ========== View ==========

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
    }

    pub fn set_category_filter(&mut self, filter: CategoryFilter) {
        self.query.category = filter;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.query.sort = sort;
    }

    /// Derived view of the current product set under the current query
    pub fn view(&self) -> ProductView<'_> {
        compute_view(self.store.products(), &self.query)
    }

    // ========== Draft ==========

    pub fn edit(&mut self, action: DraftAction) {
        self.editor.apply(action);
    }

    /// Subcategory options for the category currently selected in the draft
    pub fn subcategory_options(&self) -> Vec<&str> {
        self.store
            .category(&self.editor.draft().category_id)
            .map(|c| c.subcategory_names().collect())
            .unwrap_or_default()
    }

    /// Validate and submit the draft.
    ///
    /// Nothing is sent when validation fails. Once the backend accepts the
    /// product the draft is reset and the view query is left as it was; when
    /// the request itself fails the draft is kept so the user can retry.
    pub async fn submit(&mut self) -> ClientResult<Option<String>> {
        let report = validate_draft(self.editor.draft(), self.policy);
        if !report.is_valid() {
            tracing::warn!(%report, "Draft not submitted");
            return Err(ClientError::Rejected(report));
        }

        let mut body = ProductCreate::from(self.editor.draft());
        if body.qr_code.is_empty() || body.barcode.is_empty() {
            let codes = generate_codes(&body.name, Utc::now());
            if body.qr_code.is_empty() {
                body.qr_code = codes.qr_code;
            }
            if body.barcode.is_empty() {
                body.barcode = codes.barcode;
            }
        }

        let id = self.store.create_product(&body).await?;
        self.editor.reset();
        Ok(id)
    }

    // ========== Table actions ==========

    pub async fn toggle_availability(&mut self, id: &str, availability: bool) -> ClientResult<()> {
        self.store.set_availability(id, availability).await
    }

    pub async fn delete(&mut self, id: &str) -> ClientResult<()> {
        self.store.delete_product(id).await
    }

    /// Create a category and select it in the draft
    pub async fn add_category(&mut self, name: &str) -> ClientResult<Option<Category>> {
        let created = self.store.create_category(name).await?;
        if let Some(category) = &created {
            self.editor
                .apply(DraftAction::SetCategory(category.id.clone()));
        }
        Ok(created)
    }
}
