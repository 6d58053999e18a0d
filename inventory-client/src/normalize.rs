//! Server record → canonical product
//!
//! This is a display layer, not a validator: malformed values are coerced to
//! safe defaults (price 0, category "Unknown") instead of failing. The only
//! record that cannot be represented is one without an identifier.

use std::collections::HashSet;

use shared::models::{Category, CategoryField, CategoryRef, Product, Scalar, ServerProduct};

/// Find a cached category by id
pub fn lookup_category<'a>(categories: &'a [Category], id: &str) -> Option<&'a Category> {
    categories.iter().find(|c| c.id == id)
}

fn resolve_by_id(categories: &[Category], id: String) -> CategoryRef {
    match lookup_category(categories, &id) {
        Some(cat) => CategoryRef::new(id, cat.name.clone()),
        None => CategoryRef::unknown(id),
    }
}

fn resolve_category(field: Option<CategoryField>, categories: &[Category]) -> CategoryRef {
    match field {
        Some(CategoryField::Populated { mongo_id, id, name }) => {
            let id = mongo_id
                .filter(|id| !id.is_empty())
                .or(id)
                .unwrap_or_default();
            match name.filter(|n| !n.is_empty()) {
                Some(name) => CategoryRef::new(id, name),
                None => resolve_by_id(categories, id),
            }
        }
        Some(CategoryField::Id(id)) => resolve_by_id(categories, id),
        Some(CategoryField::Other(value)) => {
            tracing::warn!(%value, "Unrecognised category reference");
            CategoryRef::unknown("")
        }
        None => CategoryRef::unknown(""),
    }
}

fn coerce_price(id: &str, record: &ServerProduct) -> f64 {
    match record.price.as_ref().and_then(|p| p.as_f64()) {
        Some(price) if price.is_finite() && price >= 0.0 => price,
        _ => {
            if record.price.is_some() {
                tracing::warn!(product_id = %id, price = ?record.price, "Unparseable price, using 0");
            }
            0.0
        }
    }
}

fn coerce_stock(record: &ServerProduct) -> u32 {
    match record.stock.as_ref().and_then(|s| s.as_f64()) {
        Some(stock) if stock.is_finite() && stock >= 0.0 => stock.min(u32::MAX as f64) as u32,
        _ => 0,
    }
}

/// Map one server record into the canonical shape.
///
/// Returns `None` only when the record carries no identifier.
pub fn normalize(record: ServerProduct, categories: &[Category]) -> Option<Product> {
    let Some(id) = record.identifier() else {
        tracing::warn!(name = ?record.name, "Dropping product record without id");
        return None;
    };

    let price = coerce_price(&id, &record);
    let stock = coerce_stock(&record);

    Some(Product {
        category: resolve_category(record.category_id, categories),
        name: record.name.unwrap_or_default(),
        sizes: record.sizes.unwrap_or_default(),
        variants: record.variants.unwrap_or_default(),
        price,
        stock,
        availability: record
            .availability
            .as_ref()
            .and_then(Scalar::as_bool)
            .unwrap_or(false),
        subcategory: record.subcategory.unwrap_or_default(),
        qr_code: record.qr_code.unwrap_or_default(),
        barcode: record.barcode.unwrap_or_default(),
        description: record.description.unwrap_or_default(),
        id,
    })
}

/// Parse raw list entries one by one, skipping entries that are not
/// product records at all.
pub fn parse_records(values: Vec<serde_json::Value>) -> Vec<ServerProduct> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            serde_json::from_value::<ServerProduct>(value)
                .inspect_err(|e| {
                    tracing::warn!(index, error = %e, "Skipping malformed product record");
                })
                .ok()
        })
        .collect()
}

/// Re-resolve "Unknown" category names against a refreshed category cache.
pub fn resolve_unknown_categories(products: &mut [Product], categories: &[Category]) {
    for product in products.iter_mut() {
        if !product.category.is_unknown() || product.category.id.is_empty() {
            continue;
        }
        if let Some(cat) = lookup_category(categories, &product.category.id) {
            product.category.name = cat.name.clone();
        }
    }
}

/// Normalize a full product list, keeping the first record for any repeated id.
pub fn normalize_all(records: Vec<ServerProduct>, categories: &[Category]) -> Vec<Product> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter_map(|r| normalize(r, categories))
        .filter(|p| {
            let fresh = seen.insert(p.id.clone());
            if !fresh {
                tracing::warn!(product_id = %p.id, "Duplicate product id in server response");
            }
            fresh
        })
        .collect()
}
