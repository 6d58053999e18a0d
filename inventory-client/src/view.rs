//! Derived view engine
//!
//! Pure projection of the canonical product set: filter by search text and
//! category, stable-sort by the selected key, and aggregate statistics over
//! the full, unfiltered set.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use shared::models::Product;
use unidecode::unidecode;

/// Column the product table is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Price,
    Stock,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Price => "price",
            SortKey::Stock => "stock",
        }
    }
}

impl FromStr for SortKey {
    type Err = std::convert::Infallible;

    /// Unknown keys fall back to the default ordering by name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "price" => SortKey::Price,
            "stock" => SortKey::Stock,
            _ => SortKey::Name,
        })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category filter: everything, or one category id
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    pub const ALL: &'static str = "all";

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(id) => product.category.id == *id,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value.is_empty() || value == Self::ALL {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(value.to_string())
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(Self::ALL),
            CategoryFilter::Category(id) => f.write_str(id),
        }
    }
}

/// The four inputs a view is a pure function of (besides the products)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub search: String,
    pub category: CategoryFilter,
    pub sort: SortKey,
}

/// Aggregates over the full product set
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InventoryStats {
    pub total: usize,
    pub available: usize,
    pub total_value: f64,
}

impl InventoryStats {
    pub fn compute(products: &[Product]) -> Self {
        Self {
            total: products.len(),
            available: products.iter().filter(|p| p.availability).count(),
            // `Sum for f64` starts from -0.0, which would print as "-0.00"
            total_value: products.iter().fold(0.0, |acc, p| acc + p.price),
        }
    }

    pub fn out_of_stock(&self) -> usize {
        self.total - self.available
    }

    /// Total value rendered to two decimal places
    pub fn formatted_total_value(&self) -> String {
        format!("{:.2}", self.total_value)
    }
}

/// Output of [`compute_view`]
#[derive(Debug, Clone, PartialEq)]
pub struct ProductView<'a> {
    pub visible: Vec<&'a Product>,
    pub stats: InventoryStats,
}

/// Primary collation key: diacritics folded to ASCII, then lowercased
fn name_key(name: &str) -> String {
    unidecode(name).to_lowercase()
}

/// Accent- and case-insensitive name ordering. Names that fold to the same
/// key fall back to their lowercase form, then exact text, so the order
/// stays total.
fn compare_names(a: &str, b: &str) -> Ordering {
    name_key(a)
        .cmp(&name_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

fn compare(sort: SortKey, a: &Product, b: &Product) -> Ordering {
    match sort {
        SortKey::Name => compare_names(&a.name, &b.name),
        SortKey::Price => a.price.total_cmp(&b.price),
        SortKey::Stock => a.stock.cmp(&b.stock),
    }
}

/// Filter, sort and aggregate the product set for display.
pub fn compute_view<'a>(products: &'a [Product], query: &ViewQuery) -> ProductView<'a> {
    let needle = query.search.to_lowercase();

    let mut visible: Vec<&Product> = products
        .iter()
        .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
        .filter(|p| query.category.matches(p))
        .collect();

    // `sort_by` is stable: equal keys keep server order.
    visible.sort_by(|a, b| compare(query.sort, a, b));

    ProductView {
        visible,
        stats: InventoryStats::compute(products),
    }
}
