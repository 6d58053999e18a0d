//! Product Model
//!
//! Three shapes of the same record:
//! - [`ServerProduct`]: whatever the backend sends, parsed leniently
//! - [`Product`]: the canonical in-memory record the views read
//! - [`DraftProduct`]: the client-only record under construction

use serde::{Deserialize, Serialize};

use super::category::CategoryRef;
use super::serde_helpers::{lenient, string_or_default};

/// One purchasable appearance of a product
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    #[serde(default, deserialize_with = "string_or_default")]
    pub color: String,
    /// Data URI or URL
    #[serde(default, deserialize_with = "string_or_default")]
    pub image: String,
}

impl Variant {
    pub fn new(color: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            image: image.into(),
        }
    }

    /// Both halves are required before a variant may join a product
    pub fn is_complete(&self) -> bool {
        !self.color.is_empty() && !self.image.is_empty()
    }
}

// ============ Wire record ============

/// Scalar field that the backend may send as a number, a boolean or text
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Bool(bool),
    Text(String),
    Other(serde_json::Value),
}

impl Scalar {
    /// Parse to a float; text is trimmed before parsing.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => n.as_f64(),
            Scalar::Text(s) => s.trim().parse::<f64>().ok(),
            Scalar::Bool(_) | Scalar::Other(_) => None,
        }
    }

    /// Interpret as a flag: a boolean, or the text `true`/`false`
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(b) => Some(*b),
            Scalar::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Render as an identifier string
    pub fn as_id(&self) -> Option<String> {
        match self {
            Scalar::Number(n) => Some(n.to_string()),
            Scalar::Text(s) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }
}

/// Category reference as sent by the backend: populated object or bare id
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CategoryField {
    Populated {
        #[serde(rename = "_id", default)]
        mongo_id: Option<String>,
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        name: Option<String>,
    },
    Id(String),
    Other(serde_json::Value),
}

/// Product record exactly as the backend returned it
///
/// Every field is optional and a field of the wrong shape reads as absent,
/// so one odd value never costs the whole record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerProduct {
    #[serde(rename = "_id", default)]
    pub mongo_id: Option<Scalar>,
    #[serde(default)]
    pub id: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub sizes: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub variants: Option<Vec<Variant>>,
    #[serde(default)]
    pub price: Option<Scalar>,
    #[serde(default)]
    pub stock: Option<Scalar>,
    #[serde(default)]
    pub availability: Option<Scalar>,
    #[serde(default)]
    pub category_id: Option<CategoryField>,
    #[serde(default, deserialize_with = "lenient")]
    pub subcategory: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub qr_code: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub barcode: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
}

impl ServerProduct {
    /// Server-assigned identifier, preferring `_id` over `id`
    pub fn identifier(&self) -> Option<String> {
        self.mongo_id
            .as_ref()
            .and_then(Scalar::as_id)
            .or_else(|| self.id.as_ref().and_then(Scalar::as_id))
    }
}

// ============ Canonical record ============

/// Canonical product: one shape regardless of wire variance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub sizes: Vec<String>,
    pub variants: Vec<Variant>,
    pub price: f64,
    pub stock: u32,
    pub availability: bool,
    #[serde(rename = "categoryId")]
    pub category: CategoryRef,
    pub subcategory: String,
    pub qr_code: String,
    pub barcode: String,
    pub description: String,
}

impl Product {
    /// Colors of all variants, in order
    pub fn colors(&self) -> Vec<&str> {
        self.variants.iter().map(|v| v.color.as_str()).collect()
    }

    /// Image of the first variant, if any
    pub fn primary_image(&self) -> Option<&str> {
        self.variants
            .first()
            .map(|v| v.image.as_str())
            .filter(|s| !s.is_empty())
    }
}

// ============ Draft & payloads ============

/// Product under construction in the creation form
#[derive(Debug, Clone, PartialEq)]
pub struct DraftProduct {
    pub name: String,
    /// Insertion-ordered, unique
    pub sizes: Vec<String>,
    pub variants: Vec<Variant>,
    pub price: f64,
    pub stock: u32,
    pub availability: bool,
    pub category_id: String,
    pub subcategory: String,
    pub qr_code: String,
    pub barcode: String,
    pub description: String,
}

impl Default for DraftProduct {
    fn default() -> Self {
        Self {
            name: String::new(),
            sizes: Vec::new(),
            variants: Vec::new(),
            price: 0.0,
            stock: 0,
            availability: true,
            category_id: String::new(),
            subcategory: String::new(),
            qr_code: String::new(),
            barcode: String::new(),
            description: String::new(),
        }
    }
}

/// Create product payload (`POST products`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    pub sizes: Vec<String>,
    pub variants: Vec<Variant>,
    pub price: f64,
    pub stock: u32,
    pub availability: bool,
    pub category_id: String,
    pub subcategory: String,
    pub qr_code: String,
    pub barcode: String,
    pub description: String,
}

impl From<&DraftProduct> for ProductCreate {
    fn from(d: &DraftProduct) -> Self {
        Self {
            name: d.name.clone(),
            sizes: d.sizes.clone(),
            variants: d.variants.clone(),
            price: d.price,
            stock: d.stock,
            availability: d.availability,
            category_id: d.category_id.clone(),
            subcategory: d.subcategory.clone(),
            qr_code: d.qr_code.clone(),
            barcode: d.barcode.clone(),
            description: d.description.clone(),
        }
    }
}

/// Update product payload (`PATCH products/{id}`); absent fields are untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<Variant>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProductUpdate {
    pub fn availability(availability: bool) -> Self {
        Self {
            availability: Some(availability),
            ..Default::default()
        }
    }
}
