//! Category Model

use serde::{Deserialize, Serialize};

/// Category entity with its nested subcategories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CategoryRecord")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub subcategories: Vec<Subcategory>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            subcategories: Vec::new(),
        }
    }

    pub fn with_subcategory(mut self, name: impl Into<String>) -> Self {
        self.subcategories.push(Subcategory { name: name.into() });
        self
    }

    /// Subcategory labels in server order
    pub fn subcategory_names(&self) -> impl Iterator<Item = &str> {
        self.subcategories.iter().map(|s| s.name.as_str())
    }

    pub fn has_subcategory(&self, name: &str) -> bool {
        self.subcategories.iter().any(|s| s.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    #[serde(default)]
    pub name: String,
}

/// Wire shape of a category: the backend may send `_id`, `id`, or both.
#[derive(Debug, Deserialize)]
struct CategoryRecord {
    #[serde(rename = "_id", default)]
    mongo_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    subcategories: Vec<Subcategory>,
}

impl From<CategoryRecord> for Category {
    fn from(r: CategoryRecord) -> Self {
        let id = r
            .mongo_id
            .filter(|id| !id.is_empty())
            .or(r.id)
            .unwrap_or_default();
        Self {
            id,
            name: r.name,
            subcategories: r.subcategories,
        }
    }
}

/// Resolved category reference carried by a canonical product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: String,
    pub name: String,
}

impl CategoryRef {
    pub const UNKNOWN_NAME: &'static str = "Unknown";

    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    pub fn unknown(id: impl Into<String>) -> Self {
        Self::new(id, Self::UNKNOWN_NAME)
    }

    pub fn is_unknown(&self) -> bool {
        self.name == Self::UNKNOWN_NAME
    }
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_accepts_mongo_id() {
        let json = r#"{"_id":"c1","name":"Shirts","subcategories":[{"name":"Casual"}]}"#;
        let cat: Category = serde_json::from_str(json).unwrap();
        assert_eq!(cat.id, "c1");
        assert_eq!(cat.name, "Shirts");
        assert!(cat.has_subcategory("Casual"));
    }

    #[test]
    fn test_category_accepts_both_id_fields() {
        let json = r#"{"_id":"c1","id":"c1","name":"Shirts"}"#;
        let cat: Category = serde_json::from_str(json).unwrap();
        assert_eq!(cat.id, "c1");
        assert!(cat.subcategories.is_empty());
    }

    #[test]
    fn test_category_plain_id() {
        let cat: Category = serde_json::from_str(r#"{"id":"c2","name":"Dresses"}"#).unwrap();
        assert_eq!(cat.id, "c2");
    }
}
