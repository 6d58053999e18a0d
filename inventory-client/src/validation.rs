//! Submission gate
//!
//! A create request is only issued for a draft whose report is empty.

use std::fmt;

use shared::models::DraftProduct;

/// Which product-creation flow the draft belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VariantPolicy {
    /// Subcategory and at least one variant are mandatory
    #[default]
    Required,
    /// Only name, price and category are checked
    Optional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Name,
    Price,
    Category,
    Subcategory,
    Variants,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MissingField::Name => "name must not be empty",
            MissingField::Price => "price must be greater than 0",
            MissingField::Category => "a category must be selected",
            MissingField::Subcategory => "a subcategory must be selected",
            MissingField::Variants => "at least one variant is required",
        };
        f.write_str(text)
    }
}

/// Outcome of validating a draft: empty means submittable
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub missing: Vec<MissingField>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn contains(&self, field: MissingField) -> bool {
        self.missing.contains(&field)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.missing.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}")?;
        }
        Ok(())
    }
}

/// Check every submission precondition and report all that fail.
pub fn validate_draft(draft: &DraftProduct, policy: VariantPolicy) -> ValidationReport {
    let mut missing = Vec::new();

    if draft.name.trim().is_empty() {
        missing.push(MissingField::Name);
    }
    if !(draft.price.is_finite() && draft.price > 0.0) {
        missing.push(MissingField::Price);
    }
    if draft.category_id.is_empty() {
        missing.push(MissingField::Category);
    }
    if policy == VariantPolicy::Required {
        if draft.subcategory.is_empty() {
            missing.push(MissingField::Subcategory);
        }
        if draft.variants.is_empty() {
            missing.push(MissingField::Variants);
        }
    }

    ValidationReport { missing }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Variant;

    fn complete_draft() -> DraftProduct {
        DraftProduct {
            name: "Blue Shirt".into(),
            price: 20.0,
            stock: 5,
            category_id: "c1".into(),
            subcategory: "Casual".into(),
            variants: vec![Variant::new("Blue", "data:image/png;base64,AAAA")],
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_draft_is_valid() {
        assert!(validate_draft(&complete_draft(), VariantPolicy::Required).is_valid());
    }

    #[test]
    fn test_empty_draft_reports_everything() {
        let report = validate_draft(&DraftProduct::default(), VariantPolicy::Required);
        assert_eq!(
            report.missing,
            vec![
                MissingField::Name,
                MissingField::Price,
                MissingField::Category,
                MissingField::Subcategory,
                MissingField::Variants,
            ]
        );
    }

    #[test]
    fn test_zero_price_is_rejected() {
        let draft = DraftProduct {
            price: 0.0,
            ..complete_draft()
        };
        let report = validate_draft(&draft, VariantPolicy::Required);
        assert_eq!(report.missing, vec![MissingField::Price]);
    }

    #[test]
    fn test_optional_policy_skips_variant_checks() {
        let draft = DraftProduct {
            subcategory: String::new(),
            variants: Vec::new(),
            ..complete_draft()
        };
        assert!(validate_draft(&draft, VariantPolicy::Optional).is_valid());
        let report = validate_draft(&draft, VariantPolicy::Required);
        assert!(report.contains(MissingField::Subcategory));
        assert!(report.contains(MissingField::Variants));
    }

    #[test]
    fn test_report_display() {
        let report = ValidationReport {
            missing: vec![MissingField::Name, MissingField::Price],
        };
        assert_eq!(
            report.to_string(),
            "name must not be empty; price must be greater than 0"
        );
    }
}
