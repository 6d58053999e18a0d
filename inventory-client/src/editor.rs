//! Draft editor
//!
//! Holds the not-yet-submitted product together with the pending variant
//! and size inputs. Every form edit is a [`DraftAction`] applied through
//! [`DraftEditor::apply`].

use shared::models::{DraftProduct, Variant};

/// Size options offered by the creation form
pub const STANDARD_SIZES: [&str; 6] = ["XS", "S", "M", "L", "XL", "XXL"];

/// One edit to the draft
#[derive(Debug, Clone, PartialEq)]
pub enum DraftAction {
    SetName(String),
    SetPrice(f64),
    SetStock(u32),
    SetAvailability(bool),
    /// Selecting a different category clears the subcategory
    SetCategory(String),
    SetSubcategory(String),
    SetQrCode(String),
    SetBarcode(String),
    SetDescription(String),
    SetPendingColor(String),
    SetPendingImage(String),
    /// Commit the pending variant if both fields are set
    AddVariant,
    RemoveVariant(usize),
    SetPendingSize(String),
    /// Commit the pending size if non-empty and not yet present
    AddSize,
    RemoveSize(usize),
    Reset,
}

/// Parse a price text input: invalid, non-finite or negative input becomes 0.
pub fn parse_price_input(input: &str) -> f64 {
    match input.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

/// Parse a stock text input: invalid or negative input becomes 0.
pub fn parse_stock_input(input: &str) -> u32 {
    let trimmed = input.trim();
    if let Ok(v) = trimmed.parse::<u32>() {
        return v;
    }
    // Tolerate "12.5" the way an integer text field would: keep the integer part.
    trimmed
        .split('.')
        .next()
        .and_then(|int| int.parse::<u32>().ok())
        .unwrap_or(0)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftEditor {
    draft: DraftProduct,
    pending_variant: Variant,
    pending_size: String,
}

impl DraftEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &DraftProduct {
        &self.draft
    }

    pub fn pending_variant(&self) -> &Variant {
        &self.pending_variant
    }

    pub fn pending_size(&self) -> &str {
        &self.pending_size
    }

    /// Apply one edit
    pub fn apply(&mut self, action: DraftAction) {
        match action {
            DraftAction::SetName(name) => self.draft.name = name,
            DraftAction::SetPrice(price) => {
                self.draft.price = if price.is_finite() && price > 0.0 {
                    price
                } else {
                    0.0
                }
            }
            DraftAction::SetStock(stock) => self.draft.stock = stock,
            DraftAction::SetAvailability(a) => self.draft.availability = a,
            DraftAction::SetCategory(id) => {
                if self.draft.category_id != id {
                    self.draft.subcategory.clear();
                }
                self.draft.category_id = id;
            }
            DraftAction::SetSubcategory(sub) => self.draft.subcategory = sub,
            DraftAction::SetQrCode(code) => self.draft.qr_code = code,
            DraftAction::SetBarcode(code) => self.draft.barcode = code,
            DraftAction::SetDescription(text) => self.draft.description = text,
            DraftAction::SetPendingColor(color) => self.pending_variant.color = color,
            DraftAction::SetPendingImage(image) => self.pending_variant.image = image,
            DraftAction::AddVariant => self.add_variant(),
            DraftAction::RemoveVariant(index) => self.remove_variant(index),
            DraftAction::SetPendingSize(label) => self.pending_size = label,
            DraftAction::AddSize => {
                let label = std::mem::take(&mut self.pending_size);
                if !self.add_size(&label) {
                    self.pending_size = label;
                }
            }
            DraftAction::RemoveSize(index) => self.remove_size(index),
            DraftAction::Reset => self.reset(),
        }
    }

    /// Append the pending variant iff both color and image are set.
    pub fn add_variant(&mut self) {
        if !self.pending_variant.is_complete() {
            tracing::debug!("Ignoring incomplete variant");
            return;
        }
        let variant = std::mem::take(&mut self.pending_variant);
        self.draft.variants.push(variant);
    }

    /// Remove the variant at `index`; out of range is a no-op.
    pub fn remove_variant(&mut self, index: usize) {
        if index < self.draft.variants.len() {
            self.draft.variants.remove(index);
        }
    }

    /// Append `label` iff non-empty and not already present (case-sensitive).
    ///
    /// Returns whether the size was added.
    pub fn add_size(&mut self, label: &str) -> bool {
        if label.is_empty() || self.draft.sizes.iter().any(|s| s == label) {
            return false;
        }
        self.draft.sizes.push(label.to_string());
        true
    }

    /// Remove the size at `index`; out of range is a no-op.
    pub fn remove_size(&mut self, index: usize) {
        if index < self.draft.sizes.len() {
            self.draft.sizes.remove(index);
        }
    }

    /// Back to the empty initial state
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
