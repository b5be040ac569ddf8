//! Typed actions over the line collection.

use serde::{Deserialize, Serialize};

use draftorder_core::LineId;

use crate::line::{LineType, ProductRef};
use crate::pricing::FieldInput;

/// A single field edit on a line.
///
/// Numeric edits carry the raw input; coercion and clamping happen in the
/// reducer so every input, however malformed, resolves to a consistent line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineEdit {
    /// `None` clears the selection; the line stays a product line either way.
    Product(Option<ProductRef>),
    Text(Option<String>),
    Type(LineType),
    Quantity(FieldInput),
    UnitPrice(FieldInput),
    DiscountPercent(FieldInput),
    DiscountAmount(FieldInput),
    Total(FieldInput),
}

impl LineEdit {
    /// Name of the edited property as the order form knows it.
    pub fn property(&self) -> &'static str {
        match self {
            LineEdit::Product(_) => "product",
            LineEdit::Text(_) => "text",
            LineEdit::Type(_) => "type",
            LineEdit::Quantity(_) => "quantity",
            LineEdit::UnitPrice(_) => "unitPrice",
            LineEdit::DiscountPercent(_) => "discountPercent",
            LineEdit::DiscountAmount(_) => "discountAmount",
            LineEdit::Total(_) => "total",
        }
    }
}

/// Catalog price (`{"value": ..}`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogPrice {
    #[serde(default)]
    pub value: f64,
}

/// Catalog price with its tax-inclusion flag.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxedPrice {
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub includes_tax: bool,
}

/// Product data resolved by the product-lookup collaborator.
///
/// A lookup that failed before reaching the catalog arrives without a SKU and
/// only carries `errors`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedProduct {
    pub sku: Option<String>,
    pub errors: Option<Vec<String>>,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub base_unit_price: CatalogPrice,
    #[serde(default)]
    pub unit_price: TaxedPrice,
    pub name: Option<String>,
    pub purchase_multiple: Option<f64>,
}

impl ResolvedProduct {
    /// Error-only lookup result.
    pub fn failed(errors: Vec<String>) -> Self {
        Self {
            errors: Some(errors),
            ..Self::default()
        }
    }

    /// The SKU, if the lookup actually reached the catalog.
    pub fn sku(&self) -> Option<&str> {
        self.sku.as_deref().filter(|sku| !sku.is_empty())
    }
}

/// Request to transform the line collection.
#[derive(Debug, Clone, PartialEq)]
pub enum LineAction {
    AddLine,
    DeleteLine(LineId),
    UpdateLineFromProduct { id: LineId, product: ResolvedProduct },
    SetLineProperty { id: LineId, edit: LineEdit },
}

impl LineAction {
    /// Stable action tag, as dispatched by the order form.
    pub fn tag(&self) -> &'static str {
        match self {
            LineAction::AddLine => "addLine",
            LineAction::DeleteLine(_) => "deleteLine",
            LineAction::UpdateLineFromProduct { .. } => "updateLineFromProduct",
            LineAction::SetLineProperty { .. } => "setLineProperty",
        }
    }

    /// The line this action targets, if any.
    pub fn line_id(&self) -> Option<&LineId> {
        match self {
            LineAction::AddLine => None,
            LineAction::DeleteLine(id)
            | LineAction::UpdateLineFromProduct { id, .. }
            | LineAction::SetLineProperty { id, .. } => Some(id),
        }
    }

    pub fn set(id: LineId, edit: LineEdit) -> Self {
        LineAction::SetLineProperty { id, edit }
    }
}
