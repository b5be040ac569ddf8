//! Line entity model: the draft-order line and the ordered line collection.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use draftorder_core::{DomainError, DomainResult, Entity, LineId};

use crate::pricing::{DiscountPercent, PricingUpdate};

/// What a line charges for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    #[default]
    Product,
    Other,
    Text,
}

impl LineType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineType::Product => "product",
            LineType::Other => "other",
            LineType::Text => "text",
        }
    }
}

impl core::fmt::Display for LineType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LineType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "product" => Ok(LineType::Product),
            "other" => Ok(LineType::Other),
            "text" => Ok(LineType::Text),
            other => Err(DomainError::validation(format!("unknown line type: {other}"))),
        }
    }
}

/// Reference to catalog data, owned by the product-lookup collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductRef(pub serde_json::Value);

/// One priced entry in a draft order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: LineId,
    #[serde(rename = "type")]
    pub line_type: LineType,
    pub product: Option<ProductRef>,
    pub sku: Option<String>,
    pub text: Option<String>,
    pub errors: Option<Vec<String>>,
    pub quantity: f64,
    /// Purchase-multiple hint from the catalog.
    pub step: Option<f64>,
    pub base_unit_price: f64,
    pub unit_price: f64,
    pub unit_price_includes_tax: bool,
    pub discount_percent: DiscountPercent,
    pub discount_amount: f64,
    pub total: f64,
}

impl LineItem {
    /// A fresh product line: one unit, nothing priced yet.
    pub fn new_default(id: LineId) -> Self {
        Self {
            id,
            line_type: LineType::Product,
            product: None,
            sku: None,
            text: None,
            errors: None,
            quantity: 1.0,
            step: None,
            base_unit_price: 0.0,
            unit_price: 0.0,
            unit_price_includes_tax: false,
            discount_percent: DiscountPercent::ZERO,
            discount_amount: 0.0,
            total: 0.0,
        }
    }

    /// Copy the derived pricing fields onto this line.
    pub fn with_pricing(mut self, update: &PricingUpdate) -> Self {
        if let Some(unit_price) = update.unit_price {
            self.unit_price = unit_price;
        }
        self.discount_amount = update.discount_amount;
        self.discount_percent = update.discount_percent;
        self.total = update.total;
        self
    }
}

impl Entity for LineItem {
    type Id = LineId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Ordered collection of draft-order lines (insertion order, unique ids).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Lines(Vec<LineItem>);

impl Lines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, LineItem> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[LineItem] {
        &self.0
    }

    pub fn get(&self, id: &LineId) -> Option<&LineItem> {
        self.0.iter().find(|line| line.id == *id)
    }

    pub fn contains(&self, id: &LineId) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &LineId> {
        self.0.iter().map(|line| &line.id)
    }

    pub fn into_vec(self) -> Vec<LineItem> {
        self.0
    }

    /// A new collection with `line` appended.
    pub(crate) fn appended(&self, line: LineItem) -> Self {
        let mut lines = Vec::with_capacity(self.0.len() + 1);
        lines.extend(self.0.iter().cloned());
        lines.push(line);
        Self(lines)
    }

    /// A new collection without the line `id`.
    pub(crate) fn without(&self, id: &LineId) -> Self {
        Self(self.0.iter().filter(|line| line.id != *id).cloned().collect())
    }

    /// A new collection where the line `id` is replaced by `update(line)`.
    pub(crate) fn replaced<F>(&self, id: &LineId, update: F) -> Self
    where
        F: Fn(&LineItem) -> LineItem,
    {
        Self(
            self.0
                .iter()
                .map(|line| if line.id == *id { update(line) } else { line.clone() })
                .collect(),
        )
    }
}

impl TryFrom<Vec<LineItem>> for Lines {
    type Error = DomainError;

    fn try_from(lines: Vec<LineItem>) -> DomainResult<Self> {
        let mut seen = std::collections::HashSet::with_capacity(lines.len());
        for line in &lines {
            if !seen.insert(&line.id) {
                return Err(DomainError::invariant(format!("duplicate line id: {}", line.id)));
            }
        }
        Ok(Self(lines))
    }
}

impl<'de> Deserialize<'de> for Lines {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let lines = Vec::<LineItem>::deserialize(deserializer)?;
        Lines::try_from(lines).map_err(serde::de::Error::custom)
    }
}

impl<'a> IntoIterator for &'a Lines {
    type Item = &'a LineItem;
    type IntoIter = core::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
