//! Draft-order lines: pricing reconciliation for an order being put together
//! in the admin.
//!
//! This crate contains the line model, the pricing engine and the pure
//! transition function over the ordered line collection (no IO, no rendering,
//! no dispatch wiring).

pub mod action;
pub mod line;
pub mod pricing;
pub mod reducer;
pub mod wire;

pub use action::{CatalogPrice, LineAction, LineEdit, ResolvedProduct, TaxedPrice};
pub use line::{LineItem, LineType, Lines, ProductRef};
pub use pricing::{
    DiscountPercent, FieldInput, PricingBasis, PricingUpdate, ensure_numeric, recalculate, round2,
};
pub use reducer::{LinesReducer, edit_line};
pub use wire::{WireAction, parse_action, parse_actions};
