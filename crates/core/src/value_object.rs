//! Value object trait: equality by value, not identity.
//!
//! Pricing results and formatted percentages are value objects: two updates
//! with the same figures are interchangeable, whichever line they came from.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one with the new figures.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: No identity (`PricingUpdate { total: 16.0, .. }`)
/// - **Entity**: Has identity (a `LineItem` keeps its `LineId` across edits)
///
/// The trait requires `Clone`, `PartialEq` and `Debug` so values can be copied
/// into fresh line states, compared in tests and logged.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
