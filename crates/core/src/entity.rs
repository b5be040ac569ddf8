//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// A draft-order line keeps its identifier while every priced field around it
/// is recomputed, so lookups across transitions go through `id()`.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
