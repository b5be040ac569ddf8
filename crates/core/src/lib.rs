//! `draftorder-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the draft-order
//! crates (no IO, no rendering, no dispatch wiring).

pub mod entity;
pub mod error;
pub mod id;
pub mod transition;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{LineId, LineIdSource, SequentialLineIds, UuidLineIds};
pub use transition::{Transition, replay};
pub use value_object::ValueObject;
