//! Reference dispatch host for draft-order line transitions.
//!
//! Applies actions one at a time in arrival order and fans the resulting
//! snapshots out to rendering subscribers.

pub mod bus;
pub mod in_memory_bus;
pub mod store;

pub use bus::{SnapshotBus, Subscription};
pub use in_memory_bus::{BusError, InMemoryBus};
pub use store::{LineStore, Store};
