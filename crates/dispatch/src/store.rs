//! Sequential dispatch host.
//!
//! ```text
//! action
//!   ↓
//! 1. transition.apply(&state, &action)   (pure, returns a new state)
//!   ↓
//! 2. replace the held state
//!   ↓
//! 3. publish the snapshot to subscribers
//! ```
//!
//! `dispatch` takes `&mut self`, so one action is applied to completion before
//! the next can start.

use std::sync::Arc;

use tracing::{debug, warn};

use draftorder_core::Transition;
use draftorder_lines::{Lines, LinesReducer};

use crate::bus::{SnapshotBus, Subscription};
use crate::in_memory_bus::InMemoryBus;

/// Holds the current state of a transition and applies actions to it.
pub struct Store<T, B>
where
    T: Transition,
{
    transition: T,
    state: T::State,
    bus: B,
    applied: u64,
}

/// The store the order form runs: line reducer + in-memory snapshot bus.
pub type LineStore = Store<LinesReducer, Arc<InMemoryBus<Lines>>>;

impl<T, B> Store<T, B>
where
    T: Transition,
    B: SnapshotBus<T::State>,
{
    /// Start from the transition's initial state.
    pub fn new(transition: T, bus: B) -> Self {
        let state = transition.initial_state();
        Self::with_state(transition, bus, state)
    }

    /// Start from a previously rendered state.
    pub fn with_state(transition: T, bus: B, state: T::State) -> Self {
        Self {
            transition,
            state,
            bus,
            applied: 0,
        }
    }

    pub fn state(&self) -> &T::State {
        &self.state
    }

    /// Number of actions applied since the store was created.
    pub fn applied(&self) -> u64 {
        self.applied
    }

    pub fn subscribe(&self) -> Subscription<T::State> {
        self.bus.subscribe()
    }

    /// Apply one action and publish the resulting state.
    ///
    /// A failed publish is logged; the new state is kept either way.
    pub fn dispatch(&mut self, action: T::Action) -> &T::State {
        self.state = self.transition.apply(&self.state, &action);
        self.applied += 1;
        debug!(applied = self.applied, ?action, "action dispatched");

        if let Err(err) = self.bus.publish(self.state.clone()) {
            warn!(error = ?err, "failed to publish state snapshot");
        }

        &self.state
    }

    /// Apply actions in order.
    pub fn dispatch_all<I>(&mut self, actions: I) -> &T::State
    where
        I: IntoIterator<Item = T::Action>,
    {
        for action in actions {
            self.dispatch(action);
        }
        &self.state
    }

    pub fn into_state(self) -> T::State {
        self.state
    }
}

impl LineStore {
    /// Line store with its own snapshot bus.
    pub fn for_lines(reducer: LinesReducer) -> Self {
        Store::new(reducer, Arc::new(InMemoryBus::new()))
    }
}

impl<T, B> core::fmt::Debug for Store<T, B>
where
    T: Transition + core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Store")
            .field("transition", &self.transition)
            .field("state", &self.state)
            .field("applied", &self.applied)
            .finish_non_exhaustive()
    }
}
