//! Transition capability: pure `(state, action) -> state'` functions.

/// A pure state-transition function handed to a dispatch host.
///
/// Implementations must not perform IO or mutate `state`; they return a fresh
/// state value. Hosts are responsible for applying actions one at a time in
/// arrival order.
pub trait Transition {
    type State: Clone + core::fmt::Debug;
    type Action: core::fmt::Debug;

    /// The state a host starts from before any action is applied.
    fn initial_state(&self) -> Self::State;

    /// Compute the next state from the current one and a single action.
    fn apply(&self, state: &Self::State, action: &Self::Action) -> Self::State;
}

/// Fold a sequence of actions through a transition, starting from `state`.
pub fn replay<'a, T, I>(transition: &T, state: T::State, actions: I) -> T::State
where
    T: Transition,
    T::Action: 'a,
    I: IntoIterator<Item = &'a T::Action>,
{
    actions
        .into_iter()
        .fold(state, |current, action| transition.apply(&current, action))
}
