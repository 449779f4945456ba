//! Playground state machine
//!
//! `Idle -> Editing -> Rendering -> Idle`, with explicit runs and template
//! loads going straight from `Idle` to `Rendering` and reset returning to
//! `Idle` from anywhere outside a render.

use crate::error::StateError;
use serde::Serialize;

/// Lifecycle state of a playground
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaygroundState {
    /// Nothing pending
    #[default]
    Idle,
    /// Edits received, debounce armed
    Editing,
    /// Snapshot taken, document being produced
    Rendering,
}

impl PlaygroundState {
    /// All states
    pub const ALL: [Self; 3] = [Self::Idle, Self::Editing, Self::Rendering];
}

/// Validates a state transition.
///
/// Returns an error for anything outside the table; with the `strict-debug`
/// feature an illegal transition panics instead.
///
/// # Errors
/// [`StateError::IllegalTransition`] when `from -> to` is not allowed.
pub fn validate_transition(from: PlaygroundState, to: PlaygroundState) -> Result<(), StateError> {
    if allowed(from, to) {
        Ok(())
    } else {
        #[cfg(feature = "strict-debug")]
        panic!("Illegal state transition attempted: {from:?} -> {to:?}");

        #[cfg(not(feature = "strict-debug"))]
        Err(StateError::IllegalTransition { from, to })
    }
}

/// States reachable from `from` in one step
#[must_use]
pub fn allowed_transitions(from: PlaygroundState) -> &'static [PlaygroundState] {
    use PlaygroundState::{Editing, Idle, Rendering};
    match from {
        Idle => &[Idle, Editing, Rendering],
        Editing => &[Editing, Rendering, Idle],
        Rendering => &[Idle],
    }
}

fn allowed(from: PlaygroundState, to: PlaygroundState) -> bool {
    allowed_transitions(from).contains(&to)
}
