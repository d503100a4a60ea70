//! Event-driven state transitions
//!
//! Components define their own state enum and map events to transitions by
//! implementing [`StateTransitions`]. Events are plain `u32` identifiers so
//! state types stay `Copy` and transition tables stay match arms:
//!
//! ```rust
//! use verve_core::fsm::{event_types, StateTransitions};
//!
//! #[derive(Clone, Copy, PartialEq, Eq, Debug)]
//! enum GateState {
//!     Loading,
//!     Ready,
//! }
//!
//! impl StateTransitions for GateState {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         match (self, event) {
//!             (GateState::Loading, event_types::TIMELINE_COMPLETE) => Some(GateState::Ready),
//!             // Ready is terminal - nothing transitions out
//!             _ => None,
//!         }
//!     }
//! }
//! ```
//!
//! `on_event` returning `None` means "stay in the current state"; callers
//! only react when a transition actually fired.

/// Event identifiers understood by Verve's built-in state machines
pub mod event_types {
    /// Scroll position crossed the collapse threshold going down
    pub const SCROLL_PAST: u32 = 0;
    /// Scroll position crossed back above the collapse threshold
    pub const SCROLL_BACK: u32 = 1;
    /// A lifecycle timeline ran to completion
    pub const TIMELINE_COMPLETE: u32 = 2;
    /// Form submission requested
    pub const SUBMIT: u32 = 3;
    /// Simulated submission delay elapsed
    pub const SUBMIT_DONE: u32 = 4;
}

/// Map events to state transitions
///
/// Implement this on a state enum to define how events cause transitions.
/// Return `None` to remain in the current state.
pub trait StateTransitions: Clone + Copy + PartialEq + Sized {
    /// Given the current state and an event, return the next state
    /// (or `None` to stay)
    fn on_event(&self, event: u32) -> Option<Self>;

    /// Apply an event in place, returning whether a transition fired
    fn apply(&mut self, event: u32) -> bool {
        if let Some(next) = self.on_event(event) {
            *self = next;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    enum Gate {
        Loading,
        Ready,
    }

    impl StateTransitions for Gate {
        fn on_event(&self, event: u32) -> Option<Self> {
            match (self, event) {
                (Gate::Loading, event_types::TIMELINE_COMPLETE) => Some(Gate::Ready),
                _ => None,
            }
        }
    }

    #[test]
    fn test_transition_fires_once() {
        let mut gate = Gate::Loading;
        assert!(gate.apply(event_types::TIMELINE_COMPLETE));
        assert_eq!(gate, Gate::Ready);

        // Terminal state ignores further events
        assert!(!gate.apply(event_types::TIMELINE_COMPLETE));
        assert_eq!(gate, Gate::Ready);
    }

    #[test]
    fn test_unknown_event_stays() {
        let mut gate = Gate::Loading;
        assert!(!gate.apply(event_types::SCROLL_PAST));
        assert_eq!(gate, Gate::Loading);
    }
}
