//! Flirtly Deck - swipe-deck engine for the Flirtly dating mini app
//!
//! This library implements the card-stack core of the mini app: the drag
//! gesture state machine, the quota-checked deck controller with undo, and
//! the engine that sequences their animations over virtual time. Rendering,
//! notifications and host reporting are injected interfaces, so the whole
//! engine runs headlessly.

pub mod config;
pub mod core;
pub mod models;
pub mod onboarding;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    DeckState, GesturePhase, GestureTracker, StackController, StackError, SwipeEngine,
};
pub use crate::models::{ActionReport, Candidate, Direction, Point, QuotaCounters, SwipeAction};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let quotas = QuotaCounters::new(10, 1);
        assert!(quotas.allows(SwipeAction::Like));
    }
}
