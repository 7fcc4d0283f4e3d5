// Core state machine exports
pub mod engine;
pub mod gesture;
pub mod stack;
pub mod timing;

pub use engine::SwipeEngine;
pub use gesture::{CommitPlan, DragFrame, GesturePhase, GestureTracker, IndicatorState, ReleaseOutcome};
pub use stack::{ActionOutcome, DeckState, FixedOdds, MatchOdds, RandomOdds, StackController, StackError, UndoOutcome};
pub use timing::{TimerId, TimerQueue};
