use chrono::Utc;
use rand::Rng;
use thiserror::Error;

use crate::models::{ActionRecord, Candidate, QuotaCounters, SwipeAction};

/// Rejections surfaced to the user as non-blocking notifications
///
/// Every rejection leaves the controller state untouched; no operation
/// partially applies.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    #[error("like limit reached")]
    LikesExhausted,

    #[error("no super likes left")]
    SuperLikesExhausted,

    #[error("no more profiles in the deck")]
    DeckExhausted,

    #[error("nothing to undo")]
    EmptyHistory,
}

/// Display state of the deck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckState {
    Loading,
    Active,
    Empty,
}

/// Decides whether a committed like produces a mutual match
///
/// Decorative by contract: the roll never affects deck control flow.
pub trait MatchOdds {
    fn roll(&mut self) -> bool;
}

/// Production odds: an independent Bernoulli trial per paid action
#[derive(Debug, Clone, Copy)]
pub struct RandomOdds {
    probability: f64,
}

impl RandomOdds {
    pub fn new(probability: f64) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
        }
    }
}

impl MatchOdds for RandomOdds {
    fn roll(&mut self) -> bool {
        rand::thread_rng().gen::<f64>() < self.probability
    }
}

/// Fixed odds for deterministic tests and demos
#[derive(Debug, Clone, Copy)]
pub struct FixedOdds(pub bool);

impl MatchOdds for FixedOdds {
    fn roll(&mut self) -> bool {
        self.0
    }
}

/// Result of an accepted action
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    pub candidate: Candidate,
    pub action: SwipeAction,
    /// The probabilistic match side effect fired for this action
    pub matched: bool,
    pub deck_now_empty: bool,
}

/// Result of a successful undo
#[derive(Debug, Clone)]
pub struct UndoOutcome {
    pub candidate: Candidate,
    pub action: SwipeAction,
    pub restored_index: usize,
}

/// Owns the candidate queue, the visible window, quota enforcement and undo
///
/// The cursor only moves forward on accepted actions; undo moves it back to
/// the position stored in the popped history record.
pub struct StackController {
    candidates: Vec<Candidate>,
    current_index: usize,
    history: Vec<ActionRecord>,
    quotas: QuotaCounters,
    match_count: u32,
    state: DeckState,
    window_size: usize,
    odds: Box<dyn MatchOdds + Send>,
}

impl StackController {
    pub fn new(quotas: QuotaCounters, window_size: usize, odds: Box<dyn MatchOdds + Send>) -> Self {
        Self {
            candidates: Vec::new(),
            current_index: 0,
            history: Vec::new(),
            quotas,
            match_count: 0,
            state: DeckState::Loading,
            window_size,
            odds,
        }
    }

    /// Seed the deck with a fresh candidate batch, resetting the cursor
    pub fn load(&mut self, candidates: Vec<Candidate>) {
        self.candidates = candidates;
        self.current_index = 0;
        self.state = if self.candidates.is_empty() {
            DeckState::Empty
        } else {
            DeckState::Active
        };
    }

    /// The rendered slice `[current_index, current_index + window_size)`
    ///
    /// Pure in the controller state: repeated calls yield the same window.
    /// Only the first element is gesture-interactive.
    pub fn visible_window(&self) -> &[Candidate] {
        let start = self.current_index.min(self.candidates.len());
        let end = (start + self.window_size).min(self.candidates.len());
        &self.candidates[start..end]
    }

    /// The card a gesture tracker may be attached to
    pub fn top(&self) -> Option<&Candidate> {
        self.candidates.get(self.current_index)
    }

    pub fn state(&self) -> DeckState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn quotas(&self) -> QuotaCounters {
        self.quotas
    }

    pub fn match_count(&self) -> u32 {
        self.match_count
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Apply an action to the top card
    ///
    /// Quota prechecks run before any mutation; an accepted action then
    /// executes history-push, quota charge, match roll and index advance as
    /// one strictly ordered sequence.
    pub fn perform_action(&mut self, action: SwipeAction) -> Result<ActionOutcome, StackError> {
        if self.current_index >= self.candidates.len() {
            self.state = DeckState::Empty;
            return Err(StackError::DeckExhausted);
        }

        if !self.quotas.allows(action) {
            return Err(match action {
                SwipeAction::Superlike => StackError::SuperLikesExhausted,
                _ => StackError::LikesExhausted,
            });
        }

        let candidate = self.candidates[self.current_index].clone();

        self.history.push(ActionRecord {
            candidate: candidate.clone(),
            action,
            index: self.current_index,
            recorded_at: Utc::now(),
        });
        self.quotas.charge(action);

        let matched = action != SwipeAction::Skip && self.odds.roll();
        if matched {
            self.match_count += 1;
        }

        self.current_index += 1;
        let deck_now_empty = self.current_index >= self.candidates.len();
        if deck_now_empty {
            self.state = DeckState::Empty;
        }

        tracing::debug!(
            candidate_id = candidate.id,
            ?action,
            matched,
            index = self.current_index,
            "action committed"
        );

        Ok(ActionOutcome {
            candidate,
            action,
            matched,
            deck_now_empty,
        })
    }

    /// Revert the most recent committed action
    ///
    /// Pops the LIFO record, refunds exactly the quota it charged and
    /// restores the cursor. Repeatable N-deep in strict LIFO order.
    pub fn undo(&mut self) -> Result<UndoOutcome, StackError> {
        let record = self.history.pop().ok_or(StackError::EmptyHistory)?;

        self.quotas.refund(record.action);
        self.current_index = record.index;
        if !self.candidates.is_empty() {
            self.state = DeckState::Active;
        }

        tracing::debug!(
            candidate_id = record.candidate.id,
            action = ?record.action,
            restored_index = record.index,
            "action undone"
        );

        Ok(UndoOutcome {
            candidate: record.candidate,
            action: record.action,
            restored_index: record.index,
        })
    }
}

impl std::fmt::Debug for StackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StackController")
            .field("candidates", &self.candidates.len())
            .field("current_index", &self.current_index)
            .field("history", &self.history.len())
            .field("quotas", &self.quotas)
            .field("state", &self.state)
            .finish()
    }
}
