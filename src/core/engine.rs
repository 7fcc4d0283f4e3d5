use crate::config::Settings;
use crate::core::gesture::{GesturePhase, GestureTracker, IndicatorState, ReleaseOutcome};
use crate::core::stack::{DeckState, MatchOdds, StackController, StackError};
use crate::core::timing::TimerQueue;
use crate::models::{ActionReport, Candidate, Point, QuotaCounters, Severity, SwipeAction};
use crate::services::{
    ActionReporter, CandidateSource, NotificationSink, RenderSurface, SourceError,
};

/// Continuations driven by the virtual timer queue
#[derive(Debug, Clone)]
enum TimerEvent {
    /// A committed swipe finished its exit animation
    SwipeSettled { action: SwipeAction },
    /// Post-action re-render after the out-animation window
    Refresh,
    /// Delayed mutual-match celebration
    MatchReveal { candidate: Candidate },
}

/// What triggered an action, which decides the animation path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    /// The gesture already animated the card; mutate and render at once
    Gesture,
    /// Button press: force-commit the card and delay the re-render
    Button,
}

/// Composition root of the swipe deck
///
/// Owns the stack controller, the per-card gesture tracker and the timer
/// queue, and talks to the outside world only through the injected
/// surface, notifier and reporter. Single-threaded by construction: every
/// entry point runs to completion before the next is observed.
pub struct SwipeEngine<S, N, R> {
    settings: Settings,
    stack: StackController,
    tracker: Option<GestureTracker>,
    timers: TimerQueue<TimerEvent>,
    surface: S,
    notifier: N,
    reporter: R,
}

impl<S, N, R> SwipeEngine<S, N, R>
where
    S: RenderSurface,
    N: NotificationSink,
    R: ActionReporter,
{
    pub fn new(
        settings: Settings,
        odds: Box<dyn MatchOdds + Send>,
        surface: S,
        notifier: N,
        reporter: R,
    ) -> Self {
        let stack = StackController::new(
            QuotaCounters::new(settings.quota.likes, settings.quota.super_likes),
            settings.deck.window_size,
            odds,
        );
        Self {
            settings,
            stack,
            tracker: None,
            timers: TimerQueue::new(),
            surface,
            notifier,
            reporter,
        }
    }

    /// Fetch the initial deck and render it
    pub fn start(&mut self, source: &mut dyn CandidateSource) -> Result<(), SourceError> {
        self.surface.show_loading();
        let candidates = source.load()?;
        tracing::info!(count = candidates.len(), "deck loaded");
        self.stack.load(candidates);
        self.render();
        Ok(())
    }

    pub fn deck_state(&self) -> DeckState {
        self.stack.state()
    }

    pub fn quotas(&self) -> QuotaCounters {
        self.stack.quotas()
    }

    pub fn match_count(&self) -> u32 {
        self.stack.match_count()
    }

    pub fn current_index(&self) -> usize {
        self.stack.current_index()
    }

    pub fn history_len(&self) -> usize {
        self.stack.history_len()
    }

    /// Pointer pressed on the top card
    pub fn pointer_down(&mut self, point: Point) {
        if let Some(tracker) = self.tracker.as_mut() {
            tracker.begin(point);
        }
    }

    /// Pointer moved while dragging the top card
    pub fn pointer_move(&mut self, point: Point) {
        if let Some(tracker) = self.tracker.as_mut() {
            if let Some(frame) = tracker.update(point) {
                self.surface.set_card_transform(frame.transform);
                self.surface.set_indicator(frame.indicator);
            }
        }
    }

    /// Pointer released (or left the card)
    ///
    /// A release without an active drag is ignored, so stray mouseup or
    /// mouseleave events never disturb a card mid-exit.
    pub fn pointer_up(&mut self, point: Point) {
        let Some(tracker) = self.tracker.as_mut() else {
            return;
        };
        match tracker.end(point) {
            Some(ReleaseOutcome::Commit(plan)) => {
                let action = SwipeAction::from_direction(plan.direction);
                // Quota is checked before the gesture may visually commit;
                // an unpayable swipe snaps back like a cancel
                if !self.stack.quotas().allows(action) {
                    tracker.rescind();
                    self.surface.reset_card_transform();
                    self.surface.set_indicator(IndicatorState::Hidden);
                    let err = match action {
                        SwipeAction::Superlike => StackError::SuperLikesExhausted,
                        _ => StackError::LikesExhausted,
                    };
                    self.reject(action, err);
                    return;
                }
                self.surface.set_card_transform(plan.exit);
                self.surface.set_indicator(IndicatorState::Hidden);
                self.surface.mark_animating_out();
                if plan.haptic {
                    self.notifier.vibrate(&[10]);
                }
                self.timers
                    .schedule(plan.settle_ms, TimerEvent::SwipeSettled { action });
            }
            Some(ReleaseOutcome::Cancel) => {
                self.surface.reset_card_transform();
                self.surface.set_indicator(IndicatorState::Hidden);
            }
            None => {}
        }
    }

    /// Action-bar button press (skip / like / superlike)
    pub fn press(&mut self, action: SwipeAction) {
        if self
            .tracker
            .as_ref()
            .is_some_and(|t| t.phase() == GesturePhase::AnimatingOut)
        {
            // A commit is already in flight for this card
            tracing::debug!(?action, "press ignored, card mid-commit");
            return;
        }
        self.apply_action(action, Trigger::Button);
    }

    /// Undo button press
    pub fn press_undo(&mut self) {
        match self.stack.undo() {
            Ok(undone) => {
                self.surface
                    .update_stats(self.stack.quotas(), self.stack.match_count());
                self.render();
                self.notifier.toast("Action undone", Severity::Info, 2000);
                self.notifier.vibrate(&[10]);
                tracing::info!(candidate_id = undone.candidate.id, "undo applied");
            }
            Err(err @ StackError::EmptyHistory) => {
                self.notifier.toast(&err.to_string(), Severity::Info, 2000);
            }
            Err(err) => {
                // undo only ever rejects on empty history
                tracing::warn!(%err, "unexpected undo rejection");
            }
        }
    }

    /// Move virtual time forward, running every continuation now due
    pub fn advance(&mut self, delta_ms: u64) {
        for event in self.timers.advance(delta_ms) {
            match event {
                TimerEvent::SwipeSettled { action } => {
                    self.apply_action(action, Trigger::Gesture);
                }
                TimerEvent::Refresh => self.render(),
                TimerEvent::MatchReveal { candidate } => {
                    self.surface.show_match(&candidate);
                    self.notifier.vibrate(&[50, 100, 50]);
                }
            }
        }
    }

    fn apply_action(&mut self, action: SwipeAction, trigger: Trigger) {
        let outcome = match self.stack.perform_action(action) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.reject(action, err);
                return;
            }
        };

        let mut refresh_delay = 0;
        if trigger == Trigger::Button {
            if let Some(plan) = self
                .tracker
                .as_mut()
                .and_then(|t| t.force_commit(action.exit_direction()))
            {
                self.surface.set_card_transform(plan.exit);
                self.surface.mark_animating_out();
                refresh_delay = plan.settle_ms;
            }
        }

        self.surface
            .update_stats(self.stack.quotas(), self.stack.match_count());

        // Best-effort: a failed report never rolls back the committed action
        let report = ActionReport::new(action, outcome.candidate.id);
        if let Err(err) = self.reporter.report(&report) {
            tracing::warn!(%err, profile_id = outcome.candidate.id, "failed to report action");
        }

        let message = match action {
            SwipeAction::Skip => "Skipped",
            SwipeAction::Like => "Like sent!",
            SwipeAction::Superlike => "Super like sent!",
        };
        self.notifier.toast(message, Severity::Success, 2000);

        if outcome.matched {
            self.timers.schedule(
                self.settings.matching.reveal_delay_ms,
                TimerEvent::MatchReveal {
                    candidate: outcome.candidate,
                },
            );
        }

        if refresh_delay == 0 {
            self.render();
        } else {
            self.timers.schedule(refresh_delay, TimerEvent::Refresh);
        }
    }

    fn reject(&mut self, action: SwipeAction, err: StackError) {
        tracing::info!(?action, %err, "action rejected");
        match err {
            StackError::DeckExhausted => {
                self.tracker = None;
                self.surface.show_empty();
            }
            StackError::LikesExhausted => {
                self.notifier
                    .toast("Like limit reached", Severity::Warning, 3000);
                self.surface.shake_card();
                self.notifier.prompt_upgrade();
            }
            StackError::SuperLikesExhausted => {
                self.notifier
                    .toast("No super likes left", Severity::Warning, 3000);
                self.notifier.prompt_upgrade();
            }
            StackError::EmptyHistory => {}
        }
    }

    /// Mount the current visible window and attach a tracker to its top card
    fn render(&mut self) {
        if self.stack.state() == DeckState::Empty {
            self.tracker = None;
            self.surface.show_empty();
            return;
        }
        self.surface.show_deck(self.stack.visible_window());
        self.tracker = self.stack.top().map(|_| {
            GestureTracker::new(
                self.settings.gesture.clone(),
                self.surface.viewport_width(),
            )
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::stack::FixedOdds;
    use crate::models::Transform;
    use crate::services::{DemoCandidateSource, ReporterError};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct Recorded {
        deck_renders: Vec<Vec<u64>>,
        empty_shown: u32,
        transforms: Vec<Transform>,
        resets: u32,
        shakes: u32,
        matches: Vec<u64>,
        toasts: Vec<(String, Severity)>,
        vibrations: Vec<Vec<u32>>,
        upgrade_prompts: u32,
        reports: Vec<(SwipeAction, u64)>,
        fail_reports: bool,
    }

    #[derive(Clone, Default)]
    struct Shared(Rc<RefCell<Recorded>>);

    impl RenderSurface for Shared {
        fn viewport_width(&self) -> f64 {
            400.0
        }
        fn show_loading(&mut self) {}
        fn show_deck(&mut self, window: &[Candidate]) {
            self.0
                .borrow_mut()
                .deck_renders
                .push(window.iter().map(|c| c.id).collect());
        }
        fn show_empty(&mut self) {
            self.0.borrow_mut().empty_shown += 1;
        }
        fn set_card_transform(&mut self, transform: Transform) {
            self.0.borrow_mut().transforms.push(transform);
        }
        fn reset_card_transform(&mut self) {
            self.0.borrow_mut().resets += 1;
        }
        fn set_indicator(&mut self, _state: IndicatorState) {}
        fn mark_animating_out(&mut self) {}
        fn shake_card(&mut self) {
            self.0.borrow_mut().shakes += 1;
        }
        fn show_match(&mut self, candidate: &Candidate) {
            self.0.borrow_mut().matches.push(candidate.id);
        }
        fn update_stats(&mut self, _quotas: QuotaCounters, _match_count: u32) {}
    }

    impl NotificationSink for Shared {
        fn toast(&mut self, message: &str, severity: Severity, _duration_ms: u64) {
            self.0
                .borrow_mut()
                .toasts
                .push((message.to_string(), severity));
        }
        fn vibrate(&mut self, pattern: &[u32]) {
            self.0.borrow_mut().vibrations.push(pattern.to_vec());
        }
        fn prompt_upgrade(&mut self) {
            self.0.borrow_mut().upgrade_prompts += 1;
        }
    }

    impl ActionReporter for Shared {
        fn report(&mut self, report: &ActionReport) -> Result<(), ReporterError> {
            if self.0.borrow().fail_reports {
                return Err(ReporterError::Io(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    "host gone",
                )));
            }
            self.0
                .borrow_mut()
                .reports
                .push((report.action, report.profile_id));
            Ok(())
        }
    }

    fn engine(shared: &Shared, matched: bool) -> SwipeEngine<Shared, Shared, Shared> {
        let mut engine = SwipeEngine::new(
            Settings::default(),
            Box::new(FixedOdds(matched)),
            shared.clone(),
            shared.clone(),
            shared.clone(),
        );
        engine
            .start(&mut DemoCandidateSource::new(5))
            .expect("demo source never fails");
        engine
    }

    fn drag(engine: &mut SwipeEngine<Shared, Shared, Shared>, to_x: f64) {
        engine.pointer_down(Point::new(200.0, 300.0));
        engine.pointer_move(Point::new(to_x, 300.0));
        engine.pointer_up(Point::new(to_x, 300.0));
    }

    #[test]
    fn test_drag_commit_applies_one_action_after_settle() {
        let shared = Shared::default();
        let mut engine = engine(&shared, false);

        drag(&mut engine, 350.0);
        // Domain state untouched until the settle delay elapses
        assert_eq!(engine.current_index(), 0);

        engine.advance(299);
        assert_eq!(engine.current_index(), 0);

        engine.advance(1);
        assert_eq!(engine.current_index(), 1);
        assert_eq!(engine.history_len(), 1);
        assert_eq!(engine.quotas().likes_remaining, 9);
        assert_eq!(shared.0.borrow().reports, vec![(SwipeAction::Like, 1)]);

        // Nothing further fires
        engine.advance(10_000);
        assert_eq!(engine.current_index(), 1);
        assert_eq!(shared.0.borrow().reports.len(), 1);
    }

    #[test]
    fn test_left_drag_maps_to_skip() {
        let shared = Shared::default();
        let mut engine = engine(&shared, false);

        drag(&mut engine, 50.0);
        engine.advance(300);

        assert_eq!(shared.0.borrow().reports, vec![(SwipeAction::Skip, 1)]);
        assert_eq!(engine.quotas().likes_remaining, 10);
    }

    #[test]
    fn test_cancelled_drag_has_no_side_effects() {
        let shared = Shared::default();
        let mut engine = engine(&shared, false);

        drag(&mut engine, 260.0);
        engine.advance(10_000);

        assert_eq!(engine.current_index(), 0);
        assert_eq!(engine.history_len(), 0);
        assert_eq!(shared.0.borrow().resets, 1);
        assert!(shared.0.borrow().reports.is_empty());
    }

    #[test]
    fn test_button_like_mutates_now_and_rerenders_later() {
        let shared = Shared::default();
        let mut engine = engine(&shared, false);
        let renders_before = shared.0.borrow().deck_renders.len();

        engine.press(SwipeAction::Like);
        assert_eq!(engine.current_index(), 1);
        assert_eq!(shared.0.borrow().deck_renders.len(), renders_before);

        engine.advance(400);
        assert_eq!(shared.0.borrow().deck_renders.len(), renders_before + 1);
        assert_eq!(
            shared.0.borrow().deck_renders.last().unwrap(),
            &vec![2, 3, 4]
        );
    }

    #[test]
    fn test_press_during_exit_animation_is_ignored() {
        let shared = Shared::default();
        let mut engine = engine(&shared, false);

        engine.press(SwipeAction::Like);
        engine.press(SwipeAction::Like);
        engine.press(SwipeAction::Skip);
        assert_eq!(engine.current_index(), 1);

        engine.advance(400);
        engine.press(SwipeAction::Skip);
        assert_eq!(engine.current_index(), 2);
    }

    #[test]
    fn test_quota_rejection_toasts_and_prompts() {
        let shared = Shared::default();
        let mut engine = engine(&shared, false);

        engine.press(SwipeAction::Superlike);
        engine.advance(400);
        engine.press(SwipeAction::Superlike);

        let recorded = shared.0.borrow();
        assert_eq!(recorded.upgrade_prompts, 1);
        assert!(recorded
            .toasts
            .iter()
            .any(|(m, s)| m == "No super likes left" && *s == Severity::Warning));
        drop(recorded);
        assert_eq!(engine.current_index(), 1);
        assert_eq!(engine.quotas().super_likes_remaining, 0);
    }

    #[test]
    fn test_like_rejection_shakes_card() {
        let shared = Shared::default();
        let mut settings = Settings::default();
        settings.quota.likes = 0;
        let mut engine = SwipeEngine::new(
            settings,
            Box::new(FixedOdds(false)),
            shared.clone(),
            shared.clone(),
            shared.clone(),
        );
        engine.start(&mut DemoCandidateSource::new(3)).unwrap();

        engine.press(SwipeAction::Like);
        assert_eq!(shared.0.borrow().shakes, 1);
        assert_eq!(shared.0.borrow().upgrade_prompts, 1);
        assert_eq!(engine.history_len(), 0);
    }

    #[test]
    fn test_unpayable_drag_commit_snaps_back_and_deck_stays_usable() {
        let shared = Shared::default();
        let mut settings = Settings::default();
        settings.quota.likes = 0;
        let mut engine = SwipeEngine::new(
            settings,
            Box::new(FixedOdds(false)),
            shared.clone(),
            shared.clone(),
            shared.clone(),
        );
        engine.start(&mut DemoCandidateSource::new(3)).unwrap();

        // Right drag past the threshold with no likes left
        drag(&mut engine, 350.0);
        engine.advance(10_000);

        // Rejected before any visual commit or mutation
        assert_eq!(shared.0.borrow().resets, 1);
        assert_eq!(shared.0.borrow().shakes, 1);
        assert_eq!(shared.0.borrow().upgrade_prompts, 1);
        assert_eq!(engine.current_index(), 0);
        assert_eq!(engine.history_len(), 0);
        assert!(shared.0.borrow().reports.is_empty());

        // A free skip still advances the deck afterwards
        engine.press(SwipeAction::Skip);
        assert_eq!(engine.current_index(), 1);
        assert_eq!(shared.0.borrow().reports, vec![(SwipeAction::Skip, 1)]);

        // And so does a fresh left drag
        engine.advance(400);
        drag(&mut engine, 50.0);
        engine.advance(300);
        assert_eq!(engine.current_index(), 2);
    }

    #[test]
    fn test_stray_release_does_not_reset_exiting_card() {
        let shared = Shared::default();
        let mut engine = engine(&shared, false);

        drag(&mut engine, 350.0);
        assert_eq!(shared.0.borrow().resets, 0);

        // mouseleave after mouseup on the committed card
        engine.pointer_up(Point::new(350.0, 300.0));
        assert_eq!(shared.0.borrow().resets, 0);

        engine.advance(300);
        assert_eq!(engine.current_index(), 1);
    }

    #[test]
    fn test_match_reveal_fires_after_delay() {
        let shared = Shared::default();
        let mut engine = engine(&shared, true);

        engine.press(SwipeAction::Like);
        assert_eq!(engine.match_count(), 1);
        assert!(shared.0.borrow().matches.is_empty());

        engine.advance(500);
        assert_eq!(shared.0.borrow().matches, vec![1]);
        assert_eq!(shared.0.borrow().vibrations.last().unwrap(), &vec![50, 100, 50]);
    }

    #[test]
    fn test_undo_rerenders_previous_card() {
        let shared = Shared::default();
        let mut engine = engine(&shared, false);

        engine.press(SwipeAction::Like);
        engine.advance(400);
        engine.press_undo();

        assert_eq!(engine.current_index(), 0);
        assert_eq!(engine.quotas().likes_remaining, 10);
        assert_eq!(
            shared.0.borrow().deck_renders.last().unwrap(),
            &vec![1, 2, 3]
        );
    }

    #[test]
    fn test_undo_with_empty_history_toasts() {
        let shared = Shared::default();
        let mut engine = engine(&shared, false);

        engine.press_undo();
        assert!(shared
            .0
            .borrow()
            .toasts
            .iter()
            .any(|(m, s)| m == "nothing to undo" && *s == Severity::Info));
        assert_eq!(engine.current_index(), 0);
    }

    #[test]
    fn test_deck_exhaustion_shows_empty_and_stays_there() {
        let shared = Shared::default();
        let mut engine = SwipeEngine::new(
            Settings::default(),
            Box::new(FixedOdds(false)),
            shared.clone(),
            shared.clone(),
            shared.clone(),
        );
        engine.start(&mut DemoCandidateSource::new(1)).unwrap();

        engine.press(SwipeAction::Skip);
        engine.advance(400);
        assert_eq!(engine.deck_state(), DeckState::Empty);
        assert!(shared.0.borrow().empty_shown >= 1);

        engine.press(SwipeAction::Skip);
        assert_eq!(engine.deck_state(), DeckState::Empty);
        assert_eq!(engine.history_len(), 1);
    }

    #[test]
    fn test_reporter_failure_never_rolls_back() {
        let shared = Shared::default();
        shared.0.borrow_mut().fail_reports = true;
        let mut engine = engine(&shared, false);

        engine.press(SwipeAction::Like);
        assert_eq!(engine.current_index(), 1);
        assert_eq!(engine.quotas().likes_remaining, 9);
        assert_eq!(engine.history_len(), 1);
    }
}
