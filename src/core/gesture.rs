use crate::config::GestureSettings;
use crate::models::{Direction, Point, Transform};

/// Lifecycle of one card's gesture handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Dragging,
    /// Commit entered; the card is leaving and accepts no further input
    AnimatingOut,
}

/// Ephemeral per-drag state, discarded when the pointer is released
#[derive(Debug, Clone, Copy, Default)]
struct GestureSession {
    start: Point,
    dx: f64,
    dy: f64,
}

/// Directional indicator shown while dragging (heart / thumbs-down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorState {
    Hidden,
    Lit { direction: Direction, opacity: f64 },
}

/// One drag frame: where to draw the card and which indicator is lit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragFrame {
    pub transform: Transform,
    pub indicator: IndicatorState,
}

/// Instructions for animating a committed card off-screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommitPlan {
    pub direction: Direction,
    pub exit: Transform,
    /// Delay before the completion hook may fire
    pub settle_ms: u64,
    /// Drag commits pulse the haptics; forced commits do not
    pub haptic: bool,
}

/// Outcome of releasing the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReleaseOutcome {
    Commit(CommitPlan),
    /// Below threshold: snap back to identity, no observable side effect
    Cancel,
}

/// Translates a pointer drag on the top card into live transforms and a
/// commit/cancel decision at release
///
/// One tracker is attached per top card and discarded when the card is
/// replaced, so overlapping gestures cannot occur structurally.
#[derive(Debug)]
pub struct GestureTracker {
    settings: GestureSettings,
    viewport_width: f64,
    phase: GesturePhase,
    session: GestureSession,
}

impl GestureTracker {
    pub fn new(settings: GestureSettings, viewport_width: f64) -> Self {
        Self {
            settings,
            viewport_width,
            phase: GesturePhase::Idle,
            session: GestureSession::default(),
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Current horizontal delta, for callers mirroring the drag elsewhere
    pub fn delta(&self) -> (f64, f64) {
        (self.session.dx, self.session.dy)
    }

    /// Start a drag. Returns false (and does nothing) unless Idle; a
    /// pointer-down mid-drag or mid-exit is not a valid input.
    pub fn begin(&mut self, point: Point) -> bool {
        if self.phase != GesturePhase::Idle {
            return false;
        }
        self.phase = GesturePhase::Dragging;
        self.session = GestureSession {
            start: point,
            dx: 0.0,
            dy: 0.0,
        };
        true
    }

    /// Advance the drag to a new pointer position
    ///
    /// Returns the frame to render, or None when not dragging (stray move
    /// events are ignored, as the source did).
    pub fn update(&mut self, point: Point) -> Option<DragFrame> {
        if self.phase != GesturePhase::Dragging {
            return None;
        }
        self.session.dx = point.x - self.session.start.x;
        self.session.dy = point.y - self.session.start.y;

        let rotate = self.drag_rotation(self.session.dx);
        let transform = Transform {
            translate_x: self.session.dx,
            translate_y: self.session.dy,
            rotate_deg: rotate,
        };

        Some(DragFrame {
            transform,
            indicator: self.indicator_for(self.session.dx),
        })
    }

    /// Release the pointer and decide commit vs cancel
    ///
    /// Returns None when no drag is active (stray mouseup/mouseleave events
    /// must not disturb a card mid-exit). A release with zero net movement
    /// is a cancel.
    pub fn end(&mut self, point: Point) -> Option<ReleaseOutcome> {
        if self.phase != GesturePhase::Dragging {
            return None;
        }
        self.session.dx = point.x - self.session.start.x;
        self.session.dy = point.y - self.session.start.y;

        if self.session.dx.abs() > self.settings.threshold_px {
            let direction = if self.session.dx > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            };
            let plan = self.commit(direction, self.settings.drag_settle_ms, true);
            Some(ReleaseOutcome::Commit(plan))
        } else {
            self.phase = GesturePhase::Idle;
            self.session = GestureSession::default();
            Some(ReleaseOutcome::Cancel)
        }
    }

    /// Abort a commit decision that a caller refused to honor, snapping the
    /// tracker back to rest so the card stays interactive
    pub fn rescind(&mut self) {
        self.phase = GesturePhase::Idle;
        self.session = GestureSession::default();
    }

    /// Programmatic swipe without a prior drag (button-triggered action)
    ///
    /// Returns None once the card is already animating out; commit is final.
    pub fn force_commit(&mut self, direction: Direction) -> Option<CommitPlan> {
        if self.phase == GesturePhase::AnimatingOut {
            return None;
        }
        // Forced swipes ignore any in-flight drag offset
        self.session.dy = 0.0;
        Some(self.commit(direction, self.settings.forced_settle_ms, false))
    }

    fn commit(&mut self, direction: Direction, settle_ms: u64, haptic: bool) -> CommitPlan {
        let sign = match direction {
            Direction::Right => 1.0,
            Direction::Left => -1.0,
        };
        let exit = Transform {
            translate_x: sign * self.viewport_width * self.settings.exit_factor,
            translate_y: self.session.dy,
            rotate_deg: sign * self.settings.max_rotation_deg * 2.0,
        };
        self.phase = GesturePhase::AnimatingOut;
        CommitPlan {
            direction,
            exit,
            settle_ms,
            haptic,
        }
    }

    fn drag_rotation(&self, dx: f64) -> f64 {
        if self.viewport_width <= 0.0 {
            return 0.0;
        }
        let rotate = (dx / self.viewport_width) * self.settings.max_rotation_deg;
        rotate.clamp(-self.settings.max_rotation_deg, self.settings.max_rotation_deg)
    }

    fn indicator_for(&self, dx: f64) -> IndicatorState {
        if dx.abs() <= self.settings.dead_zone_px {
            return IndicatorState::Hidden;
        }
        let direction = if dx > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        };
        IndicatorState::Lit {
            direction,
            opacity: (dx.abs() / self.settings.threshold_px).min(1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> GestureTracker {
        GestureTracker::new(GestureSettings::default(), 400.0)
    }

    #[test]
    fn test_cancel_below_threshold_resets_to_identity() {
        let mut tracker = tracker();
        assert!(tracker.begin(Point::new(200.0, 300.0)));
        tracker.update(Point::new(260.0, 310.0));

        let outcome = tracker.end(Point::new(260.0, 310.0));
        assert_eq!(outcome, Some(ReleaseOutcome::Cancel));
        assert_eq!(tracker.phase(), GesturePhase::Idle);
        assert_eq!(tracker.delta(), (0.0, 0.0));
    }

    #[test]
    fn test_zero_movement_release_is_cancel() {
        let mut tracker = tracker();
        tracker.begin(Point::new(200.0, 300.0));
        assert_eq!(
            tracker.end(Point::new(200.0, 300.0)),
            Some(ReleaseOutcome::Cancel)
        );
    }

    #[test]
    fn test_commit_direction_follows_sign_of_dx() {
        let mut tracker = tracker();
        tracker.begin(Point::new(200.0, 300.0));
        tracker.update(Point::new(350.0, 300.0));
        match tracker.end(Point::new(350.0, 300.0)).unwrap() {
            ReleaseOutcome::Commit(plan) => {
                assert_eq!(plan.direction, Direction::Right);
                assert_eq!(plan.settle_ms, 300);
                assert!(plan.haptic);
                assert_eq!(plan.exit.translate_x, 600.0);
                assert_eq!(plan.exit.rotate_deg, 30.0);
            }
            ReleaseOutcome::Cancel => panic!("expected commit"),
        }
        assert_eq!(tracker.phase(), GesturePhase::AnimatingOut);

        let mut tracker = self::tracker();
        tracker.begin(Point::new(200.0, 300.0));
        match tracker.end(Point::new(50.0, 300.0)).unwrap() {
            ReleaseOutcome::Commit(plan) => assert_eq!(plan.direction, Direction::Left),
            ReleaseOutcome::Cancel => panic!("expected commit"),
        }
    }

    #[test]
    fn test_release_exactly_at_threshold_cancels() {
        let mut tracker = tracker();
        tracker.begin(Point::new(0.0, 0.0));
        assert_eq!(
            tracker.end(Point::new(100.0, 0.0)),
            Some(ReleaseOutcome::Cancel)
        );
    }

    #[test]
    fn test_indicator_dead_zone_and_opacity() {
        let mut tracker = tracker();
        tracker.begin(Point::new(0.0, 0.0));

        let frame = tracker.update(Point::new(15.0, 0.0)).unwrap();
        assert_eq!(frame.indicator, IndicatorState::Hidden);

        let frame = tracker.update(Point::new(50.0, 0.0)).unwrap();
        assert_eq!(
            frame.indicator,
            IndicatorState::Lit { direction: Direction::Right, opacity: 0.5 }
        );

        // Opacity saturates at 1 past the threshold
        let frame = tracker.update(Point::new(-250.0, 0.0)).unwrap();
        assert_eq!(
            frame.indicator,
            IndicatorState::Lit { direction: Direction::Left, opacity: 1.0 }
        );
    }

    #[test]
    fn test_rotation_proportional_and_capped() {
        let mut tracker = tracker();
        tracker.begin(Point::new(0.0, 0.0));

        let frame = tracker.update(Point::new(200.0, 0.0)).unwrap();
        assert!((frame.transform.rotate_deg - 7.5).abs() < 1e-9);

        let frame = tracker.update(Point::new(900.0, 0.0)).unwrap();
        assert_eq!(frame.transform.rotate_deg, 15.0);
    }

    #[test]
    fn test_forced_commit_uses_long_settle_without_haptic() {
        let mut tracker = tracker();
        let plan = tracker.force_commit(Direction::Right).unwrap();
        assert_eq!(plan.settle_ms, 400);
        assert!(!plan.haptic);
        assert_eq!(plan.exit.translate_y, 0.0);
        assert_eq!(tracker.phase(), GesturePhase::AnimatingOut);
    }

    #[test]
    fn test_no_input_accepted_while_animating_out() {
        let mut tracker = tracker();
        tracker.force_commit(Direction::Left).unwrap();

        assert!(!tracker.begin(Point::new(0.0, 0.0)));
        assert!(tracker.update(Point::new(50.0, 0.0)).is_none());
        assert_eq!(tracker.end(Point::new(50.0, 0.0)), None);
        assert!(tracker.force_commit(Direction::Right).is_none());
    }

    #[test]
    fn test_release_without_drag_is_not_a_cancel() {
        let mut tracker = tracker();
        assert_eq!(tracker.end(Point::new(50.0, 0.0)), None);
    }

    #[test]
    fn test_rescind_returns_tracker_to_rest() {
        let mut tracker = tracker();
        tracker.begin(Point::new(0.0, 0.0));
        tracker.update(Point::new(150.0, 0.0));
        assert!(matches!(
            tracker.end(Point::new(150.0, 0.0)),
            Some(ReleaseOutcome::Commit(_))
        ));

        tracker.rescind();
        assert_eq!(tracker.phase(), GesturePhase::Idle);
        assert_eq!(tracker.delta(), (0.0, 0.0));
        // A fresh drag is accepted again
        assert!(tracker.begin(Point::new(10.0, 0.0)));
    }

    #[test]
    fn test_begin_while_dragging_is_ignored() {
        let mut tracker = tracker();
        tracker.begin(Point::new(100.0, 0.0));
        tracker.update(Point::new(150.0, 0.0));
        assert!(!tracker.begin(Point::new(0.0, 0.0)));
        // Original session survives
        assert_eq!(tracker.delta().0, 50.0);
    }

    #[test]
    fn test_update_ignored_while_idle() {
        let mut tracker = tracker();
        assert!(tracker.update(Point::new(50.0, 0.0)).is_none());
    }
}
