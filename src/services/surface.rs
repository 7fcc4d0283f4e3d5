use crate::core::gesture::IndicatorState;
use crate::models::{Candidate, QuotaCounters, Transform};

/// Rendering capabilities the engine drives
///
/// Implementations own the actual widgets; the engine only speaks in terms
/// of these calls, so it stays headless and testable. Nothing here returns
/// a value the engine's state machines depend on, except the viewport
/// width used for drag physics.
pub trait RenderSurface {
    /// Width used to scale rotation and exit translation
    fn viewport_width(&self) -> f64;

    fn show_loading(&mut self);

    /// Mount the visible window; the first card is the interactive one
    fn show_deck(&mut self, window: &[Candidate]);

    fn show_empty(&mut self);

    /// Per-frame drag transform for the top card
    fn set_card_transform(&mut self, transform: Transform);

    /// Snap the top card back to its rest position
    fn reset_card_transform(&mut self);

    fn set_indicator(&mut self, state: IndicatorState);

    /// The top card is leaving and must stop accepting pointer input
    fn mark_animating_out(&mut self);

    /// Rejection feedback on the top card
    fn shake_card(&mut self);

    /// Celebratory effect for a mutual match
    fn show_match(&mut self, candidate: &Candidate);

    fn update_stats(&mut self, quotas: QuotaCounters, match_count: u32);
}

/// Surface that narrates render calls through tracing, for the demo binary
#[derive(Debug)]
pub struct TracingSurface {
    viewport_width: f64,
}

impl TracingSurface {
    pub fn new(viewport_width: f64) -> Self {
        Self { viewport_width }
    }
}

impl RenderSurface for TracingSurface {
    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn show_loading(&mut self) {
        tracing::info!("deck loading");
    }

    fn show_deck(&mut self, window: &[Candidate]) {
        let names: Vec<&str> = window.iter().map(|c| c.name.as_str()).collect();
        tracing::info!(?names, "deck window rendered");
    }

    fn show_empty(&mut self) {
        tracing::info!("deck empty");
    }

    fn set_card_transform(&mut self, transform: Transform) {
        tracing::trace!(?transform, "card transform");
    }

    fn reset_card_transform(&mut self) {
        tracing::trace!("card transform reset");
    }

    fn set_indicator(&mut self, state: IndicatorState) {
        tracing::trace!(?state, "indicator");
    }

    fn mark_animating_out(&mut self) {
        tracing::debug!("top card animating out");
    }

    fn shake_card(&mut self) {
        tracing::debug!("top card shake");
    }

    fn show_match(&mut self, candidate: &Candidate) {
        tracing::info!(candidate = %candidate.name, "it's a match");
    }

    fn update_stats(&mut self, quotas: QuotaCounters, match_count: u32) {
        tracing::info!(
            likes_remaining = quotas.likes_remaining,
            super_likes_remaining = quotas.super_likes_remaining,
            match_count,
            "stats updated"
        );
    }
}
