use crate::models::Severity;

/// Toast and haptic sink, fire-and-forget
///
/// The engine never consumes a return value from these calls; failures are
/// an implementation concern and must not reach the state machines.
pub trait NotificationSink {
    fn toast(&mut self, message: &str, severity: Severity, duration_ms: u64);

    /// Short vibration pattern request (alternating on/off millisecond runs)
    fn vibrate(&mut self, pattern: &[u32]);

    /// Secondary prompt shown when a like/superlike quota runs out
    fn prompt_upgrade(&mut self);
}

/// Sink that narrates notifications through tracing, for the demo binary
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn toast(&mut self, message: &str, severity: Severity, duration_ms: u64) {
        tracing::info!(?severity, duration_ms, "toast: {}", message);
    }

    fn vibrate(&mut self, pattern: &[u32]) {
        tracing::debug!(?pattern, "vibrate");
    }

    fn prompt_upgrade(&mut self) {
        tracing::info!("upgrade prompt shown");
    }
}
