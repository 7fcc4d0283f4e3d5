/// Handle to a scheduled continuation, usable for cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerId(u64);

#[derive(Debug)]
struct TimerEntry<E> {
    id: TimerId,
    due_ms: u64,
    event: E,
}

/// Virtual-time replacement for host `setTimeout` scheduling
///
/// All animation sequencing delays go through this queue, so tests drive
/// time with `advance` instead of waiting on the wall clock. Continuations
/// fire in due-time order; ties fire in scheduling order.
#[derive(Debug)]
pub struct TimerQueue<E> {
    now_ms: u64,
    next_id: u64,
    entries: Vec<TimerEntry<E>>,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Schedule an event `delay_ms` from the current virtual time
    ///
    /// A zero delay fires on the next `advance` call, never synchronously.
    pub fn schedule(&mut self, delay_ms: u64, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(TimerEntry {
            id,
            due_ms: self.now_ms + delay_ms,
            event,
        });
        id
    }

    /// Drop a pending continuation. Returns false when it already fired.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Move virtual time forward and collect every continuation now due
    pub fn advance(&mut self, delta_ms: u64) -> Vec<E> {
        self.now_ms += delta_ms;
        let now = self.now_ms;

        let mut due: Vec<TimerEntry<E>> = Vec::new();
        let mut remaining: Vec<TimerEntry<E>> = Vec::new();
        for entry in self.entries.drain(..) {
            if entry.due_ms <= now {
                due.push(entry);
            } else {
                remaining.push(entry);
            }
        }
        self.entries = remaining;

        due.sort_by_key(|entry| (entry.due_ms, entry.id.0));
        due.into_iter().map(|entry| entry.event).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_only_when_due() {
        let mut timers: TimerQueue<&str> = TimerQueue::new();
        timers.schedule(300, "settle");

        assert!(timers.advance(299).is_empty());
        assert_eq!(timers.advance(1), vec!["settle"]);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_fires_in_due_order_with_stable_ties() {
        let mut timers: TimerQueue<&str> = TimerQueue::new();
        timers.schedule(400, "render");
        timers.schedule(300, "settle");
        timers.schedule(400, "reveal");

        assert_eq!(timers.advance(500), vec!["settle", "render", "reveal"]);
    }

    #[test]
    fn test_cancel_removes_pending_entry() {
        let mut timers: TimerQueue<&str> = TimerQueue::new();
        let id = timers.schedule(100, "a");
        timers.schedule(100, "b");

        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert_eq!(timers.advance(100), vec!["b"]);
    }

    #[test]
    fn test_zero_delay_fires_on_next_advance() {
        let mut timers: TimerQueue<&str> = TimerQueue::new();
        timers.schedule(0, "now");
        assert_eq!(timers.advance(0), vec!["now"]);
    }

    #[test]
    fn test_time_accumulates_across_advances() {
        let mut timers: TimerQueue<&str> = TimerQueue::new();
        timers.advance(250);
        timers.schedule(100, "later");
        assert_eq!(timers.now_ms(), 250);
        assert!(timers.advance(99).is_empty());
        assert_eq!(timers.advance(1), vec!["later"]);
    }
}
