//! Timer entries that fire against the simulation clock instead of wall time.
use std::time::Duration;

use bevy::prelude::*;

#[derive(Debug)]
struct DeferredEntry<T> {
    due: Duration,
    sequence: u64,
    payload: T,
}

/// Queue of payloads waiting for a point on the simulation clock.
///
/// Entries are never cancelled; once scheduled a payload is released by the
/// first `drain_due` call whose `now` reaches its due time. Payloads due at the
/// same instant come out in scheduling order.
#[derive(Resource, Debug)]
pub struct DeferredQueue<T: Send + Sync + 'static> {
    entries: Vec<DeferredEntry<T>>,
    next_sequence: u64,
}

impl<T: Send + Sync + 'static> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_sequence: 0,
        }
    }
}

impl<T: Send + Sync + 'static> DeferredQueue<T> {
    pub fn schedule(&mut self, now: Duration, delay: Duration, payload: T) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.entries.push(DeferredEntry {
            due: now.saturating_add(delay),
            sequence,
            payload,
        });
    }

    /// Removes and returns every payload due at or before `now`.
    pub fn drain_due(&mut self, now: Duration) -> Vec<T> {
        if !self.entries.iter().any(|entry| entry.due <= now) {
            return Vec::new();
        }

        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|entry| entry.due <= now);
        self.entries = pending;

        due.sort_by_key(|entry| (entry.due, entry.sequence));
        due.into_iter().map(|entry| entry.payload).collect()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn releases_payloads_once_due() {
        let mut queue = DeferredQueue::default();
        queue.schedule(Duration::from_secs(1), Duration::from_secs(10), "cooldown");

        assert!(queue.drain_due(Duration::from_secs(10)).is_empty());
        assert_eq!(queue.len(), 1);

        assert_eq!(queue.drain_due(Duration::from_secs(11)), vec!["cooldown"]);
        assert!(queue.is_empty());
        assert!(queue.drain_due(Duration::from_secs(30)).is_empty());
    }

    #[test]
    fn huge_delays_saturate() {
        let mut queue = DeferredQueue::default();
        queue.schedule(Duration::from_secs(5), Duration::MAX, "never");
        assert!(queue.drain_due(Duration::from_secs(1_000_000)).is_empty());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn orders_by_due_time_then_schedule_order() {
        let mut queue = DeferredQueue::default();
        let now = Duration::ZERO;
        queue.schedule(now, Duration::from_millis(300), 'c');
        queue.schedule(now, Duration::from_millis(100), 'a');
        queue.schedule(now, Duration::from_millis(100), 'b');
        queue.schedule(now, Duration::from_secs(5), 'z');

        assert_eq!(queue.drain_due(Duration::from_secs(1)), vec!['a', 'b', 'c']);
        assert_eq!(queue.len(), 1);
    }
}
