//! Deterministic queue of deferred events on a logical millisecond clock.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A min-heap of events keyed by `(fire_at, sequence)`.
///
/// Events due at the same time fire in the order they were scheduled. Time
/// only moves when [`advance`](Self::advance) is called.
#[derive(Debug, Clone)]
pub struct Scheduler<E> {
    now: u64,
    next_seq: u64,
    queue: BinaryHeap<Scheduled<E>>,
}

#[derive(Debug, Clone)]
struct Scheduled<E> {
    fire_at: u64,
    seq: u64,
    event: E,
}

impl<E> PartialEq for Scheduled<E> {
    fn eq(&self, other: &Self) -> bool {
        (self.fire_at, self.seq) == (other.fire_at, other.seq)
    }
}

impl<E> Eq for Scheduled<E> {}

impl<E> PartialOrd for Scheduled<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Scheduled<E> {
    // Reversed so the max-heap pops the earliest event first.
    fn cmp(&self, other: &Self) -> Ordering {
        (other.fire_at, other.seq).cmp(&(self.fire_at, self.seq))
    }
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    /// An empty scheduler at time zero.
    pub fn new() -> Self {
        Self {
            now: 0,
            next_seq: 0,
            queue: BinaryHeap::new(),
        }
    }

    /// Current logical time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Queue `event` to fire `delay_ms` from now. Returns its fire time.
    pub fn schedule(&mut self, delay_ms: u64, event: E) -> u64 {
        let fire_at = self.now.saturating_add(delay_ms);
        let seq = self.next_seq;
        self.next_seq += 1;
        tracing::trace!(fire_at, seq, "event scheduled");
        self.queue.push(Scheduled {
            fire_at,
            seq,
            event,
        });
        fire_at
    }

    /// Move the clock forward and return every event that became due, in
    /// firing order.
    pub fn advance(&mut self, ms: u64) -> Vec<E> {
        let target = self.now.saturating_add(ms);
        let mut due = Vec::new();
        while self.queue.peek().is_some_and(|s| s.fire_at <= target) {
            if let Some(s) = self.queue.pop() {
                tracing::trace!(fire_at = s.fire_at, seq = s.seq, "event fired");
                due.push(s.event);
            }
        }
        self.now = target;
        due
    }

    /// Milliseconds until the next event is due, if any is queued.
    pub fn until_next(&self) -> Option<u64> {
        self.queue
            .peek()
            .map(|s| s.fire_at.saturating_sub(self.now))
    }

    /// Number of queued events.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drop every queued event and rewind the clock.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.now = 0;
        self.next_seq = 0;
    }
}
