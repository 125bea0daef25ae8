//! Timer queue for Veneer.
//!
//! Provides one-shot timers over a monotonic, caller-driven clock. The owner
//! advances the clock (from a real event loop tick or from a test) and
//! receives the IDs of every timer that expired, in firing order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

use slotmap::{SlotMap, new_key_type};

use crate::error::TimerError;
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a timer.
    pub struct TimerId;
}

/// An entry in the timer queue (min-heap by fire time, FIFO among equals).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    fire_time: Duration,
    seq: u64,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_time == other.fire_time && self.seq == other.seq
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other
            .fire_time
            .cmp(&self.fire_time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Manages a set of one-shot timers against a caller-driven clock.
#[derive(Debug, Default)]
pub struct TimerManager {
    /// Pending timers and the clock reading each fires at.
    timers: SlotMap<TimerId, Duration>,
    queue: BinaryHeap<TimerQueueEntry>,
    /// Current clock reading.
    now: Duration,
    seq: u64,
}

impl TimerManager {
    /// Create a new timer manager with the clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current clock reading.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Start a one-shot timer that fires `delay` after the current clock reading.
    pub fn start_one_shot(&mut self, delay: Duration) -> TimerId {
        let fire_time = self.now + delay;
        let id = self.timers.insert(fire_time);
        self.seq += 1;
        self.queue.push(TimerQueueEntry {
            id,
            fire_time,
            seq: self.seq,
        });
        tracing::trace!(target: targets::TIMER, ?id, ?delay, "timer started");
        id
    }

    /// Stop and remove a timer.
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::InvalidTimerId`] if the timer already fired or
    /// was stopped before.
    pub fn stop(&mut self, id: TimerId) -> Result<(), TimerError> {
        if self.timers.remove(id).is_some() {
            tracing::trace!(target: targets::TIMER, ?id, "timer stopped");
            Ok(())
        } else {
            Err(TimerError::InvalidTimerId)
        }
    }

    /// Move the clock forward by `by` and collect every timer that expired,
    /// in firing order.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerId> {
        let target = self.now + by;
        let mut fired = Vec::new();

        while let Some(entry) = self.queue.peek().copied() {
            if entry.fire_time > target {
                break;
            }
            self.queue.pop();

            // Stopped timers leave their queue entry behind.
            if self.timers.remove(entry.id).is_none() {
                continue;
            }
            self.now = entry.fire_time;
            tracing::trace!(target: targets::TIMER, id = ?entry.id, "timer fired");
            fired.push(entry.id);
        }

        self.now = target;
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_fires_once() {
        let mut timers = TimerManager::new();
        let id = timers.start_one_shot(Duration::from_secs(10));

        assert!(timers.advance(Duration::from_secs(9)).is_empty());
        assert_eq!(timers.advance(Duration::from_secs(1)), vec![id]);
        assert_eq!(timers.stop(id), Err(TimerError::InvalidTimerId));
        assert!(timers.advance(Duration::from_secs(60)).is_empty());
    }

    #[test]
    fn test_stopped_timer_never_fires() {
        let mut timers = TimerManager::new();
        let id = timers.start_one_shot(Duration::from_millis(100));
        timers.stop(id).unwrap();

        assert_eq!(timers.stop(id), Err(TimerError::InvalidTimerId));
        assert!(timers.advance(Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn test_firing_order() {
        let mut timers = TimerManager::new();
        let late = timers.start_one_shot(Duration::from_millis(300));
        let early = timers.start_one_shot(Duration::from_millis(100));
        let tie = timers.start_one_shot(Duration::from_millis(100));

        assert_eq!(timers.advance(Duration::from_secs(1)), vec![early, tie, late]);
    }

    #[test]
    fn test_clock_advances() {
        let mut timers = TimerManager::new();
        timers.advance(Duration::from_secs(2));
        let id = timers.start_one_shot(Duration::from_secs(1));
        assert_eq!(timers.now(), Duration::from_secs(2));

        assert!(timers.advance(Duration::from_millis(999)).is_empty());
        assert_eq!(timers.advance(Duration::from_millis(1)), vec![id]);
        assert_eq!(timers.now(), Duration::from_secs(3));
    }
}
