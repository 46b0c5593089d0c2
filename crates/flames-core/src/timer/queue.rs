//! One-shot timers keyed by wall-clock deadline.
//!
//! Timers are never cancelled. Entries with the same deadline fire in the
//! order they were scheduled.

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct TimerEntry<T> {
    pub due: DateTime<Utc>,
    seq: u64,
    pub payload: T,
}

#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    entries: Vec<TimerEntry<T>>,
    next_seq: u64,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }

    pub fn schedule(&mut self, now: DateTime<Utc>, delay_ms: u64, payload: T) -> DateTime<Utc> {
        let due = now + Duration::milliseconds(delay_ms as i64);
        self.entries.push(TimerEntry {
            due,
            seq: self.next_seq,
            payload,
        });
        self.next_seq += 1;
        due
    }

    /// Earliest pending deadline.
    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.entries.iter().map(|e| e.due).min()
    }

    /// Remove and return the earliest entry due at or before `now`.
    pub fn pop_due(&mut self, now: DateTime<Utc>) -> Option<TimerEntry<T>> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= now)
            .min_by_key(|(_, e)| (e.due, e.seq))
            .map(|(i, _)| i)?;
        Some(self.entries.remove(idx))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
