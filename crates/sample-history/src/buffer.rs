//! Fixed-capacity history buffer

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Fixed-capacity FIFO history of samples, oldest evicted on overflow.
///
/// Single-writer, frame-synchronous; no interior mutability needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct History<T> {
    data: VecDeque<T>,
    capacity: usize,
    /// Total samples ever pushed (for statistics).
    total_pushed: u64,
}

impl<T> History<T> {
    /// Create a history holding at most `capacity` samples.
    ///
    /// Panics if `capacity` is zero; a zero-length history is a config bug.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "history capacity must be > 0");
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
            total_pushed: 0,
        }
    }

    /// Push a sample, evicting the oldest if the buffer is full.
    pub fn push(&mut self, sample: T) {
        if self.data.len() == self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(sample);
        self.total_pushed += 1;
    }

    /// Number of samples currently held.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total samples ever pushed (including evicted ones).
    pub fn total_pushed(&self) -> u64 {
        self.total_pushed
    }

    /// Most recent sample, if any.
    pub fn latest(&self) -> Option<&T> {
        self.data.back()
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Iterate consecutive (older, newer) pairs, oldest first.
    ///
    /// Yields nothing while fewer than two samples are held.
    pub fn pairs(&self) -> impl Iterator<Item = (&T, &T)> {
        self.data.iter().zip(self.data.iter().skip(1))
    }

    /// The most recent (previous, latest) pair, if at least two samples.
    pub fn latest_pair(&self) -> Option<(&T, &T)> {
        let len = self.data.len();
        if len < 2 {
            return None;
        }
        Some((&self.data[len - 2], &self.data[len - 1]))
    }

    /// Drop all samples, keeping capacity and statistics.
    pub fn clear(&mut self) {
        self.data.clear();
    }
}
